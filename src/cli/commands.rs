//! CLI command implementations
//!
//! `init` and `load` are the only writers of the database. `serve` opens it
//! read-only through the HTTP layer.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http_server::config::{default_host, default_port};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{Logger, Severity};
use crate::store::{ClimateStore, Seed};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file (required)
    pub database_path: String,

    /// Host to bind to (optional, default "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (optional, default 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins (optional, default: any origin)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Minimum log severity (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        if self.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        self.severity()?;

        Ok(())
    }

    /// Get database path as Path
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.database_path)
    }

    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse().map_err(CliError::config_error)
    }

    /// HTTP settings, with an optional port override from the command line
    pub fn http_config(&self, port: Option<u16>) -> CliResult<HttpServerConfig> {
        let port = port.unwrap_or(self.port);
        if port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        Ok(HttpServerConfig {
            host: self.host.clone(),
            port,
            cors_origins: self.cors_origins.clone(),
        })
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Load { config, seed } => load(&config, &seed),
        Command::Serve { config, port } => serve(&config, port),
    }
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity()?);
    let path = config_path.display().to_string();
    Logger::info("CONFIG_LOADED", &[("path", path.as_str())]);
    Ok(config)
}

/// Create the database file and apply the schema. Safe to repeat.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let store = ClimateStore::create(config.database_path())?;

    write_response(&json!({
        "initialized": true,
        "database": store.path().display().to_string(),
    }))
}

/// Load a seed file into the database in one transaction
pub fn load(config_path: &Path, seed_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let store = ClimateStore::create(config.database_path())?;

    let seed = Seed::from_path(seed_path)?;
    let summary = store.load(&seed)?;

    let stations = summary.stations.to_string();
    let measurements = summary.measurements.to_string();
    Logger::info(
        "SEED_LOADED",
        &[
            ("stations", stations.as_str()),
            ("measurements", measurements.as_str()),
        ],
    );

    write_response(&summary)
}

/// Serve the read API until Ctrl-C
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let store = ClimateStore::open(config.database_path())?;

    let server = HttpServer::new(config.http_config(port)?, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::from_json(r#"{"database_path": "hawaii.sqlite"}"#).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.severity().unwrap(), Severity::Info);
    }

    #[test]
    fn test_config_requires_database_path() {
        let err = Config::from_json("{}").unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);

        let err = Config::from_json(r#"{"database_path": "  "}"#).unwrap_err();
        assert!(err.message().contains("database_path"));
    }

    #[test]
    fn test_config_rejects_zero_port() {
        let err = Config::from_json(r#"{"database_path": "h.sqlite", "port": 0}"#).unwrap_err();
        assert!(err.message().contains("port"));
    }

    #[test]
    fn test_config_rejects_unknown_log_level() {
        let err =
            Config::from_json(r#"{"database_path": "h.sqlite", "log_level": "loud"}"#).unwrap_err();
        assert!(err.message().contains("loud"));
    }

    #[test]
    fn test_http_config_port_override() {
        let config = Config::from_json(r#"{"database_path": "h.sqlite", "port": 7000}"#).unwrap();
        assert_eq!(config.http_config(None).unwrap().port, 7000);
        assert_eq!(config.http_config(Some(9000)).unwrap().port, 9000);
        assert!(config.http_config(Some(0)).is_err());
    }

    #[test]
    fn test_init_then_load() {
        let tmp = TempDir::new().unwrap();
        let db = tmp.path().join("climate.sqlite");
        let config_path = tmp.path().join("climate.json");
        let seed_path = tmp.path().join("seed.json");

        fs::write(
            &config_path,
            json!({"database_path": db, "log_level": "error"}).to_string(),
        )
        .unwrap();
        fs::write(
            &seed_path,
            r#"{
                "stations": [{"station": "USC00519281", "name": "WAIHEE 837.5, HI US"}],
                "measurements": [{"station": "USC00519281", "date": "2017-08-23", "tobs": 76.0}]
            }"#,
        )
        .unwrap();

        init(&config_path).unwrap();
        init(&config_path).unwrap();
        load(&config_path, &seed_path).unwrap();

        let session = ClimateStore::open(&db).unwrap().session().unwrap();
        assert_eq!(session.latest_date().unwrap().as_deref(), Some("2017-08-23"));
    }

    #[test]
    fn test_serve_without_database() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("climate.json");
        fs::write(
            &config_path,
            json!({"database_path": tmp.path().join("missing.sqlite"), "log_level": "error"})
                .to_string(),
        )
        .unwrap();

        let err = serve(&config_path, None).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::NotInitialized);
    }
}
