//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout)
    IoError,
    /// Database file has not been created
    NotInitialized,
    /// Schema migration or seed load failed
    StoreFailed,
    /// HTTP server could not start or crashed
    ServeFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "CLIMATE_CLI_CONFIG_ERROR",
            Self::IoError => "CLIMATE_CLI_IO_ERROR",
            Self::NotInitialized => "CLIMATE_CLI_NOT_INITIALIZED",
            Self::StoreFailed => "CLIMATE_CLI_STORE_FAILED",
            Self::ServeFailed => "CLIMATE_CLI_SERVE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn not_initialized(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::NotInitialized, msg)
    }

    pub fn store_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::StoreFailed, msg)
    }

    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServeFailed, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DatabaseMissing(_) => Self::not_initialized(format!(
                "{}. Run 'climate-api init' first.",
                e
            )),
            other => Self::store_failed(other.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("port must be > 0");
        assert_eq!(err.to_string(), "CLIMATE_CLI_CONFIG_ERROR: port must be > 0");
    }

    #[test]
    fn test_missing_database_maps_to_not_initialized() {
        let err = CliError::from(StoreError::DatabaseMissing(PathBuf::from("h.sqlite")));
        assert_eq!(err.code(), &CliErrorCode::NotInitialized);
        assert!(err.message().contains("climate-api init"));
    }

    #[test]
    fn test_seed_error_maps_to_store_failed() {
        let err = CliError::from(StoreError::InvalidSeed("measurements[3]".to_string()));
        assert_eq!(err.code_str(), "CLIMATE_CLI_STORE_FAILED");
    }
}
