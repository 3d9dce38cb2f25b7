//! CLI argument definitions using clap
//!
//! Commands:
//! - climate-api init --config <path>
//! - climate-api load --config <path> --seed <path>
//! - climate-api serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Read-only HTTP API over a historical weather station dataset
#[derive(Parser, Debug)]
#[command(name = "climate-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file and apply the schema
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./climate.json")]
        config: PathBuf,
    },

    /// Load stations and measurements from a JSON seed file
    Load {
        /// Path to configuration file
        #[arg(long, default_value = "./climate.json")]
        config: PathBuf,

        /// Seed file with "stations" and "measurements" arrays
        #[arg(long)]
        seed: PathBuf,
    },

    /// Serve the read API over HTTP
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./climate.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["climate-api", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, PathBuf::from("./climate.json"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_load_requires_seed() {
        assert!(Cli::try_parse_from(["climate-api", "load"]).is_err());
        assert!(Cli::try_parse_from(["climate-api", "load", "--seed", "hawaii.json"]).is_ok());
    }
}
