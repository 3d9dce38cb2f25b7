//! CLI module for the climate API
//!
//! Provides command-line interface for:
//! - init: Create the database and apply the schema
//! - load: Load a JSON seed into the database
//! - serve: Run the HTTP read API

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, load, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
