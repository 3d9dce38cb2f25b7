//! # Store Errors
//!
//! Error types for the measurement store.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Measurement store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database file does not exist
    #[error("Database not found: {}", .0.display())]
    DatabaseMissing(PathBuf),

    /// SQLite failure while opening or querying
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A date read back from storage is not an ISO calendar date
    #[error("Invalid stored date '{0}'")]
    InvalidStoredDate(String),

    /// Seed file could not be read
    #[error("Failed to read seed file: {0}")]
    SeedIo(#[from] std::io::Error),

    /// Seed file is not valid JSON
    #[error("Invalid seed JSON: {0}")]
    SeedFormat(#[from] serde_json::Error),

    /// Seed file parsed but violates the data model
    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),

    /// Load attempted against a store that already holds data
    #[error("Store already loaded ({stations} stations, {measurements} measurements)")]
    AlreadyLoaded { stations: i64, measurements: i64 },
}
