//! climate-api - Read-only HTTP API over a historical weather station dataset
//!
//! Serves precipitation, station and temperature statistics computed with
//! SQL aggregates over a SQLite `station`/`measurement` table pair.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod store;
