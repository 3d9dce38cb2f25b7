//! # Measurement Store
//!
//! SQLite-backed storage for the station and measurement tables.
//!
//! The HTTP layer holds a [`ClimateStore`] and opens one read-only
//! [`ClimateSession`] per request. Writes only happen through the CLI
//! (`init` and `load`).

pub mod dates;
pub mod errors;
pub mod loader;
pub mod queries;
pub mod schema;
pub mod session;

pub use dates::{DateError, DateRange, IsoDate};
pub use errors::{StoreError, StoreResult};
pub use loader::{LoadSummary, Seed};
pub use queries::{
    PrecipitationByDate, StationActivity, StationEntry, TemperatureStats, TobsEntry,
};
pub use schema::{Measurement, Station};
pub use session::{ClimateSession, ClimateStore};
