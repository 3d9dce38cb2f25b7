//! # HTTP Server Module
//!
//! Axum server exposing the read-only climate API.
//!
//! # Endpoints
//!
//! - `/` - Plain-text route listing
//! - `/api/v1.0/precipitation` - Last year of precipitation by date
//! - `/api/v1.0/stations` - All stations
//! - `/api/v1.0/tobs` - Last year of temperatures at the most active station
//! - `/api/v1.0/{start}` and `/api/v1.0/{start}/{end}` - TMIN/TAVG/TMAX
//! - `/health` - Health check

pub mod climate_routes;
pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;

pub use climate_routes::{climate_routes, ClimateState};
pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::{build_router, HttpServer};
