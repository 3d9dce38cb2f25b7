//! Observability for the climate API
//!
//! Structured JSON logging plus a per-request scope that records
//! begin/complete/failed events.
//!
//! # Usage
//!
//! ```ignore
//! use climate_api::observability::{Logger, RequestScope};
//!
//! Logger::info("SERVER_START", &[("addr", "0.0.0.0:5000")]);
//!
//! let scope = RequestScope::begin("stations");
//! // ... run the query ...
//! scope.complete(9);
//! ```

mod logger;
mod scope;

pub use logger::{Logger, Severity};
pub use scope::RequestScope;
