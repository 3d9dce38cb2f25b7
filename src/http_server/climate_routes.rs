//! Climate HTTP Routes
//!
//! Read-only endpoints over the station and measurement tables.
//!
//! Every request runs on the blocking pool with its own store session; the
//! session is closed when the closure returns, on success or error.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::observability::{Logger, RequestScope};
use crate::store::{
    ClimateSession, ClimateStore, DateRange, PrecipitationByDate, StationEntry, StoreResult,
    TemperatureStats, TobsEntry,
};

use super::errors::{ApiError, ApiResult};

/// Route listing served at `/`
pub const ROUTES_INDEX: &str = "Available Routes:\n\
/api/v1.0/precipitation\n\
/api/v1.0/stations\n\
/api/v1.0/tobs\n\
/api/v1.0/<start>\n\
/api/v1.0/<start>/<end>\n";

// ==================
// Shared State
// ==================

/// Climate state shared across handlers
pub struct ClimateState {
    pub store: ClimateStore,
}

impl ClimateState {
    pub fn new(store: ClimateStore) -> Self {
        Self { store }
    }
}

// ==================
// Climate Routes
// ==================

/// Create climate routes
pub fn climate_routes(state: Arc<ClimateState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/api/v1.0/precipitation", get(precipitation_handler))
        .route("/api/v1.0/stations", get(stations_handler))
        .route("/api/v1.0/tobs", get(tobs_handler))
        .route("/api/v1.0/:start", get(stats_from_start_handler))
        .route("/api/v1.0/:start/:end", get(stats_range_handler))
        .with_state(state)
}

/// Number of result rows, for request logging
trait RowCount {
    fn row_count(&self) -> usize;
}

impl<T> RowCount for Vec<T> {
    fn row_count(&self) -> usize {
        self.len()
    }
}

impl RowCount for PrecipitationByDate {
    fn row_count(&self) -> usize {
        self.len()
    }
}

/// Run `query` against a fresh session on the blocking pool, closing `scope`
async fn run_query<T, F>(state: &ClimateState, scope: RequestScope, query: F) -> ApiResult<T>
where
    T: RowCount + Send + 'static,
    F: FnOnce(&ClimateSession) -> StoreResult<T> + Send + 'static,
{
    let store = state.store.clone();

    let result = tokio::task::spawn_blocking(move || {
        let session = store.session()?;
        query(&session)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("query task failed: {}", e)))
    .and_then(|r| r.map_err(ApiError::from));

    match &result {
        Ok(value) => scope.complete(value.row_count()),
        Err(err) => scope.fail(&err.to_string()),
    }

    result
}

// ==================
// Handlers
// ==================

async fn home_handler() -> &'static str {
    ROUTES_INDEX
}

async fn precipitation_handler(
    State(state): State<Arc<ClimateState>>,
) -> ApiResult<Json<PrecipitationByDate>> {
    let scope = RequestScope::begin("precipitation");
    let data = run_query(&state, scope, |s| s.precipitation_last_year()).await?;
    Ok(Json(data))
}

async fn stations_handler(
    State(state): State<Arc<ClimateState>>,
) -> ApiResult<Json<Vec<StationEntry>>> {
    let data = run_query(&state, RequestScope::begin("stations"), |s| s.stations()).await?;
    Ok(Json(data))
}

async fn tobs_handler(State(state): State<Arc<ClimateState>>) -> ApiResult<Json<Vec<TobsEntry>>> {
    let data = run_query(&state, RequestScope::begin("tobs"), |s| s.tobs_last_year()).await?;
    Ok(Json(data))
}

async fn stats_from_start_handler(
    State(state): State<Arc<ClimateState>>,
    Path(start): Path<String>,
) -> ApiResult<Json<Vec<TemperatureStats>>> {
    temperature_stats(&state, "stats_from_start", &start, None).await
}

async fn stats_range_handler(
    State(state): State<Arc<ClimateState>>,
    Path((start, end)): Path<(String, String)>,
) -> ApiResult<Json<Vec<TemperatureStats>>> {
    temperature_stats(&state, "stats_from_range", &start, Some(&end)).await
}

/// One-element list, matching the shape clients already consume
async fn temperature_stats(
    state: &ClimateState,
    route: &'static str,
    start: &str,
    end: Option<&str>,
) -> ApiResult<Json<Vec<TemperatureStats>>> {
    let scope = RequestScope::begin(route);
    let range = match DateRange::parse(start, end) {
        Ok(range) => range,
        Err(err) => {
            let err = ApiError::from(err);
            scope.reject(&err.to_string());
            return Err(err);
        }
    };

    let data = run_query(state, scope, move |s| {
        s.temperature_stats(&range).map(|stats| vec![stats])
    })
    .await?;

    if data.iter().all(TemperatureStats::is_empty) {
        let start = range.start().to_string();
        let end = range.end().map(|end| end.to_string()).unwrap_or_default();
        Logger::warn(
            "EMPTY_WINDOW",
            &[("route", route), ("start", start.as_str()), ("end", end.as_str())],
        );
    }

    Ok(Json(data))
}
