//! Observability HTTP Routes
//!
//! Health check reporting whether the measurement store can be opened.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use super::climate_routes::ClimateState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Health check route at `/health`
pub fn health_routes(state: Arc<ClimateState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

/// 200 when a session can be opened, 503 otherwise
async fn health_handler(State(state): State<Arc<ClimateState>>) -> impl IntoResponse {
    let store = state.store.clone();
    let reachable = tokio::task::spawn_blocking(move || store.session().is_ok())
        .await
        .unwrap_or(false);

    if reachable {
        (StatusCode::OK, Json(HealthResponse::new("ok")))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::new("unavailable")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let json = serde_json::to_value(HealthResponse::new("ok")).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }
}
