//! # HTTP Server
//!
//! Combines the climate and health routers behind a CORS layer and serves
//! them until Ctrl-C.

use std::io;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::Logger;
use crate::store::ClimateStore;

use super::climate_routes::{climate_routes, ClimateState};
use super::config::HttpServerConfig;
use super::observability_routes::health_routes;

/// HTTP server for the climate API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `store`
    pub fn new(config: HttpServerConfig, store: ClimateStore) -> Self {
        let router = build_router(&config, store);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> Result<(), io::Error> {
        let addr = self
            .config
            .parse_socket_addr()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        let bound = listener.local_addr()?.to_string();
        Logger::info("SERVER_START", &[("addr", bound.as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Logger::info("SERVER_STOP", &[("addr", bound.as_str())]);
        Ok(())
    }
}

/// Build the combined router with all endpoints
pub fn build_router(config: &HttpServerConfig, store: ClimateStore) -> Router {
    let state = Arc::new(ClimateState::new(store));

    Router::new()
        .merge(climate_routes(state.clone()))
        .merge(health_routes(state))
        .layer(cors_layer(&config.cors_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                Logger::warn("CORS_ORIGIN_IGNORED", &[("origin", s.as_str())]);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        Logger::warn("SHUTDOWN_SIGNAL_UNAVAILABLE", &[]);
        std::future::pending::<()>().await;
    }
}
