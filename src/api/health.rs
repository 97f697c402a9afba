//! Health check endpoint
//!
//! `/health` — simple "healthy" + version, for probes and dashboards.

use super::AppState;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

/// Simple health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Create the health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
