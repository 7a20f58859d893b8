use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the data directory is reachable.
    pub store_healthy: bool,
}

/// GET /health -- returns service and data directory health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_healthy = tokio::fs::metadata(state.store.data_dir())
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);

    let status = if store_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store_healthy,
    })
}

/// Mount health check routes at root level.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
