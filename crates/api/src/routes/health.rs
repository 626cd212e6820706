use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use micropos_core::environment::Environment;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Application version from the settings.
    pub version: String,
    pub environment: Environment,
    /// Whether the backend answered a trivial read.
    pub backend_healthy: bool,
}

/// GET /health -- returns service and backend health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend_healthy = micropos_db::health_check(state.db()).await.is_ok();

    let status = if backend_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: state.settings.version.clone(),
        environment: state.settings.environment,
        backend_healthy,
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
