//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health - Full health status, including backend reachability

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Always 200; a backend that does not answer `GET /cars` marks the
/// service as degraded.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let backend_ok = match state.api.list_cars().await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Backend health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if backend_ok { "healthy" } else { "degraded" }.to_string(),
        backend: if backend_ok { "ok" } else { "unreachable" }.to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
