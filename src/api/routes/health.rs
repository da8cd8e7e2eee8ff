//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Pages render (with warnings) even when the upstream is down, so the
/// server is ready as soon as it is accepting connections.
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Full health status including upstream reachability.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let upstream_ok = state.dashboard.probe().await.is_ok();

    Json(HealthResponse {
        status: if upstream_ok { "healthy" } else { "degraded" }.to_string(),
        upstream: if upstream_ok { "ok" } else { "error" }.to_string(),
        upstream_url: state.dashboard.upstream_url(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
