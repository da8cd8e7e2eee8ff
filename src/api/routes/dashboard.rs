//! Dashboard Routes
//!
//! - GET /api/v1/dashboard - Rendered page for the requested view
//! - POST /api/v1/cache/clear - Drop memoized upstream responses

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::DashboardQuery;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::view::{DashboardState, RenderOptions, ViewOutput};

/// GET /api/v1/dashboard
///
/// Upstream failures do not fail the request; they show up in `warnings`
/// and the affected parts of the page are empty.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> ApiResult<Json<ViewOutput>> {
    let Query(query) = query?;
    let mode = query.mode()?;
    let options = RenderOptions {
        top_n: query.top.unwrap_or(state.dashboard.options().top_n),
    };

    tracing::debug!(view = ?mode, top_n = options.top_n, "rendering dashboard");

    let output = state
        .dashboard
        .view_with(&DashboardState::new(mode), &options)
        .await;

    Ok(Json(output))
}

/// POST /api/v1/cache/clear
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> StatusCode {
    state.dashboard.refresh().await;
    StatusCode::NO_CONTENT
}
