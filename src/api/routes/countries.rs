//! Country Routes
//!
//! - GET /api/v1/countries - Navigation list ("Global", "All Countries", country names)
//! - GET /api/v1/countries/:name - One country's record
//! - GET /api/v1/top - Highest-case countries

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CountryListResponse, TopQuery, TopResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::upstream::CountryRecord;

/// GET /api/v1/countries
pub async fn list_countries(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CountryListResponse>> {
    let countries = state.dashboard.navigation().await?;

    Ok(Json(CountryListResponse {
        total: countries.len(),
        countries,
    }))
}

/// GET /api/v1/countries/:name
///
/// Exact, case-sensitive match on the country name.
pub async fn get_country(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<CountryRecord>> {
    let record = state.dashboard.country(&name).await?;
    Ok(Json(record))
}

/// GET /api/v1/top
pub async fn top_countries(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TopQuery>, QueryRejection>,
) -> ApiResult<Json<TopResponse>> {
    let Query(query) = query?;
    let n = query.n.unwrap_or(state.dashboard.options().top_n);
    let countries = state.dashboard.top(n).await?;

    Ok(Json(TopResponse {
        total: countries.len(),
        countries,
    }))
}
