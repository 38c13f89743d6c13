//! Cache maintenance route handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::cache::CacheStats;
use crate::AppState;

/// Query parameters for cache invalidation
#[derive(Debug, Deserialize)]
pub struct InvalidateQuery {
    /// Only drop this car; everything is dropped when absent
    pub car_id: Option<i64>,
}

/// Current cache sizes
pub async fn stats(State(state): State<AppState>) -> Json<CacheStats> {
    state.catalog.cache().cars.run_pending_tasks().await;
    Json(state.catalog.cache().stats())
}

/// Drop cached car catalogs
pub async fn invalidate(
    State(state): State<AppState>,
    Query(query): Query<InvalidateQuery>,
) -> StatusCode {
    match query.car_id {
        Some(car_id) => state.catalog.cache().invalidate_car(car_id).await,
        None => state.catalog.cache().invalidate_all(),
    }
    StatusCode::NO_CONTENT
}
