//! Service-level routes: health and cache maintenance.

pub mod cache;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/cache/stats", get(cache::stats))
        .route("/api/cache/invalidate", post(cache::invalidate))
}
