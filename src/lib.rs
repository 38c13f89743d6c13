//! Pricing service for the Prestige car rental website.
//!
//! Computes rental quotes (duration, tiered discount, add-on services) for
//! the booking UI and checks bookings before they reach the rental backend.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod pricing;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::cache::AppCache;
use crate::catalog::{CatalogClient, CatalogError};
use crate::config::Config;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: CatalogClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, CatalogError> {
        let cache = AppCache::new(&config);
        let catalog = CatalogClient::new(&config, cache)?;
        Ok(Self {
            config: Arc::new(config),
            catalog,
        })
    }
}

/// Build the full router. Used by main.rs and integration tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .nest("/api", pricing::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
