//! In-memory caching using moka
//!
//! Keeps car catalogs (daily rate plus attached services) close to the
//! pricing endpoints so a preview does not hit the backend on every date
//! edit or service toggle.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::pricing::models::Car;

/// Application cache holding car catalogs
#[derive(Clone)]
pub struct AppCache {
    /// Cars with their services (car id -> Car)
    pub cars: Cache<i64, Arc<Car>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTL and capacity
    pub fn new(config: &Config) -> Self {
        Self {
            cars: Cache::builder()
                .max_capacity(config.catalog_cache_capacity)
                .time_to_live(config.catalog_cache_ttl)
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            cars_size: self.cars.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.cars.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate a single car, e.g. after its price changed
    pub async fn invalidate_car(&self, car_id: i64) {
        self.cars.invalidate(&car_id).await;
        info!("Cache invalidated for car: {}", car_id);
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub cars_size: u64,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every `period`.
pub async fn start_cache_warmer(catalog: CatalogClient, period: Duration) {
    let mut interval = interval(period);
    loop {
        // First tick completes immediately
        interval.tick().await;
        warm_cache(&catalog).await;
    }
}

/// Load the car listing into the cache
async fn warm_cache(catalog: &CatalogClient) {
    info!("Starting cache warm-up...");

    match catalog.list_cars().await {
        Ok(cars) => {
            for car in cars {
                catalog.cache().cars.insert(car.id, Arc::new(car)).await;
            }
        }
        Err(e) => warn!("Failed to warm car cache: {}", e),
    }

    catalog.cache().cars.run_pending_tasks().await;
    info!("Cache warm-up complete. Stats: {:?}", catalog.cache().stats());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn car(id: i64) -> Arc<Car> {
        Arc::new(Car {
            id,
            name: "Model S".to_string(),
            brand: "Tesla".to_string(),
            car_type: "sedan".to_string(),
            price: dec!(12000),
            is_available: true,
            services: vec![],
        })
    }

    #[tokio::test]
    async fn test_invalidate_car_removes_entry() {
        let cache = AppCache::new(&Config::default());
        cache.cars.insert(1, car(1)).await;
        cache.cars.insert(2, car(2)).await;

        cache.invalidate_car(1).await;

        assert!(cache.cars.get(&1).await.is_none());
        assert!(cache.cars.get(&2).await.is_some());
    }

    #[tokio::test]
    async fn test_stats_counts_entries() {
        let cache = AppCache::new(&Config::default());
        cache.cars.insert(1, car(1)).await;
        cache.cars.run_pending_tasks().await;

        assert_eq!(cache.stats().cars_size, 1);

        cache.invalidate_all();
        cache.cars.run_pending_tasks().await;
        assert_eq!(cache.stats().cars_size, 0);
    }
}
