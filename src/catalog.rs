//! Client for the rental backend REST API.
//!
//! The backend owns cars, services and bookings. This client reads car
//! catalogs (through [`AppCache`]) and forwards validated bookings.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::cache::AppCache;
use crate::config::Config;
use crate::pricing::models::Car;
use crate::pricing::requests::CreateBookingRequest;

/// Errors talking to the backend
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend rejected request with status {status}")]
    Rejected { status: u16, body: serde_json::Value },
}

/// Response of the booking-creation endpoint, passed through as-is
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

/// Car listing, either paginated or a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum CarListing {
    Paginated { results: Vec<Car> },
    Plain(Vec<Car>),
}

#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    cache: AppCache,
}

impl CatalogClient {
    pub fn new(config: &Config, cache: AppCache) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.backend_api_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    pub fn cache(&self) -> &AppCache {
        &self.cache
    }

    /// Get a car with its services; `None` when the backend does not know it.
    pub async fn fetch_car(&self, car_id: i64) -> Result<Option<Arc<Car>>, CatalogError> {
        if let Some(cached) = self.cache.cars.get(&car_id).await {
            debug!("Cache HIT for car: {}", car_id);
            return Ok(Some(cached));
        }
        debug!("Cache MISS for car: {}", car_id);
        self.fetch_car_fresh(car_id).await
    }

    /// Get a car straight from the backend and refresh its cache entry.
    ///
    /// Used where stale data must not decide the outcome, such as the
    /// availability check on submission.
    pub async fn fetch_car_fresh(&self, car_id: i64) -> Result<Option<Arc<Car>>, CatalogError> {
        let resp = self
            .http
            .get(format!("{}/cars/{}/", self.base_url, car_id))
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            self.cache.invalidate_car(car_id).await;
            return Ok(None);
        }

        let car: Car = resp.error_for_status()?.json().await?;
        let car = Arc::new(car);
        self.cache.cars.insert(car_id, car.clone()).await;
        Ok(Some(car))
    }

    /// List catalog cars (first page when the backend paginates)
    pub async fn list_cars(&self) -> Result<Vec<Car>, CatalogError> {
        let listing: CarListing = self
            .http
            .get(format!("{}/cars/", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(match listing {
            CarListing::Paginated { results } => results,
            CarListing::Plain(cars) => cars,
        })
    }

    /// Forward a validated booking to the backend.
    ///
    /// `authorization` is the caller's `Authorization` header value.
    /// Client errors (4xx) come back as [`CatalogError::Rejected`] so the
    /// backend's validation messages (date overlap, car unavailable) reach
    /// the caller unchanged.
    pub async fn create_booking(
        &self,
        req: &CreateBookingRequest,
        authorization: Option<&str>,
    ) -> Result<BackendResponse, CatalogError> {
        let mut builder = self
            .http
            .post(format!("{}/bookings/", self.base_url))
            .json(req);
        if let Some(value) = authorization {
            builder = builder.header(reqwest::header::AUTHORIZATION, value);
        }

        let resp = builder.send().await?;
        let status = resp.status();

        if status.is_client_error() {
            let body = decode_body(status, &resp.bytes().await?);
            return Err(CatalogError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let resp = resp.error_for_status()?;
        let body = decode_body(status, &resp.bytes().await?);
        info!(
            car_id = req.car_id,
            date_from = %req.date_from,
            date_to = %req.date_to,
            "Booking forwarded to backend"
        );

        Ok(BackendResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Decode a backend response body.
///
/// No content gives `Null`. A body that is not JSON is kept as a string so
/// the caller still sees what the backend said.
fn decode_body(status: StatusCode, bytes: &[u8]) -> serde_json::Value {
    if status == StatusCode::NO_CONTENT || bytes.is_empty() {
        return serde_json::Value::Null;
    }
    match serde_json::from_slice(bytes) {
        Ok(body) => body,
        Err(e) => {
            warn!(status = status.as_u16(), "Backend returned a non-JSON body: {}", e);
            serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
