//! Pricing service functions with backend access.
//!
//! These functions resolve car catalogs through the [`CatalogClient`] and
//! hand the actual math to the pure calculators.

use rust_decimal::Decimal;

use crate::catalog::{BackendResponse, CatalogClient, CatalogError};

use super::calculators::RentalQuote;
use super::draft::{BookingDraft, BookingValidationError};
use super::requests::{BookingPreviewRequest, CreateBookingRequest};

/// Pricing and booking error types
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Car {car_id} not found")]
    CarNotFound { car_id: i64 },

    #[error("Amount {value} for {field} is out of range")]
    InvalidAmount { field: String, value: Decimal },

    #[error(transparent)]
    Validation(#[from] BookingValidationError),

    #[error("Backend rejected booking with status {status}")]
    Rejected { status: u16, body: serde_json::Value },

    #[error("Backend unavailable: {message}")]
    Upstream { message: String },
}

impl From<CatalogError> for PricingError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Rejected { status, body } => PricingError::Rejected { status, body },
            CatalogError::Http(e) => PricingError::Upstream {
                message: e.to_string(),
            },
        }
    }
}

/// Quote a booking preview for a catalog car.
///
/// The preview is advisory: availability is not checked and unknown
/// service ids are ignored. Missing or non-positive date ranges give the
/// empty quote.
pub async fn quote_for_car(
    catalog: &CatalogClient,
    req: &BookingPreviewRequest,
) -> Result<RentalQuote, PricingError> {
    let car = catalog
        .fetch_car(req.car_id)
        .await?
        .ok_or(PricingError::CarNotFound { car_id: req.car_id })?;

    let draft = BookingDraft::from_parts(car, req.date_from, req.date_to, &req.service_ids);
    let quote = draft.quote();

    tracing::debug!(
        car_id = req.car_id,
        days_count = quote.days_count,
        total_price = %quote.total_price,
        "Booking preview calculated"
    );

    Ok(quote)
}

/// Validate a booking and forward it to the backend.
///
/// Runs the submit-time checks first, so the backend only ever sees
/// bookings with a positive date range and all required services. The car
/// is read past the cache so availability is current.
pub async fn submit_booking(
    catalog: &CatalogClient,
    req: &CreateBookingRequest,
    authorization: Option<&str>,
) -> Result<(CreateBookingRequest, BackendResponse), PricingError> {
    let car = catalog
        .fetch_car_fresh(req.car_id)
        .await?
        .ok_or(PricingError::CarNotFound { car_id: req.car_id })?;

    let draft = BookingDraft::from_parts(
        car,
        Some(req.date_from),
        Some(req.date_to),
        &req.service_ids,
    );
    let booking = draft.validate_for_submission()?;

    let response = catalog.create_booking(&booking, authorization).await?;
    Ok((booking, response))
}
