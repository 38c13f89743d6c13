//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            AppError::Pricing(PricingError::CarNotFound { car_id }) => (
                StatusCode::NOT_FOUND,
                "car_not_found",
                format!("Car {} not found", car_id),
                None,
            ),
            AppError::Pricing(e @ PricingError::InvalidAmount { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_amount", e.to_string(), None)
            }
            AppError::Pricing(PricingError::Validation(e)) => {
                (StatusCode::BAD_REQUEST, e.code(), e.to_string(), None)
            }
            AppError::Pricing(PricingError::Rejected { status, body }) => {
                tracing::info!("Backend rejected booking: {} {}", status, body);
                (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST),
                    "backend_rejected",
                    "Booking rejected by backend".to_string(),
                    Some(body),
                )
            }
            AppError::Pricing(PricingError::Upstream { message }) => {
                tracing::error!("Upstream error: {}", message);
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream_error",
                    "Rental backend unavailable".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal error".to_string(),
                    None,
                )
            }
        };

        let body = PricingErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::BookingValidationError;

    #[test]
    fn test_status_codes() {
        let cases = vec![
            (
                AppError::from(PricingError::CarNotFound { car_id: 1 }),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(PricingError::InvalidAmount {
                    field: "price_per_day".to_string(),
                    value: rust_decimal::Decimal::MAX,
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(PricingError::Validation(BookingValidationError::MissingDates)),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(PricingError::Rejected {
                    status: 409,
                    body: serde_json::Value::Null,
                }),
                StatusCode::CONFLICT,
            ),
            (
                AppError::from(PricingError::Upstream {
                    message: "timeout".to_string(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
