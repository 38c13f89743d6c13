//! HTTP handlers for pricing and booking endpoints.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::AppState;

use super::calculators::{calculate_quote, SelectedService, DISCOUNT_TIERS};
use super::requests::{BookingPreviewRequest, CreateBookingRequest, QuoteRequest};
use super::responses::{DiscountTierResponse, QuoteResponse};
use super::services;

/// Pricing routes, mounted under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pricing/discount-tiers", get(discount_tiers))
        .route("/pricing/quote", post(quote))
        .route("/bookings/preview", post(preview))
        .route("/bookings", post(create_booking))
}

/// Discount table, highest threshold first
async fn discount_tiers() -> Json<Vec<DiscountTierResponse>> {
    Json(DISCOUNT_TIERS.iter().map(DiscountTierResponse::from).collect())
}

/// Quote with the daily rate and services supplied by the caller
async fn quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    req.validate()?;

    let services: Vec<SelectedService> = req
        .services
        .iter()
        .map(|s| SelectedService {
            id: s.id,
            price: s.price,
        })
        .collect();

    let quote = calculate_quote(req.price_per_day, req.date_from, req.date_to, &services);
    Ok(Json(QuoteResponse::from_quote(&quote, &state.config.currency)))
}

/// Live preview for a catalog car
async fn preview(
    State(state): State<AppState>,
    Json(req): Json<BookingPreviewRequest>,
) -> Result<Json<QuoteResponse>> {
    let quote = services::quote_for_car(&state.catalog, &req).await?;
    Ok(Json(QuoteResponse::from_quote(&quote, &state.config.currency)))
}

/// Validate a booking and forward it to the backend
async fn create_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let (_, response) = services::submit_booking(&state.catalog, &req, authorization).await?;

    let status = StatusCode::from_u16(response.status)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok((status, Json(response.body)))
}
