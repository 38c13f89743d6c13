//! Request DTOs for pricing and booking API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculators::is_valid_amount;
use super::services::PricingError;

/// Request to quote a rental with an inline service list
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_day: Decimal,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    #[serde(default)]
    pub services: Vec<ServiceLineRequest>,
}

impl QuoteRequest {
    /// Reject negative amounts and amounts beyond the currency bound
    pub fn validate(&self) -> Result<(), PricingError> {
        if !is_valid_amount(self.price_per_day) {
            return Err(PricingError::InvalidAmount {
                field: "price_per_day".to_string(),
                value: self.price_per_day,
            });
        }
        for (i, service) in self.services.iter().enumerate() {
            if !is_valid_amount(service.price) {
                return Err(PricingError::InvalidAmount {
                    field: format!("services[{}].price", i),
                    value: service.price,
                });
            }
        }
        Ok(())
    }
}

/// A selected service in a [`QuoteRequest`]
#[derive(Debug, Deserialize)]
pub struct ServiceLineRequest {
    pub id: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

/// Request to preview a booking of a catalog car.
///
/// Dates may still be missing while the user is filling in the form.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingPreviewRequest {
    pub car_id: i64,
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub service_ids: Vec<i64>,
}

/// Booking payload accepted by the backend's booking-creation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub car_id: i64,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    #[serde(default)]
    pub service_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_request_parses_string_decimals() {
        let req: QuoteRequest = serde_json::from_str(
            r#"{
                "price_per_day": "10000.00",
                "date_from": "2024-01-01",
                "date_to": "2024-01-31",
                "services": [{"id": 1, "price": "5000"}]
            }"#,
        )
        .unwrap();

        assert_eq!(req.price_per_day, dec!(10000));
        assert_eq!(req.date_to, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(req.services[0].price, dec!(5000));
    }

    fn quote_request(price_per_day: &str, service_price: &str) -> QuoteRequest {
        serde_json::from_value(serde_json::json!({
            "price_per_day": price_per_day,
            "date_from": "2024-01-01",
            "date_to": "2024-01-31",
            "services": [{"id": 1, "price": service_price}]
        }))
        .unwrap()
    }

    #[test]
    fn test_quote_request_accepts_amounts_up_to_bound() {
        assert!(quote_request("999999999999.99", "999999999999.99").validate().is_ok());
        assert!(quote_request("0", "0").validate().is_ok());
    }

    #[test]
    fn test_quote_request_rejects_oversized_rate() {
        let err = quote_request("2000000000000000000000000000", "5000")
            .validate()
            .unwrap_err();

        match err {
            PricingError::InvalidAmount { field, .. } => assert_eq!(field, "price_per_day"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_quote_request_rejects_bad_service_price() {
        for price in ["1000000000000", "-1"] {
            let err = quote_request("10000", price).validate().unwrap_err();
            match err {
                PricingError::InvalidAmount { field, .. } => {
                    assert_eq!(field, "services[0].price")
                }
                other => panic!("unexpected error: {}", other),
            }
        }
    }

    #[test]
    fn test_preview_request_allows_missing_dates() {
        let req: BookingPreviewRequest = serde_json::from_str(r#"{"car_id": 3}"#).unwrap();

        assert_eq!(req.car_id, 3);
        assert!(req.date_from.is_none());
        assert!(req.date_to.is_none());
        assert!(req.service_ids.is_empty());
    }

    #[test]
    fn test_create_booking_serializes_iso_dates() {
        let req = CreateBookingRequest {
            car_id: 5,
            date_from: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            date_to: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            service_ids: vec![1, 2],
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["date_from"], "2024-03-01");
        assert_eq!(json["date_to"], "2024-03-04");
        assert_eq!(json["service_ids"], serde_json::json!([1, 2]));
    }
}
