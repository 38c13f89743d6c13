//! Booking draft: the state behind the booking form.
//!
//! Holds the car, the chosen dates and the selected services, and keeps
//! required services selected. Prices are recomputed from scratch on every
//! call to [`BookingDraft::quote`]; nothing is cached between edits.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;

use super::calculators::{calculate_quote, select_services, RentalQuote};
use super::models::Car;
use super::requests::CreateBookingRequest;

/// Reasons a draft cannot be submitted as a booking
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    #[error("Both rental dates must be selected")]
    MissingDates,

    #[error("End date must be after start date")]
    EndNotAfterStart {
        date_from: NaiveDate,
        date_to: NaiveDate,
    },

    #[error("Car {car_id} is not available for booking")]
    CarUnavailable { car_id: i64 },
}

impl BookingValidationError {
    /// Stable identifier for API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            BookingValidationError::MissingDates => "missing_dates",
            BookingValidationError::EndNotAfterStart { .. } => "end_not_after_start",
            BookingValidationError::CarUnavailable { .. } => "car_unavailable",
        }
    }
}

/// Booking being configured for one car
#[derive(Debug, Clone)]
pub struct BookingDraft {
    car: Arc<Car>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    selected: BTreeSet<i64>,
}

impl BookingDraft {
    /// Start a draft with every required service pre-selected
    pub fn new(car: Arc<Car>) -> Self {
        let selected = car.required_service_ids().into_iter().collect();
        Self {
            car,
            date_from: None,
            date_to: None,
            selected,
        }
    }

    /// Rebuild a draft from submitted values.
    ///
    /// Ids unknown to the car are ignored; required services are kept.
    pub fn from_parts(
        car: Arc<Car>,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        service_ids: &[i64],
    ) -> Self {
        let mut draft = Self::new(car);
        draft.date_from = date_from;
        draft.date_to = date_to;
        for &id in service_ids {
            if draft.car.service(id).is_some() {
                draft.selected.insert(id);
            }
        }
        draft
    }

    pub fn date_from(&self) -> Option<NaiveDate> {
        self.date_from
    }

    pub fn date_to(&self) -> Option<NaiveDate> {
        self.date_to
    }

    pub fn set_date_from(&mut self, date: Option<NaiveDate>) {
        self.date_from = date;
    }

    pub fn set_date_to(&mut self, date: Option<NaiveDate>) {
        self.date_to = date;
    }

    pub fn set_dates(&mut self, date_from: NaiveDate, date_to: NaiveDate) {
        self.date_from = Some(date_from);
        self.date_to = Some(date_to);
    }

    /// Flip an optional service in or out of the selection.
    ///
    /// Returns `false` when nothing changed: the service is required or
    /// does not belong to this car.
    pub fn toggle_service(&mut self, service_id: i64) -> bool {
        match self.car.service(service_id) {
            Some(service) if service.is_required => false,
            Some(_) => {
                if !self.selected.remove(&service_id) {
                    self.selected.insert(service_id);
                }
                true
            }
            None => false,
        }
    }

    pub fn is_selected(&self, service_id: i64) -> bool {
        self.selected.contains(&service_id)
    }

    /// Selected service ids in ascending order
    pub fn selected_service_ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    /// Live price preview. Missing dates give the empty quote.
    pub fn quote(&self) -> RentalQuote {
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => {
                let services = select_services(&self.car.services, &self.selected_service_ids());
                calculate_quote(self.car.price, from, to, &services)
            }
            _ => RentalQuote::empty(),
        }
    }

    /// Check the draft before it is sent to the backend.
    pub fn validate_for_submission(&self) -> Result<CreateBookingRequest, BookingValidationError> {
        let (date_from, date_to) = match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(BookingValidationError::MissingDates),
        };

        if date_to <= date_from {
            return Err(BookingValidationError::EndNotAfterStart { date_from, date_to });
        }

        if !self.car.is_available {
            return Err(BookingValidationError::CarUnavailable {
                car_id: self.car.id,
            });
        }

        Ok(CreateBookingRequest {
            car_id: self.car.id,
            date_from,
            date_to,
            service_ids: self.selected_service_ids(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{CarService, ServiceInfo};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service(id: i64, price: Decimal, is_required: bool) -> CarService {
        CarService {
            id,
            service: ServiceInfo {
                id,
                name: format!("service-{}", id),
            },
            price,
            is_required,
            notes: String::new(),
        }
    }

    fn car() -> Arc<Car> {
        Arc::new(Car {
            id: 11,
            name: "Cayenne".to_string(),
            brand: "Porsche".to_string(),
            car_type: "suv".to_string(),
            price: dec!(10000),
            is_available: true,
            services: vec![
                service(1, dec!(2000), true),
                service(2, dec!(500), false),
                service(3, dec!(1500), false),
            ],
        })
    }

    #[test]
    fn test_new_draft_preselects_required_services() {
        let draft = BookingDraft::new(car());

        assert_eq!(draft.selected_service_ids(), vec![1]);
        assert!(draft.date_from().is_none());
    }

    #[test]
    fn test_required_service_cannot_be_removed() {
        let mut draft = BookingDraft::new(car());

        assert!(!draft.toggle_service(1));
        assert!(draft.is_selected(1));
    }

    #[test]
    fn test_optional_service_toggles() {
        let mut draft = BookingDraft::new(car());

        assert!(draft.toggle_service(2));
        assert!(draft.is_selected(2));
        assert!(draft.toggle_service(2));
        assert!(!draft.is_selected(2));
    }

    #[test]
    fn test_unknown_service_is_ignored() {
        let mut draft = BookingDraft::new(car());

        assert!(!draft.toggle_service(99));
        assert_eq!(draft.selected_service_ids(), vec![1]);
    }

    #[test]
    fn test_quote_without_dates_is_empty() {
        let mut draft = BookingDraft::new(car());
        assert!(draft.quote().is_empty());

        draft.set_date_from(Some(date(2024, 1, 1)));
        assert!(draft.quote().is_empty());
    }

    #[test]
    fn test_quote_follows_edits() {
        let mut draft = BookingDraft::new(car());
        draft.set_dates(date(2024, 1, 1), date(2024, 1, 4));

        let quote = draft.quote();
        assert_eq!(quote.days_count, 3);
        assert_eq!(quote.services_price, dec!(2000));
        assert_eq!(quote.total_price, dec!(30500)); // 30000 - 1500 + 2000

        draft.toggle_service(3);
        assert_eq!(draft.quote().total_price, dec!(32000));

        draft.set_date_to(Some(date(2024, 1, 8)));
        let quote = draft.quote();
        assert_eq!(quote.discount_percentage, 10);
        assert_eq!(quote.total_price, dec!(66500)); // 70000 - 7000 + 3500
    }

    #[test]
    fn test_from_parts_keeps_required_and_drops_unknown() {
        let draft = BookingDraft::from_parts(
            car(),
            Some(date(2024, 1, 1)),
            Some(date(2024, 1, 2)),
            &[3, 42],
        );

        assert_eq!(draft.selected_service_ids(), vec![1, 3]);
    }

    #[test]
    fn test_submission_requires_dates() {
        let draft = BookingDraft::new(car());
        assert_eq!(
            draft.validate_for_submission(),
            Err(BookingValidationError::MissingDates)
        );
    }

    #[test]
    fn test_submission_rejects_end_not_after_start() {
        let mut draft = BookingDraft::new(car());
        draft.set_dates(date(2024, 1, 5), date(2024, 1, 5));

        let err = draft.validate_for_submission().unwrap_err();
        assert_eq!(err.code(), "end_not_after_start");
        assert_eq!(err.to_string(), "End date must be after start date");

        // Live preview stays silent for the same input
        assert!(draft.quote().is_empty());
    }

    #[test]
    fn test_submission_rejects_unavailable_car() {
        let mut unavailable = (*car()).clone();
        unavailable.is_available = false;
        let mut draft = BookingDraft::new(Arc::new(unavailable));
        draft.set_dates(date(2024, 1, 1), date(2024, 1, 3));

        assert_eq!(
            draft.validate_for_submission(),
            Err(BookingValidationError::CarUnavailable { car_id: 11 })
        );
    }

    #[test]
    fn test_submission_builds_booking_payload() {
        let mut draft = BookingDraft::new(car());
        draft.set_dates(date(2024, 2, 1), date(2024, 2, 15));
        draft.toggle_service(2);

        let req = draft.validate_for_submission().unwrap();
        assert_eq!(
            req,
            CreateBookingRequest {
                car_id: 11,
                date_from: date(2024, 2, 1),
                date_to: date(2024, 2, 15),
                service_ids: vec![1, 2],
            }
        );
    }
}
