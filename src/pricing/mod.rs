//! Rental pricing module.
//!
//! Provides the rental price calculator, the booking draft used by the
//! booking form, and the HTTP/JSON endpoints built on top of them.

pub mod calculators;
pub mod draft;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    calculate_quote, discount_percentage, rental_days, round_money, RentalQuote, SelectedService,
};
pub use draft::{BookingDraft, BookingValidationError};
pub use routes::router;
pub use services::PricingError;
