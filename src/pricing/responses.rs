//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::{round_money, DiscountTier, RentalQuote};

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    /// Display amount, rounded to currency granularity
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount: round_money(amount, 2),
            currency: currency.to_string(),
        }
    }
}

/// Response for a rental quote
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    pub days_count: i64,
    pub discount_percentage: u32,
    pub base_price: MoneyResponse,
    pub discount_amount: MoneyResponse,
    pub services_price: MoneyResponse,
    pub total_price: MoneyResponse,
}

impl QuoteResponse {
    pub fn from_quote(quote: &RentalQuote, currency: &str) -> Self {
        Self {
            days_count: quote.days_count,
            discount_percentage: quote.discount_percentage,
            base_price: MoneyResponse::new(quote.base_price, currency),
            discount_amount: MoneyResponse::new(quote.discount_amount, currency),
            services_price: MoneyResponse::new(quote.services_price, currency),
            total_price: MoneyResponse::new(quote.total_price, currency),
        }
    }
}

/// One row of the discount table
#[derive(Debug, Serialize)]
pub struct DiscountTierResponse {
    pub min_days: i64,
    pub percentage: u32,
}

impl From<&DiscountTier> for DiscountTierResponse {
    fn from(tier: &DiscountTier) -> Self {
        Self {
            min_days: tier.min_days,
            percentage: tier.percentage,
        }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
