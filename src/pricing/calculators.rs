//! Core pricing calculation functions.
//!
//! Pure functions for rental pricing math - no network or cache access.
//! Every quote shown in the booking dialog, the booking page and the
//! preview endpoint goes through [`calculate_quote`].

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::pricing::models::CarService;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Only used when a quote is rendered; the calculation itself stays exact.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use prestige_rental::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// A rental-length threshold and the flat discount it unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountTier {
    pub min_days: i64,
    pub percentage: u32,
}

/// Discount tiers, highest threshold first. Tiers are not cumulative.
pub const DISCOUNT_TIERS: [DiscountTier; 4] = [
    DiscountTier {
        min_days: 30,
        percentage: 20,
    },
    DiscountTier {
        min_days: 14,
        percentage: 15,
    },
    DiscountTier {
        min_days: 7,
        percentage: 10,
    },
    DiscountTier {
        min_days: 3,
        percentage: 5,
    },
];

/// Largest amount accepted from callers: 12 integer digits plus cents.
pub const MAX_AMOUNT: Decimal = dec!(999999999999.99);

/// Whether `amount` is a usable price: non-negative and within [`MAX_AMOUNT`].
pub fn is_valid_amount(amount: Decimal) -> bool {
    amount >= Decimal::ZERO && amount <= MAX_AMOUNT
}

/// Number of whole rental days between two calendar dates.
///
/// Negative when `date_to` precedes `date_from`.
pub fn rental_days(date_from: NaiveDate, date_to: NaiveDate) -> i64 {
    (date_to - date_from).num_days()
}

/// Discount percentage for a rental of `days_count` days.
///
/// The first tier whose threshold is reached wins.
pub fn discount_percentage(days_count: i64) -> u32 {
    DISCOUNT_TIERS
        .iter()
        .find(|tier| days_count >= tier.min_days)
        .map(|tier| tier.percentage)
        .unwrap_or(0)
}

/// A service line taking part in a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedService {
    pub id: i64,
    pub price: Decimal,
}

/// Full price breakdown for a prospective booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalQuote {
    pub days_count: i64,
    pub discount_percentage: u32,
    pub base_price: Decimal,
    pub discount_amount: Decimal,
    pub services_price: Decimal,
    pub total_price: Decimal,
}

impl RentalQuote {
    /// Quote for a date range that does not cover a single day yet.
    pub fn empty() -> Self {
        Self {
            days_count: 0,
            discount_percentage: 0,
            base_price: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            services_price: Decimal::ZERO,
            total_price: Decimal::ZERO,
        }
    }

    /// Whether this quote carries an actual calculation.
    pub fn is_empty(&self) -> bool {
        self.days_count == 0
    }
}

impl Default for RentalQuote {
    fn default() -> Self {
        Self::empty()
    }
}

/// Calculate the price breakdown for renting a car over a date range.
///
/// Never fails: a range of zero or negative length produces
/// [`RentalQuote::empty`], and so does a result too large for `Decimal`.
/// Arithmetic is exact; round with [`round_money`] only for display.
///
/// # Arguments
/// * `price_per_day` - Daily rate of the car
/// * `date_from` - First day of the rental
/// * `date_to` - Day the car is returned
/// * `services` - Selected add-on services
pub fn calculate_quote(
    price_per_day: Decimal,
    date_from: NaiveDate,
    date_to: NaiveDate,
    services: &[SelectedService],
) -> RentalQuote {
    try_calculate_quote(price_per_day, date_from, date_to, services).unwrap_or_else(|| {
        tracing::warn!(
            price_per_day = %price_per_day,
            services = services.len(),
            "Quote overflowed, returning empty quote"
        );
        RentalQuote::empty()
    })
}

/// Same as [`calculate_quote`], but `None` when an amount overflows.
pub fn try_calculate_quote(
    price_per_day: Decimal,
    date_from: NaiveDate,
    date_to: NaiveDate,
    services: &[SelectedService],
) -> Option<RentalQuote> {
    let days_count = rental_days(date_from, date_to);
    if days_count <= 0 {
        return Some(RentalQuote::empty());
    }

    let base_price = price_per_day.checked_mul(Decimal::from(days_count))?;

    let discount_percentage = discount_percentage(days_count);
    let discount_amount = base_price
        .checked_mul(Decimal::from(discount_percentage))?
        .checked_div(Decimal::ONE_HUNDRED)?;

    let services_price = services
        .iter()
        .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(s.price))?;

    let total_price = base_price
        .checked_sub(discount_amount)?
        .checked_add(services_price)?;

    Some(RentalQuote {
        days_count,
        discount_percentage,
        base_price,
        discount_amount,
        services_price,
        total_price,
    })
}

/// Resolve selected service ids against a car's service catalog.
///
/// Ids missing from the catalog are dropped. Each catalog entry is taken at
/// most once, in catalog order. Required services are not re-checked here.
pub fn select_services(catalog: &[CarService], selected_ids: &[i64]) -> Vec<SelectedService> {
    catalog
        .iter()
        .filter(|service| selected_ids.contains(&service.id))
        .map(|service| SelectedService {
            id: service.id,
            price: service.price,
        })
        .collect()
}
