//! Catalog models as served by the rental backend.
//!
//! These mirror the JSON of `GET /api/cars/{id}/`. Decimal fields accept
//! both strings (`"10000.00"`) and plain numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Car from the rental catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: i64,
    pub name: String,
    pub brand: String,
    #[serde(rename = "type", default)]
    pub car_type: String,
    /// Daily rate
    pub price: Decimal,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub services: Vec<CarService>,
}

fn default_available() -> bool {
    true
}

impl Car {
    /// Ids of the services that must always be part of a booking
    pub fn required_service_ids(&self) -> Vec<i64> {
        self.services
            .iter()
            .filter(|s| s.is_required)
            .map(|s| s.id)
            .collect()
    }

    /// Look up one of this car's services
    pub fn service(&self, id: i64) -> Option<&CarService> {
        self.services.iter().find(|s| s.id == id)
    }
}

/// Add-on service attached to a car, with the car-specific price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarService {
    pub id: i64,
    pub service: ServiceInfo,
    pub price: Decimal,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub notes: String,
}

/// Generic service entry (name shared across cars)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub id: i64,
    pub name: String,
}
