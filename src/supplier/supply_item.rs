use crate::form::FieldError;
use serde::{Deserialize, Serialize};

pub const INVALID_PRICE: &str = "min";

/// A supply provided by a supplier, in a given packaging, at a unit price.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SupplyItem {
    pub supply_id: u64,
    pub packaging_id: u64,
    pub unit_price: f64,
}

impl SupplyItem {
    pub fn new(supply_id: u64, packaging_id: u64, unit_price: f64) -> Self {
        SupplyItem {
            supply_id,
            packaging_id,
            unit_price,
        }
    }

    pub fn validate(&self) -> Option<FieldError> {
        if self.unit_price.is_finite() && self.unit_price > 0.0 {
            None
        } else {
            Some(FieldError::new(
                INVALID_PRICE,
                "El precio unitario debe ser mayor a cero",
            ))
        }
    }
}
