//! Ingredient models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A raw material priced per base unit of its measurement unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub measurement_unit_id: i64,
    /// Cost of one base unit (e.g. per gram)
    pub base_unit_cost: f64,
    /// Price paid for the last purchase, if recorded
    pub purchase_price: Option<f64>,
    /// Quantity bought for `purchase_price`, in the ingredient's own unit
    pub purchase_quantity: Option<f64>,
}

/// Ingredient joined with its measurement unit for listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientWithUnit {
    #[serde(flatten)]
    pub ingredient: Ingredient,
    pub unit_name: String,
    pub unit_symbol: String,
    pub base_conversion_factor: f64,
}

impl IngredientWithUnit {
    /// Cost of one unit of the ingredient's own measure (e.g. per kilogram)
    pub fn cost_per_unit(&self) -> f64 {
        self.ingredient.base_unit_cost * self.base_conversion_factor
    }
}

/// Input for creating or updating an ingredient
///
/// Either `base_unit_cost` or both purchase fields must be present.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IngredientInput {
    #[validate(length(min = 1, message = "Ingredient name cannot be empty"))]
    pub name: String,
    #[serde(alias = "unit_id")]
    pub measurement_unit_id: i64,
    #[validate(range(min = 0.0, message = "Base unit cost cannot be negative"))]
    pub base_unit_cost: Option<f64>,
    #[validate(range(min = 0.0, message = "Purchase price cannot be negative"))]
    pub purchase_price: Option<f64>,
    #[validate(range(min = 0.0, message = "Purchase quantity cannot be negative"))]
    pub purchase_quantity: Option<f64>,
}
