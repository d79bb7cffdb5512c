//! Product and ingredient line models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A product built in batches from ingredient lines
///
/// `batch_cost` and `unit_cost` are derived by the cost engine and never
/// taken from client input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Items produced per batch
    pub batch_quantity: f64,
    /// Items per sale package
    pub package_quantity: f64,
    pub production_time_hours: f64,
    pub batch_cost: f64,
    pub unit_cost: f64,
}

impl Product {
    /// Items per package, treating an unset package size as a single item
    pub fn effective_package_quantity(&self) -> f64 {
        if self.package_quantity > 0.0 {
            self.package_quantity
        } else {
            1.0
        }
    }

    /// Number of packages one batch fills
    pub fn packages_per_batch(&self) -> f64 {
        if self.batch_quantity > 0.0 {
            self.batch_quantity / self.effective_package_quantity()
        } else {
            0.0
        }
    }

    /// Ingredient cost of one package
    pub fn package_cost(&self) -> f64 {
        self.unit_cost * self.effective_package_quantity()
    }
}

/// An ingredient line expanded with the ingredient and unit data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductLine {
    pub ingredient_id: i64,
    pub name: String,
    /// Quantity in the ingredient's own unit
    pub quantity: f64,
    pub base_unit_cost: f64,
    pub unit_name: String,
    pub unit_symbol: String,
    pub base_conversion_factor: f64,
    /// Contribution of this line to the batch cost
    pub line_cost: f64,
}

/// Product with its ingredient lines
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub lines: Vec<ProductLine>,
}

/// One (ingredient, quantity) pair of a product submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductLineInput {
    #[serde(alias = "id")]
    pub ingredient_id: i64,
    #[validate(range(min = 0.0, message = "Quantity cannot be negative"))]
    pub quantity: f64,
}

/// Input for creating or fully replacing a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductInput {
    #[validate(length(min = 1, message = "Product name cannot be empty"))]
    pub name: String,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Batch quantity cannot be negative"))]
    pub batch_quantity: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Package quantity cannot be negative"))]
    pub package_quantity: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Production time cannot be negative"))]
    pub production_time_hours: f64,
    #[serde(default, alias = "ingredients")]
    pub lines: Vec<ProductLineInput>,
}
