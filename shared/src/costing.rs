//! Product cost calculations
//!
//! The same formulas back the server's cost engine and the browser preview,
//! so a product shows the same cost before and after it is saved.

use serde::{Deserialize, Serialize};

use crate::models::ProductLine;

/// The inputs of one ingredient line that determine its cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    /// Quantity in the ingredient's own unit
    pub quantity: f64,
    pub base_unit_cost: f64,
    pub base_conversion_factor: f64,
}

impl CostLine {
    pub fn new(quantity: f64, base_unit_cost: f64, base_conversion_factor: f64) -> Self {
        Self {
            quantity,
            base_unit_cost,
            base_conversion_factor,
        }
    }

    /// quantity * conversion factor * cost per base unit
    pub fn cost(&self) -> f64 {
        self.quantity * self.base_conversion_factor * self.base_unit_cost
    }
}

impl From<&ProductLine> for CostLine {
    fn from(line: &ProductLine) -> Self {
        Self::new(line.quantity, line.base_unit_cost, line.base_conversion_factor)
    }
}

/// Derived costs stored on a product row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductCosts {
    pub batch_cost: f64,
    pub unit_cost: f64,
}

/// Total ingredient cost of one batch; zero for an empty line set
pub fn batch_cost(lines: &[CostLine]) -> f64 {
    lines.iter().map(CostLine::cost).sum()
}

/// Cost of a single produced item, or 0 when the batch quantity is not positive
pub fn unit_cost(batch_cost: f64, batch_quantity: f64) -> f64 {
    if batch_quantity > 0.0 {
        batch_cost / batch_quantity
    } else {
        0.0
    }
}

/// Batch and unit cost for a product's line set
pub fn product_costs(lines: &[CostLine], batch_quantity: f64) -> ProductCosts {
    let batch_cost = batch_cost(lines);
    ProductCosts {
        batch_cost,
        unit_cost: unit_cost(batch_cost, batch_quantity),
    }
}

/// Normalise a purchase (price paid for a quantity in the ingredient's unit)
/// to a cost per base unit
pub fn base_unit_cost_from_purchase(
    purchase_price: f64,
    purchase_quantity: f64,
    base_conversion_factor: f64,
) -> Option<f64> {
    if purchase_quantity <= 0.0 || base_conversion_factor <= 0.0 {
        return None;
    }
    Some(purchase_price / purchase_quantity / base_conversion_factor)
}
