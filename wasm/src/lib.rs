//! WebAssembly module for PreciosP
//!
//! Provides client-side computation for:
//! - Product cost previews while a product form is being edited
//! - Ingredient cost normalisation from a purchase
//! - Expense aggregation into overhead and labor rates
//! - Suggested sale prices for the pricing calculator

use wasm_bindgen::prelude::*;

use shared::costing::{self, CostLine};
use shared::pricing::{self, CostRates, PricingParameters};

// Re-export shared types for use in JavaScript
pub use shared::models::*;

fn to_js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

/// Cost contributed by one ingredient line
#[wasm_bindgen]
pub fn calculate_line_cost(quantity: f64, base_unit_cost: f64, base_conversion_factor: f64) -> f64 {
    CostLine::new(quantity, base_unit_cost, base_conversion_factor).cost()
}

/// Cost per produced item (0 when the batch quantity is not positive)
#[wasm_bindgen]
pub fn calculate_unit_cost(batch_cost: f64, batch_quantity: f64) -> f64 {
    costing::unit_cost(batch_cost, batch_quantity)
}

/// Cost per base unit from a purchase price and quantity
#[wasm_bindgen]
pub fn calculate_base_unit_cost(
    purchase_price: f64,
    purchase_quantity: f64,
    base_conversion_factor: f64,
) -> Option<f64> {
    costing::base_unit_cost_from_purchase(purchase_price, purchase_quantity, base_conversion_factor)
}

/// Preview batch and unit cost for a JSON array of cost lines
#[wasm_bindgen]
pub fn preview_product_costs(lines_json: &str, batch_quantity: f64) -> Result<String, JsValue> {
    preview_costs_json(lines_json, batch_quantity).map_err(to_js_error)
}

/// Summarise a JSON array of expenses into totals and rates
#[wasm_bindgen]
pub fn summarize_expenses(
    expenses_json: &str,
    monthly_production: f64,
    monthly_labor_hours: f64,
) -> Result<String, JsValue> {
    summarize_json(expenses_json, monthly_production, monthly_labor_hours).map_err(to_js_error)
}

/// Price a JSON array of products with the given rates and parameters
#[wasm_bindgen]
pub fn price_products(
    products_json: &str,
    rates_json: &str,
    params_json: &str,
) -> Result<String, JsValue> {
    price_json(products_json, rates_json, params_json).map_err(to_js_error)
}

fn preview_costs_json(lines_json: &str, batch_quantity: f64) -> Result<String, String> {
    let lines: Vec<CostLine> = serde_json::from_str(lines_json)
        .map_err(|e| format!("Invalid lines JSON: {}", e))?;
    let costs = costing::product_costs(&lines, batch_quantity);
    serde_json::to_string(&costs).map_err(|e| e.to_string())
}

fn summarize_json(
    expenses_json: &str,
    monthly_production: f64,
    monthly_labor_hours: f64,
) -> Result<String, String> {
    let expenses: Vec<Expense> = serde_json::from_str(expenses_json)
        .map_err(|e| format!("Invalid expenses JSON: {}", e))?;
    let summary = pricing::summarize_expenses(&expenses, monthly_production, monthly_labor_hours);
    serde_json::to_string(&summary).map_err(|e| e.to_string())
}

fn price_json(products_json: &str, rates_json: &str, params_json: &str) -> Result<String, String> {
    let products: Vec<Product> = serde_json::from_str(products_json)
        .map_err(|e| format!("Invalid products JSON: {}", e))?;
    let rates: CostRates = serde_json::from_str(rates_json)
        .map_err(|e| format!("Invalid rates JSON: {}", e))?;
    let params: PricingParameters = serde_json::from_str(params_json)
        .map_err(|e| format!("Invalid parameters JSON: {}", e))?;

    let breakdowns: Vec<_> = products
        .iter()
        .map(|p| pricing::price_product(p, &rates, &params))
        .collect();
    serde_json::to_string(&breakdowns).map_err(|e| e.to_string())
}
