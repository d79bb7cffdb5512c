//! Shared fixtures for the integration tests
//!
//! Every test gets its own in-memory database with migrations applied and the
//! default units seeded: 1 Grams, 2 Kilograms, 3 Milliliters, 4 Liters, 5 Units.

#![allow(dead_code)]

use preciosp_backend::models::{IngredientInput, ProductInput, ProductLineInput};
use preciosp_backend::services::{IngredientService, ProductService};
use preciosp_backend::{build_state, AppState, Config};

pub const GRAMS: i64 = 1;
pub const KILOGRAMS: i64 = 2;
pub const LITERS: i64 = 4;
pub const UNITS: i64 = 5;

pub async fn test_state() -> AppState {
    build_state(Config::in_memory())
        .await
        .expect("in-memory database should open")
}

pub fn ingredient_input(name: &str, unit_id: i64, base_unit_cost: f64) -> IngredientInput {
    IngredientInput {
        name: name.to_string(),
        measurement_unit_id: unit_id,
        base_unit_cost: Some(base_unit_cost),
        purchase_price: None,
        purchase_quantity: None,
    }
}

pub fn product_input(name: &str, batch_quantity: f64, lines: &[(i64, f64)]) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        batch_quantity,
        package_quantity: 1.0,
        production_time_hours: 1.0,
        lines: lines
            .iter()
            .map(|&(ingredient_id, quantity)| ProductLineInput {
                ingredient_id,
                quantity,
            })
            .collect(),
    }
}

/// Create an ingredient and return its id
pub async fn add_ingredient(state: &AppState, name: &str, unit_id: i64, cost: f64) -> i64 {
    IngredientService::new(state.db.clone())
        .create_ingredient(ingredient_input(name, unit_id, cost))
        .await
        .expect("ingredient should be created")
        .ingredient
        .id
}

/// Create a product and return its id
pub async fn add_product(
    state: &AppState,
    name: &str,
    batch_quantity: f64,
    lines: &[(i64, f64)],
) -> i64 {
    ProductService::new(state.db.clone())
        .create_product(product_input(name, batch_quantity, lines))
        .await
        .expect("product should be created")
        .product
        .id
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
