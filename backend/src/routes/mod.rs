//! Route definitions for PreciosP

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/measurement-units", measurement_unit_routes())
        .nest("/ingredients", ingredient_routes())
        .nest("/products", product_routes())
        .nest("/expenses", expense_routes())
        .nest("/pricing", pricing_routes())
        .fallback(handlers::api_not_found)
}

/// Measurement unit routes
fn measurement_unit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_units))
        .route("/seed", get(handlers::seed_units))
        .route("/:unit_id", get(handlers::get_unit))
}

/// Ingredient routes
fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_ingredients).post(handlers::create_ingredient),
        )
        .route(
            "/:ingredient_id",
            get(handlers::get_ingredient)
                .put(handlers::update_ingredient)
                .delete(handlers::delete_ingredient),
        )
}

/// Product routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
}

/// Fixed expense routes
fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_expenses).post(handlers::create_expense))
        .route("/summary", get(handlers::get_expense_summary))
        .route(
            "/:expense_id",
            get(handlers::get_expense)
                .put(handlers::update_expense)
                .delete(handlers::delete_expense),
        )
}

/// Pricing routes
fn pricing_routes() -> Router<AppState> {
    Router::new().route("/report", get(handlers::get_price_report))
}
