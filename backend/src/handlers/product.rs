//! Product HTTP handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::AppResult;
use crate::models::{Product, ProductDetail, ProductInput};
use crate::services::ProductService;
use crate::AppState;

/// List all products
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db.clone());
    Ok(Json(service.list_products().await?))
}

/// Get a product with its ingredient lines
pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<ProductDetail>> {
    let Path(product_id) = path?;
    let service = ProductService::new(state.db.clone());
    Ok(Json(service.get_product(product_id).await?))
}

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let service = ProductService::new(state.db.clone());
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product and its lines
pub async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> AppResult<Json<ProductDetail>> {
    let Path(product_id) = path?;
    let Json(input) = payload?;
    let service = ProductService::new(state.db.clone());
    Ok(Json(service.update_product(product_id, input).await?))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(product_id) = path?;
    let service = ProductService::new(state.db.clone());
    service.delete_product(product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
