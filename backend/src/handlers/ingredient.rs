//! Ingredient HTTP handlers

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
use crate::models::{IngredientInput, IngredientWithUnit};
use crate::services::IngredientService;
use crate::AppState;

/// List all ingredients with their unit
pub async fn list_ingredients(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<IngredientWithUnit>>> {
    let service = IngredientService::new(state.db.clone());
    Ok(Json(service.list_ingredients().await?))
}

/// Get a single ingredient
pub async fn get_ingredient(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<IngredientWithUnit>> {
    let Path(ingredient_id) = path?;
    let service = IngredientService::new(state.db.clone());
    Ok(Json(service.get_ingredient(ingredient_id).await?))
}

/// Create a new ingredient
pub async fn create_ingredient(
    State(state): State<AppState>,
    payload: Result<Json<IngredientInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let service = IngredientService::new(state.db.clone());
    let ingredient = service.create_ingredient(input).await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// Update an ingredient; products using it are recalculated
pub async fn update_ingredient(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<IngredientInput>, JsonRejection>,
) -> AppResult<Json<IngredientWithUnit>> {
    let Path(ingredient_id) = path?;
    let Json(input) = payload?;
    let service = IngredientService::new(state.db.clone());
    Ok(Json(service.update_ingredient(ingredient_id, input).await?))
}

/// Delete an ingredient no product uses
pub async fn delete_ingredient(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(ingredient_id) = path?;
    let service = IngredientService::new(state.db.clone());
    service.delete_ingredient(ingredient_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
