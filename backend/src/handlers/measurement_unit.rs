//! Measurement unit HTTP handlers

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use crate::error::AppResult;
use crate::models::MeasurementUnit;
use crate::services::{MeasurementUnitService, SeedOutcome};
use crate::AppState;

/// List all measurement units
pub async fn list_units(State(state): State<AppState>) -> AppResult<Json<Vec<MeasurementUnit>>> {
    let service = MeasurementUnitService::new(state.db.clone());
    Ok(Json(service.list_units().await?))
}

/// Get a single measurement unit
pub async fn get_unit(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<MeasurementUnit>> {
    let Path(unit_id) = path?;
    let service = MeasurementUnitService::new(state.db.clone());
    Ok(Json(service.get_unit(unit_id).await?))
}

/// Seed the default units when none exist
pub async fn seed_units(State(state): State<AppState>) -> AppResult<Json<SeedOutcome>> {
    let service = MeasurementUnitService::new(state.db.clone());
    Ok(Json(service.seed_defaults().await?))
}
