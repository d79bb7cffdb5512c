//! Expense HTTP handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::pricing::ExpenseSummary;

use crate::error::AppResult;
use crate::models::{Expense, ExpenseInput};
use crate::services::ExpenseService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub monthly_production: Option<f64>,
    pub monthly_labor_hours: Option<f64>,
}

/// List all expenses, newest first
pub async fn list_expenses(State(state): State<AppState>) -> AppResult<Json<Vec<Expense>>> {
    let service = ExpenseService::new(state.db.clone());
    Ok(Json(service.list_expenses().await?))
}

/// Get a single expense
pub async fn get_expense(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Expense>> {
    let Path(expense_id) = path?;
    let service = ExpenseService::new(state.db.clone());
    Ok(Json(service.get_expense(expense_id).await?))
}

/// Record an expense
pub async fn create_expense(
    State(state): State<AppState>,
    payload: Result<Json<ExpenseInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let service = ExpenseService::new(state.db.clone());
    let expense = service.create_expense(input).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// Update an expense
pub async fn update_expense(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ExpenseInput>, JsonRejection>,
) -> AppResult<Json<Expense>> {
    let Path(expense_id) = path?;
    let Json(input) = payload?;
    let service = ExpenseService::new(state.db.clone());
    Ok(Json(service.update_expense(expense_id, input).await?))
}

/// Delete an expense
pub async fn delete_expense(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(expense_id) = path?;
    let service = ExpenseService::new(state.db.clone());
    service.delete_expense(expense_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Expense totals and derived overhead and labor rates
pub async fn get_expense_summary(
    State(state): State<AppState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> AppResult<Json<ExpenseSummary>> {
    let Query(query) = query?;
    let pricing = &state.config.pricing;
    let service = ExpenseService::new(state.db.clone());

    let summary = service
        .summary(
            query.monthly_production.unwrap_or(pricing.monthly_production),
            query.monthly_labor_hours.unwrap_or(pricing.monthly_labor_hours),
        )
        .await?;
    Ok(Json(summary))
}
