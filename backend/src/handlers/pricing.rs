//! Price report handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::pricing::PricingParameters;

use crate::error::{AppError, AppResult};
use crate::services::{PricingService, ReportRequest};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PriceReportQuery {
    pub fixed_cost_per_batch: Option<f64>,
    pub packaging_cost_per_package: Option<f64>,
    pub margin_percent: Option<f64>,
    pub overhead_per_unit: Option<f64>,
    pub labor_per_hour: Option<f64>,
    pub monthly_production: Option<f64>,
    pub monthly_labor_hours: Option<f64>,
    pub format: Option<String>, // "json" or "csv"
}

/// Price breakdown for every product, as JSON or a CSV download
pub async fn get_price_report(
    State(state): State<AppState>,
    query: Result<Query<PriceReportQuery>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(query) = query?;
    let defaults = &state.config.pricing;

    let request = ReportRequest {
        parameters: PricingParameters {
            fixed_cost_per_batch: query.fixed_cost_per_batch.unwrap_or(0.0),
            packaging_cost_per_package: query.packaging_cost_per_package.unwrap_or(0.0),
            margin_percent: query
                .margin_percent
                .unwrap_or(defaults.default_margin_percent),
        },
        overhead_per_unit: query.overhead_per_unit,
        labor_per_hour: query.labor_per_hour,
        monthly_production: query
            .monthly_production
            .unwrap_or(defaults.monthly_production),
        monthly_labor_hours: query
            .monthly_labor_hours
            .unwrap_or(defaults.monthly_labor_hours),
    };

    let service = PricingService::new(state.db.clone());
    let report = service.price_report(&request).await?;

    match query.format.as_deref() {
        Some("csv") => {
            let csv = PricingService::export_to_csv(&report.products)?;
            let disposition = format!(
                "attachment; filename=\"price_report_{}.csv\"",
                report.generated_on.format("%Y-%m-%d")
            );
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response())
        }
        None | Some("json") => Ok(Json(report).into_response()),
        Some(other) => Err(AppError::Validation {
            field: "format".to_string(),
            message: format!("Unsupported report format '{}', expected json or csv", other),
        }),
    }
}
