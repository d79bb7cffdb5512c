//! Pricing service: price report over every product and CSV export

use serde::Serialize;
use shared::pricing::{price_product, CostRates, PriceBreakdown, PricingParameters};
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::services::{ExpenseService, ProductService};

/// Pricing service
#[derive(Clone)]
pub struct PricingService {
    db: SqlitePool,
}

/// What a price report is computed from
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub parameters: PricingParameters,
    /// Overhead per unit; derived from expenses when absent
    pub overhead_per_unit: Option<f64>,
    /// Labor per hour; derived from expenses when absent
    pub labor_per_hour: Option<f64>,
    pub monthly_production: f64,
    pub monthly_labor_hours: f64,
}

/// Price breakdown of every product under one set of rates and parameters
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub generated_on: chrono::NaiveDate,
    pub rates: CostRates,
    pub parameters: PricingParameters,
    pub products: Vec<PriceBreakdown>,
}

impl PricingService {
    /// Create a new PricingService instance
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Rates to price with; explicit values win over the expense-derived ones
    pub async fn resolve_rates(&self, request: &ReportRequest) -> AppResult<CostRates> {
        if let (Some(overhead_per_unit), Some(labor_per_hour)) =
            (request.overhead_per_unit, request.labor_per_hour)
        {
            return Ok(CostRates {
                overhead_per_unit,
                labor_per_hour,
            });
        }

        let derived = ExpenseService::new(self.db.clone())
            .summary(request.monthly_production, request.monthly_labor_hours)
            .await?
            .rates;

        Ok(CostRates {
            overhead_per_unit: request
                .overhead_per_unit
                .unwrap_or(derived.overhead_per_unit),
            labor_per_hour: request.labor_per_hour.unwrap_or(derived.labor_per_hour),
        })
    }

    /// Price every product
    pub async fn price_report(&self, request: &ReportRequest) -> AppResult<PriceReport> {
        validate_request(request)?;

        let rates = self.resolve_rates(request).await?;
        let products = ProductService::new(self.db.clone()).list_products().await?;

        let rows = products
            .iter()
            .map(|product| price_product(product, &rates, &request.parameters))
            .collect::<Vec<_>>();

        tracing::debug!(products = rows.len(), ?rates, "Price report computed");

        Ok(PriceReport {
            generated_on: chrono::Local::now().date_naive(),
            rates,
            parameters: request.parameters,
            products: rows,
        })
    }

    /// Export data to CSV format
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}

fn validate_request(request: &ReportRequest) -> AppResult<()> {
    let checks = [
        ("fixed_cost_per_batch", request.parameters.fixed_cost_per_batch),
        (
            "packaging_cost_per_package",
            request.parameters.packaging_cost_per_package,
        ),
        ("margin_percent", request.parameters.margin_percent),
        ("monthly_production", request.monthly_production),
        ("monthly_labor_hours", request.monthly_labor_hours),
    ];
    let optional = [
        ("overhead_per_unit", request.overhead_per_unit),
        ("labor_per_hour", request.labor_per_hour),
    ];

    let values = checks
        .into_iter()
        .chain(optional.into_iter().filter_map(|(f, v)| v.map(|v| (f, v))));
    for (field, value) in values {
        if !value.is_finite() || value < 0.0 {
            return Err(AppError::Validation {
                field: field.to_string(),
                message: format!("{} must be a non-negative number", field),
            });
        }
    }
    Ok(())
}
