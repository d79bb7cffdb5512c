//! Suggested sale price calculation
//!
//! Everything here is transient: prices are recomputed from the stored product
//! costs and the caller's parameters, never persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Expense, ExpenseCategory, Product};

/// Monthly production assumed when none is configured
pub const DEFAULT_MONTHLY_PRODUCTION: f64 = 1000.0;

/// Monthly labor hours assumed when none are configured
pub const DEFAULT_MONTHLY_LABOR_HOURS: f64 = 160.0;

/// Profit margin suggested when the caller gives none
pub const DEFAULT_MARGIN_PERCENT: f64 = 30.0;

/// Overhead and labor rates derived from fixed expenses
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostRates {
    pub overhead_per_unit: f64,
    pub labor_per_hour: f64,
}

/// User-entered pricing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingParameters {
    /// Production costs charged per batch (gas, electricity, ...)
    pub fixed_cost_per_batch: f64,
    /// Bag, label, etc. for each package
    pub packaging_cost_per_package: f64,
    pub margin_percent: f64,
}

impl Default for PricingParameters {
    fn default() -> Self {
        Self {
            fixed_cost_per_batch: 0.0,
            packaging_cost_per_package: 0.0,
            margin_percent: DEFAULT_MARGIN_PERCENT,
        }
    }
}

/// Full cost build-up and suggested price for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub product_id: i64,
    pub name: String,
    pub packages_per_batch: f64,
    pub ingredient_batch_cost: f64,
    pub fixed_cost: f64,
    pub packaging_cost: f64,
    pub overhead_cost: f64,
    pub labor_cost: f64,
    pub total_batch_cost: f64,
    pub total_unit_cost: f64,
    /// Ingredient cost of one package
    pub base_package_cost: f64,
    pub total_package_cost: f64,
    pub suggested_price: f64,
    pub profit_per_package: f64,
}

/// Price a product from its stored costs, the derived rates and the user parameters
pub fn price_product(
    product: &Product,
    rates: &CostRates,
    params: &PricingParameters,
) -> PriceBreakdown {
    let package_quantity = product.effective_package_quantity();
    let packages_per_batch = product.packages_per_batch();
    let batch_quantity = product.batch_quantity.max(0.0);

    let packaging_cost = params.packaging_cost_per_package * packages_per_batch;
    let overhead_cost = rates.overhead_per_unit * batch_quantity;
    let labor_cost = rates.labor_per_hour * product.production_time_hours;

    let total_batch_cost = product.batch_cost
        + params.fixed_cost_per_batch
        + packaging_cost
        + overhead_cost
        + labor_cost;
    let total_unit_cost = crate::costing::unit_cost(total_batch_cost, batch_quantity);
    let total_package_cost = total_unit_cost * package_quantity;
    let suggested_price = total_package_cost * (1.0 + params.margin_percent / 100.0);

    PriceBreakdown {
        product_id: product.id,
        name: product.name.clone(),
        packages_per_batch,
        ingredient_batch_cost: product.batch_cost,
        fixed_cost: params.fixed_cost_per_batch,
        packaging_cost,
        overhead_cost,
        labor_cost,
        total_batch_cost,
        total_unit_cost,
        base_package_cost: product.package_cost(),
        total_package_cost,
        suggested_price,
        profit_per_package: suggested_price - total_package_cost,
    }
}

/// Expense totals and the rates derived from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub total: f64,
    /// Totals keyed by the stored category label
    pub by_category: BTreeMap<String, f64>,
    pub monthly_production: f64,
    pub monthly_labor_hours: f64,
    pub rates: CostRates,
}

/// Aggregate expenses into overhead-per-unit and labor-per-hour rates
pub fn summarize_expenses(
    expenses: &[Expense],
    monthly_production: f64,
    monthly_labor_hours: f64,
) -> ExpenseSummary {
    let mut by_category = BTreeMap::new();
    let mut overhead = 0.0;
    let mut labor = 0.0;

    for expense in expenses {
        *by_category.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
        match ExpenseCategory::classify(&expense.category) {
            ExpenseCategory::Overhead => overhead += expense.amount,
            ExpenseCategory::Labor => labor += expense.amount,
            _ => {}
        }
    }

    let overhead_per_unit = if monthly_production > 0.0 {
        overhead / monthly_production
    } else {
        0.0
    };
    let labor_per_hour = if monthly_labor_hours > 0.0 {
        labor / monthly_labor_hours
    } else {
        0.0
    };

    ExpenseSummary {
        total: expenses.iter().map(|e| e.amount).sum(),
        by_category,
        monthly_production,
        monthly_labor_hours,
        rates: CostRates {
            overhead_per_unit,
            labor_per_hour,
        },
    }
}
