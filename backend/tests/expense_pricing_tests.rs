//! Expense and pricing tests
//!
//! Tests for fixed expenses and the price report including:
//! - Default category and newest-first listing
//! - Overhead and labor rates derived from expenses
//! - Price report with derived and explicit rates

mod common;

use common::*;
use preciosp_backend::models::ExpenseInput;
use preciosp_backend::services::{ExpenseService, PricingService, ReportRequest};
use preciosp_backend::AppError;
use shared::pricing::PricingParameters;

fn expense(description: &str, amount: f64, category: Option<&str>) -> ExpenseInput {
    ExpenseInput {
        description: description.to_string(),
        amount,
        category: category.map(str::to_string),
    }
}

fn report_request(parameters: PricingParameters) -> ReportRequest {
    ReportRequest {
        parameters,
        overhead_per_unit: None,
        labor_per_hour: None,
        monthly_production: 1000.0,
        monthly_labor_hours: 160.0,
    }
}

// ============================================================================
// Expenses
// ============================================================================

#[tokio::test]
async fn test_missing_category_stored_as_other() {
    let state = test_state().await;
    let service = ExpenseService::new(state.db.clone());

    let created = service
        .create_expense(expense("Insurance", 40.0, None))
        .await
        .unwrap();
    assert_eq!(created.category, "Other");

    let blank = service
        .create_expense(expense("Cleaning", 15.0, Some("  ")))
        .await
        .unwrap();
    assert_eq!(blank.category, "Other");
}

#[tokio::test]
async fn test_expenses_listed_newest_first() {
    let state = test_state().await;
    let service = ExpenseService::new(state.db.clone());
    service.create_expense(expense("Rent", 500.0, Some("Overhead"))).await.unwrap();
    service.create_expense(expense("Ads", 80.0, Some("Marketing"))).await.unwrap();

    let listed: Vec<String> = service
        .list_expenses()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.description)
        .collect();
    assert_eq!(listed, vec!["Ads", "Rent"]);
}

#[tokio::test]
async fn test_update_and_delete_expense() {
    let state = test_state().await;
    let service = ExpenseService::new(state.db.clone());
    let rent = service.create_expense(expense("Rent", 500.0, Some("Overhead"))).await.unwrap();

    let updated = service
        .update_expense(rent.id, expense("Rent", 550.0, Some("Overhead")))
        .await
        .unwrap();
    assert_eq!(updated.amount, 550.0);

    service.delete_expense(rent.id).await.unwrap();
    assert!(matches!(
        service.delete_expense(rent.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.update_expense(rent.id, expense("Rent", 1.0, None)).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_negative_amount_rejected() {
    let state = test_state().await;
    let service = ExpenseService::new(state.db.clone());

    let err = service
        .create_expense(expense("Refund", -5.0, None))
        .await
        .unwrap_err();
    match err {
        AppError::Validation { field, .. } => assert_eq!(field, "amount"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_summary_rates() {
    let state = test_state().await;
    let service = ExpenseService::new(state.db.clone());
    service.create_expense(expense("Rent", 500.0, Some("Overhead"))).await.unwrap();
    service.create_expense(expense("Power", 100.0, Some("overhead"))).await.unwrap();
    service.create_expense(expense("Baker", 1600.0, Some("Mano de Obra"))).await.unwrap();
    service.create_expense(expense("Ads", 80.0, Some("Marketing"))).await.unwrap();

    let summary = service.summary(1000.0, 160.0).await.unwrap();
    assert!(approx_eq(summary.total, 2280.0));
    assert!(approx_eq(summary.rates.overhead_per_unit, 0.6));
    assert!(approx_eq(summary.rates.labor_per_hour, 10.0));
    assert_eq!(summary.by_category.get("Marketing"), Some(&80.0));

    let no_hours = service.summary(1000.0, 0.0).await.unwrap();
    assert_eq!(no_hours.rates.labor_per_hour, 0.0);
}

// ============================================================================
// Price report
// ============================================================================

#[tokio::test]
async fn test_report_uses_expense_rates() {
    let state = test_state().await;
    let expenses = ExpenseService::new(state.db.clone());
    expenses.create_expense(expense("Rent", 100.0, Some("Overhead"))).await.unwrap();
    expenses.create_expense(expense("Baker", 1600.0, Some("Labor"))).await.unwrap();

    let flour = add_ingredient(&state, "Flour", GRAMS, 0.05).await;
    // batch cost 50, 100 items, 1 hour
    add_product(&state, "Bread", 100.0, &[(flour, 1000.0)]).await;

    let report = PricingService::new(state.db.clone())
        .price_report(&report_request(PricingParameters {
            fixed_cost_per_batch: 5.0,
            packaging_cost_per_package: 0.0,
            margin_percent: 30.0,
        }))
        .await
        .unwrap();

    assert!(approx_eq(report.rates.overhead_per_unit, 0.1));
    assert!(approx_eq(report.rates.labor_per_hour, 10.0));
    assert_eq!(report.products.len(), 1);

    let row = &report.products[0];
    // 50 + 5 fixed + 10 overhead + 10 labor
    assert!(approx_eq(row.total_batch_cost, 75.0));
    assert!(approx_eq(row.total_package_cost, 0.75));
    assert!(approx_eq(row.suggested_price, 0.975));
    assert!(approx_eq(row.profit_per_package, 0.225));
}

#[tokio::test]
async fn test_explicit_rates_override_expenses() {
    let state = test_state().await;
    ExpenseService::new(state.db.clone())
        .create_expense(expense("Rent", 100000.0, Some("Overhead")))
        .await
        .unwrap();

    let flour = add_ingredient(&state, "Flour", GRAMS, 0.05).await;
    add_product(&state, "Bread", 100.0, &[(flour, 1000.0)]).await;

    let mut request = report_request(PricingParameters::default());
    request.overhead_per_unit = Some(0.0);
    request.labor_per_hour = Some(0.0);

    let report = PricingService::new(state.db.clone())
        .price_report(&request)
        .await
        .unwrap();
    let row = &report.products[0];
    assert!(approx_eq(row.total_batch_cost, 50.0));
    assert!(approx_eq(row.suggested_price, 0.65));
}

#[tokio::test]
async fn test_report_csv_has_row_per_product() {
    let state = test_state().await;
    let flour = add_ingredient(&state, "Flour", GRAMS, 0.002).await;
    add_product(&state, "Bread", 10.0, &[(flour, 1000.0)]).await;
    add_product(&state, "Rolls", 20.0, &[(flour, 800.0)]).await;

    let report = PricingService::new(state.db.clone())
        .price_report(&report_request(PricingParameters::default()))
        .await
        .unwrap();
    let csv = PricingService::export_to_csv(&report.products).unwrap();

    let mut lines = csv.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("product_id,name,"));
    assert!(header.contains("suggested_price"));
    assert_eq!(lines.count(), 2);
}
