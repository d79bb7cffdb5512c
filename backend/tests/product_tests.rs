//! Product management tests
//!
//! Tests for products including:
//! - Update leaves exactly the submitted line set
//! - At least one line is required
//! - Lines must point at existing ingredients, with nothing written otherwise
//! - Deleting a product removes its lines

mod common;

use common::*;
use preciosp_backend::services::ProductService;
use preciosp_backend::AppError;

async fn line_count(state: &preciosp_backend::AppState) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM product_ingredient_lines")
        .fetch_one(&state.db)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_update_replaces_line_set() {
    let state = test_state().await;
    let service = ProductService::new(state.db.clone());
    let flour = add_ingredient(&state, "Flour", GRAMS, 0.002).await;
    let sugar = add_ingredient(&state, "Sugar", GRAMS, 0.004).await;
    let eggs = add_ingredient(&state, "Eggs", UNITS, 0.25).await;

    let product_id = add_product(&state, "Cake", 8.0, &[(flour, 500.0), (sugar, 200.0)]).await;

    let updated = service
        .update_product(
            product_id,
            product_input("Sponge Cake", 10.0, &[(sugar, 300.0), (eggs, 4.0)]),
        )
        .await
        .unwrap();

    let lines: Vec<(i64, f64)> = updated
        .lines
        .iter()
        .map(|l| (l.ingredient_id, l.quantity))
        .collect();
    assert_eq!(lines, vec![(sugar, 300.0), (eggs, 4.0)]);
    assert_eq!(updated.product.name, "Sponge Cake");
    assert!(approx_eq(updated.product.batch_cost, 1.2 + 1.0));
    assert!(approx_eq(updated.product.unit_cost, 0.22));
    assert_eq!(line_count(&state).await, 2);
}

#[tokio::test]
async fn test_lines_required() {
    let state = test_state().await;
    let service = ProductService::new(state.db.clone());

    let err = service
        .create_product(product_input("Air", 1.0, &[]))
        .await
        .unwrap_err();
    match err {
        AppError::Validation { field, .. } => assert_eq!(field, "lines"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_negative_quantity_names_line() {
    let state = test_state().await;
    let service = ProductService::new(state.db.clone());
    let flour = add_ingredient(&state, "Flour", GRAMS, 0.002).await;

    let err = service
        .create_product(product_input("Bread", 1.0, &[(flour, 10.0), (flour, -1.0)]))
        .await
        .unwrap_err();
    match err {
        AppError::Validation { field, .. } => assert_eq!(field, "lines[1].quantity"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_ingredient_writes_nothing() {
    let state = test_state().await;
    let service = ProductService::new(state.db.clone());
    let flour = add_ingredient(&state, "Flour", GRAMS, 0.002).await;

    let err = service
        .create_product(product_input("Bread", 10.0, &[(flour, 100.0), (404, 1.0)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    assert!(service.list_products().await.unwrap().is_empty());
    assert_eq!(line_count(&state).await, 0);
}

#[tokio::test]
async fn test_failed_update_keeps_previous_state() {
    let state = test_state().await;
    let service = ProductService::new(state.db.clone());
    let flour = add_ingredient(&state, "Flour", GRAMS, 0.002).await;
    let product_id = add_product(&state, "Bread", 10.0, &[(flour, 1000.0)]).await;
    let before = service.get_product(product_id).await.unwrap();

    let err = service
        .update_product(product_id, product_input("Renamed", 20.0, &[(404, 1.0)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    assert_eq!(service.get_product(product_id).await.unwrap(), before);
}

#[tokio::test]
async fn test_update_missing_product() {
    let state = test_state().await;
    let service = ProductService::new(state.db.clone());
    let flour = add_ingredient(&state, "Flour", GRAMS, 0.002).await;

    let err = service
        .update_product(31, product_input("Ghost", 1.0, &[(flour, 1.0)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_cascades_lines() {
    let state = test_state().await;
    let service = ProductService::new(state.db.clone());
    let flour = add_ingredient(&state, "Flour", GRAMS, 0.002).await;
    let product_id = add_product(&state, "Bread", 10.0, &[(flour, 1000.0)]).await;
    assert_eq!(line_count(&state).await, 1);

    service.delete_product(product_id).await.unwrap();

    assert_eq!(line_count(&state).await, 0);
    assert!(matches!(
        service.get_product(product_id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.delete_product(product_id).await,
        Err(AppError::NotFound(_))
    ));
}
