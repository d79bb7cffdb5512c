//! Product cost recalculation
//!
//! Functions here take a connection rather than the pool so callers can run
//! them inside the transaction of the edit that made the costs stale.

use shared::costing::{self, CostLine, ProductCosts};
use sqlx::SqliteConnection;

use crate::error::AppResult;

/// Recompute and store a product's batch and unit cost
///
/// A product that does not exist is skipped and yields `None`.
pub async fn recalculate_product(
    conn: &mut SqliteConnection,
    product_id: i64,
) -> AppResult<Option<ProductCosts>> {
    let batch_quantity: Option<f64> =
        sqlx::query_scalar("SELECT batch_quantity FROM products WHERE id = ?")
            .bind(product_id)
            .fetch_optional(&mut *conn)
            .await?;

    let Some(batch_quantity) = batch_quantity else {
        tracing::debug!(product_id, "Skipping cost recalculation for missing product");
        return Ok(None);
    };

    let lines: Vec<CostLine> = sqlx::query_as::<_, (f64, f64, f64)>(
        r#"
        SELECT l.quantity, i.base_unit_cost, m.base_conversion_factor
        FROM product_ingredient_lines l
        JOIN ingredients i ON i.id = l.ingredient_id
        JOIN measurement_units m ON m.id = i.measurement_unit_id
        WHERE l.product_id = ?
        "#,
    )
    .bind(product_id)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(|(quantity, cost, factor)| CostLine::new(quantity, cost, factor))
    .collect();

    let costs = costing::product_costs(&lines, batch_quantity);

    sqlx::query("UPDATE products SET batch_cost = ?, unit_cost = ? WHERE id = ?")
        .bind(costs.batch_cost)
        .bind(costs.unit_cost)
        .bind(product_id)
        .execute(&mut *conn)
        .await?;

    Ok(Some(costs))
}

/// Ids of the products with at least one line using the ingredient
pub async fn products_using_ingredient(
    conn: &mut SqliteConnection,
    ingredient_id: i64,
) -> AppResult<Vec<i64>> {
    let ids = sqlx::query_scalar(
        "SELECT DISTINCT product_id FROM product_ingredient_lines WHERE ingredient_id = ?",
    )
    .bind(ingredient_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(ids)
}

/// Recalculate every product that uses the ingredient
///
/// Affected ids are collected up front, then recalculated one after another
/// on the same connection. Returns how many products were recalculated.
pub async fn recalculate_for_ingredient(
    conn: &mut SqliteConnection,
    ingredient_id: i64,
) -> AppResult<usize> {
    let product_ids = products_using_ingredient(conn, ingredient_id).await?;

    let mut recalculated = 0;
    for product_id in &product_ids {
        if recalculate_product(conn, *product_id).await?.is_some() {
            recalculated += 1;
        }
    }

    tracing::debug!(ingredient_id, recalculated, "Fan-out recalculation finished");
    Ok(recalculated)
}
