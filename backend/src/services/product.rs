//! Product service
//!
//! Create and update run the row write, the line replacement and the cost
//! recalculation in one transaction.

use shared::costing::CostLine;
use shared::models::{Product, ProductDetail, ProductInput, ProductLine, ProductLineInput};
use shared::validation::validate_product_input;
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::{AppError, AppResult};
use crate::services::cost_engine;

/// Product service for recipes and their derived costs
#[derive(Clone)]
pub struct ProductService {
    db: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    batch_quantity: f64,
    package_quantity: f64,
    production_time_hours: f64,
    batch_cost: f64,
    unit_cost: f64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            batch_quantity: row.batch_quantity,
            package_quantity: row.package_quantity,
            production_time_hours: row.production_time_hours,
            batch_cost: row.batch_cost,
            unit_cost: row.unit_cost,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LineRow {
    ingredient_id: i64,
    name: String,
    quantity: f64,
    base_unit_cost: f64,
    unit_name: String,
    unit_symbol: String,
    base_conversion_factor: f64,
}

impl From<LineRow> for ProductLine {
    fn from(row: LineRow) -> Self {
        let mut line = Self {
            ingredient_id: row.ingredient_id,
            name: row.name,
            quantity: row.quantity,
            base_unit_cost: row.base_unit_cost,
            unit_name: row.unit_name,
            unit_symbol: row.unit_symbol,
            base_conversion_factor: row.base_conversion_factor,
            line_cost: 0.0,
        };
        line.line_cost = CostLine::from(&line).cost();
        line
    }
}

const SELECT_PRODUCT: &str = r#"
    SELECT id, name, batch_quantity, package_quantity, production_time_hours, batch_cost, unit_cost
    FROM products
"#;

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Get all products without their lines
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!("{} ORDER BY id", SELECT_PRODUCT))
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a product with its ingredient lines expanded
    pub async fn get_product(&self, product_id: i64) -> AppResult<ProductDetail> {
        let product: Product =
            sqlx::query_as::<_, ProductRow>(&format!("{} WHERE id = ?", SELECT_PRODUCT))
                .bind(product_id)
                .fetch_optional(&self.db)
                .await?
                .ok_or_else(|| AppError::NotFound("Product".to_string()))?
                .into();

        let lines = sqlx::query_as::<_, LineRow>(
            r#"
            SELECT l.ingredient_id, i.name, l.quantity, i.base_unit_cost,
                   m.name AS unit_name, m.symbol AS unit_symbol, m.base_conversion_factor
            FROM product_ingredient_lines l
            JOIN ingredients i ON i.id = l.ingredient_id
            JOIN measurement_units m ON m.id = i.measurement_unit_id
            WHERE l.product_id = ?
            ORDER BY l.id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

        Ok(ProductDetail { product, lines })
    }

    /// Create a product with its lines and computed costs
    pub async fn create_product(&self, input: ProductInput) -> AppResult<ProductDetail> {
        validate_product_input(&input)?;

        let mut tx = self.db.begin().await?;

        // Write first so the transaction holds the write lock before it reads
        let product_id = sqlx::query(
            r#"
            INSERT INTO products (name, batch_quantity, package_quantity, production_time_hours)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(input.name.trim())
        .bind(input.batch_quantity)
        .bind(input.package_quantity)
        .bind(input.production_time_hours)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        ensure_ingredients_exist(&mut tx, &input.lines).await?;
        replace_lines(&mut tx, product_id, &input.lines)
            .await
            .map_err(line_write_error)?;
        let costs = cost_engine::recalculate_product(&mut tx, product_id).await?;

        tx.commit().await?;

        tracing::info!(product_id, lines = input.lines.len(), ?costs, "Product created");
        self.get_product(product_id).await
    }

    /// Replace a product's fields and lines, then recompute its costs
    pub async fn update_product(
        &self,
        product_id: i64,
        input: ProductInput,
    ) -> AppResult<ProductDetail> {
        validate_product_input(&input)?;

        let mut tx = self.db.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?, batch_quantity = ?, package_quantity = ?, production_time_hours = ?
            WHERE id = ?
            "#,
        )
        .bind(input.name.trim())
        .bind(input.batch_quantity)
        .bind(input.package_quantity)
        .bind(input.production_time_hours)
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        ensure_ingredients_exist(&mut tx, &input.lines).await?;
        replace_lines(&mut tx, product_id, &input.lines)
            .await
            .map_err(line_write_error)?;
        let costs = cost_engine::recalculate_product(&mut tx, product_id).await?;

        tx.commit().await?;

        tracing::info!(product_id, lines = input.lines.len(), ?costs, "Product updated");
        self.get_product(product_id).await
    }

    /// Delete a product; its lines go with it
    pub async fn delete_product(&self, product_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        tracing::info!(product_id, "Product deleted");
        Ok(())
    }
}

/// Reject lines that point at ingredients which do not exist
async fn ensure_ingredients_exist(
    conn: &mut SqliteConnection,
    lines: &[ProductLineInput],
) -> AppResult<()> {
    for (i, line) in lines.iter().enumerate() {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM ingredients WHERE id = ?")
            .bind(line.ingredient_id)
            .fetch_optional(&mut *conn)
            .await?;

        if exists.is_none() {
            return Err(AppError::Validation {
                field: format!("lines[{}].ingredient_id", i),
                message: format!("Ingredient {} does not exist", line.ingredient_id),
            });
        }
    }
    Ok(())
}

/// Delete every line of the product and insert the given set
pub(crate) async fn replace_lines(
    conn: &mut SqliteConnection,
    product_id: i64,
    lines: &[ProductLineInput],
) -> AppResult<()> {
    sqlx::query("DELETE FROM product_ingredient_lines WHERE product_id = ?")
        .bind(product_id)
        .execute(&mut *conn)
        .await?;

    for line in lines {
        sqlx::query(
            "INSERT INTO product_ingredient_lines (product_id, ingredient_id, quantity) VALUES (?, ?, ?)",
        )
        .bind(product_id)
        .bind(line.ingredient_id)
        .bind(line.quantity)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// An ingredient deleted between the existence check and the insert
fn line_write_error(err: AppError) -> AppError {
    if err.is_foreign_key_violation() {
        AppError::Validation {
            field: "lines".to_string(),
            message: "An ingredient in the product no longer exists".to_string(),
        }
    } else {
        err
    }
}
