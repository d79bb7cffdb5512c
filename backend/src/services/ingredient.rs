//! Ingredient service: CRUD, cost cascade on update, and the in-use delete guard

use shared::models::{Ingredient, IngredientInput, IngredientWithUnit};
use shared::validation::{resolve_base_unit_cost, validate_ingredient_input};
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::{AppError, AppResult};
use crate::services::cost_engine;

/// Ingredient service for managing raw materials and their costs
#[derive(Clone)]
pub struct IngredientService {
    db: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct IngredientRow {
    id: i64,
    name: String,
    measurement_unit_id: i64,
    base_unit_cost: f64,
    purchase_price: Option<f64>,
    purchase_quantity: Option<f64>,
    unit_name: String,
    unit_symbol: String,
    base_conversion_factor: f64,
}

impl From<IngredientRow> for IngredientWithUnit {
    fn from(row: IngredientRow) -> Self {
        Self {
            ingredient: Ingredient {
                id: row.id,
                name: row.name,
                measurement_unit_id: row.measurement_unit_id,
                base_unit_cost: row.base_unit_cost,
                purchase_price: row.purchase_price,
                purchase_quantity: row.purchase_quantity,
            },
            unit_name: row.unit_name,
            unit_symbol: row.unit_symbol,
            base_conversion_factor: row.base_conversion_factor,
        }
    }
}

const SELECT_INGREDIENT_WITH_UNIT: &str = r#"
    SELECT i.id, i.name, i.measurement_unit_id, i.base_unit_cost,
           i.purchase_price, i.purchase_quantity,
           m.name AS unit_name, m.symbol AS unit_symbol, m.base_conversion_factor
    FROM ingredients i
    JOIN measurement_units m ON m.id = i.measurement_unit_id
"#;

impl IngredientService {
    /// Create a new IngredientService instance
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Get all ingredients joined with their measurement unit
    pub async fn list_ingredients(&self) -> AppResult<Vec<IngredientWithUnit>> {
        let rows = sqlx::query_as::<_, IngredientRow>(&format!(
            "{} ORDER BY i.id",
            SELECT_INGREDIENT_WITH_UNIT
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an ingredient by ID
    pub async fn get_ingredient(&self, ingredient_id: i64) -> AppResult<IngredientWithUnit> {
        let row = sqlx::query_as::<_, IngredientRow>(&format!(
            "{} WHERE i.id = ?",
            SELECT_INGREDIENT_WITH_UNIT
        ))
        .bind(ingredient_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ingredient".to_string()))?;

        Ok(row.into())
    }

    /// Conversion factor of a measurement unit, rejecting unknown units
    async fn unit_conversion_factor(&self, unit_id: i64) -> AppResult<f64> {
        sqlx::query_scalar::<_, f64>(
            "SELECT base_conversion_factor FROM measurement_units WHERE id = ?",
        )
        .bind(unit_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::Validation {
            field: "measurement_unit_id".to_string(),
            message: format!("Measurement unit {} does not exist", unit_id),
        })
    }

    /// Validate the input and work out the cost per base unit to store
    async fn prepare(&self, input: &IngredientInput) -> AppResult<f64> {
        validate_ingredient_input(input)?;
        let factor = self.unit_conversion_factor(input.measurement_unit_id).await?;
        Ok(resolve_base_unit_cost(input, factor)?)
    }

    /// Create a new ingredient
    pub async fn create_ingredient(&self, input: IngredientInput) -> AppResult<IngredientWithUnit> {
        let base_unit_cost = self.prepare(&input).await?;

        let ingredient_id = sqlx::query(
            r#"
            INSERT INTO ingredients (name, measurement_unit_id, base_unit_cost, purchase_price, purchase_quantity)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.name.trim())
        .bind(input.measurement_unit_id)
        .bind(base_unit_cost)
        .bind(input.purchase_price)
        .bind(input.purchase_quantity)
        .execute(&self.db)
        .await?
        .last_insert_rowid();

        tracing::info!(ingredient_id, "Ingredient created");
        self.get_ingredient(ingredient_id).await
    }

    /// Update an ingredient and recalculate every product that uses it
    ///
    /// The field update and the whole fan-out commit together or not at all.
    pub async fn update_ingredient(
        &self,
        ingredient_id: i64,
        input: IngredientInput,
    ) -> AppResult<IngredientWithUnit> {
        let base_unit_cost = self.prepare(&input).await?;

        let mut tx = self.db.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE ingredients
            SET name = ?, measurement_unit_id = ?, base_unit_cost = ?,
                purchase_price = ?, purchase_quantity = ?
            WHERE id = ?
            "#,
        )
        .bind(input.name.trim())
        .bind(input.measurement_unit_id)
        .bind(base_unit_cost)
        .bind(input.purchase_price)
        .bind(input.purchase_quantity)
        .bind(ingredient_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Ingredient".to_string()));
        }

        let recalculated = cost_engine::recalculate_for_ingredient(&mut tx, ingredient_id).await?;

        tx.commit().await?;

        tracing::info!(ingredient_id, recalculated, "Ingredient updated");
        self.get_ingredient(ingredient_id).await
    }

    /// Number of distinct products with a line using the ingredient
    pub async fn count_products_using(&self, ingredient_id: i64) -> AppResult<i64> {
        let mut conn = self.db.acquire().await?;
        count_products_using(&mut conn, ingredient_id).await
    }

    /// Delete an ingredient that no product uses
    pub async fn delete_ingredient(&self, ingredient_id: i64) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // Delete first so the write lock is held before the usage count is read
        let result = sqlx::query(
            r#"
            DELETE FROM ingredients
            WHERE id = ?
              AND NOT EXISTS (SELECT 1 FROM product_ingredient_lines WHERE ingredient_id = ?)
            "#,
        )
        .bind(ingredient_id)
        .bind(ingredient_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from)
        .map_err(|e| {
            if e.is_foreign_key_violation() {
                in_use_conflict(1)
            } else {
                e
            }
        })?;

        if result.rows_affected() == 0 {
            let in_use = count_products_using(&mut tx, ingredient_id).await?;
            if in_use > 0 {
                return Err(in_use_conflict(in_use));
            }
            return Err(AppError::NotFound("Ingredient".to_string()));
        }

        tx.commit().await?;

        tracing::info!(ingredient_id, "Ingredient deleted");
        Ok(())
    }
}

async fn count_products_using(conn: &mut SqliteConnection, ingredient_id: i64) -> AppResult<i64> {
    let count = sqlx::query_scalar(
        "SELECT COUNT(DISTINCT product_id) FROM product_ingredient_lines WHERE ingredient_id = ?",
    )
    .bind(ingredient_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(count)
}

fn in_use_conflict(products: i64) -> AppError {
    AppError::Conflict {
        resource: "ingredient".to_string(),
        message: format!(
            "Cannot delete: the ingredient is used in {} product(s)",
            products
        ),
    }
}
