//! Fixed expense service

use shared::models::{Expense, ExpenseInput};
use shared::pricing::{summarize_expenses, ExpenseSummary};
use shared::validation::validate_expense_input;
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};

/// Expense service for the monthly fixed costs
#[derive(Clone)]
pub struct ExpenseService {
    db: SqlitePool,
}

fn expense_from_row(row: (i64, String, f64, String)) -> Expense {
    Expense {
        id: row.0,
        description: row.1,
        amount: row.2,
        category: row.3,
    }
}

impl ExpenseService {
    /// Create a new ExpenseService instance
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Get all expenses, newest first
    pub async fn list_expenses(&self) -> AppResult<Vec<Expense>> {
        let rows = sqlx::query_as::<_, (i64, String, f64, String)>(
            "SELECT id, description, amount, category FROM expenses ORDER BY id DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(expense_from_row).collect())
    }

    /// Get an expense by ID
    pub async fn get_expense(&self, expense_id: i64) -> AppResult<Expense> {
        let row = sqlx::query_as::<_, (i64, String, f64, String)>(
            "SELECT id, description, amount, category FROM expenses WHERE id = ?",
        )
        .bind(expense_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Expense".to_string()))?;

        Ok(expense_from_row(row))
    }

    /// Record a new expense
    pub async fn create_expense(&self, input: ExpenseInput) -> AppResult<Expense> {
        validate_expense_input(&input)?;

        let expense_id =
            sqlx::query("INSERT INTO expenses (description, amount, category) VALUES (?, ?, ?)")
                .bind(input.description.trim())
                .bind(input.amount)
                .bind(input.category_label())
                .execute(&self.db)
                .await?
                .last_insert_rowid();

        tracing::info!(expense_id, amount = input.amount, "Expense created");
        self.get_expense(expense_id).await
    }

    /// Update an expense
    pub async fn update_expense(&self, expense_id: i64, input: ExpenseInput) -> AppResult<Expense> {
        validate_expense_input(&input)?;

        let result = sqlx::query(
            "UPDATE expenses SET description = ?, amount = ?, category = ? WHERE id = ?",
        )
        .bind(input.description.trim())
        .bind(input.amount)
        .bind(input.category_label())
        .bind(expense_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Expense".to_string()));
        }

        tracing::info!(expense_id, "Expense updated");
        self.get_expense(expense_id).await
    }

    /// Delete an expense
    pub async fn delete_expense(&self, expense_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(expense_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Expense".to_string()));
        }

        tracing::info!(expense_id, "Expense deleted");
        Ok(())
    }

    /// Totals per category and the overhead and labor rates they imply
    pub async fn summary(
        &self,
        monthly_production: f64,
        monthly_labor_hours: f64,
    ) -> AppResult<ExpenseSummary> {
        let expenses = self.list_expenses().await?;
        Ok(summarize_expenses(
            &expenses,
            monthly_production,
            monthly_labor_hours,
        ))
    }
}
