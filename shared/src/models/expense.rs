//! Fixed expense models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A fixed monthly cost
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub category: String,
}

/// Categories the pricing calculator knows how to aggregate
///
/// Stored categories are free text; anything unrecognised counts as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Overhead,
    Labor,
    Marketing,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Overhead => "Overhead",
            ExpenseCategory::Labor => "Labor",
            ExpenseCategory::Marketing => "Marketing",
            ExpenseCategory::Other => "Other",
        }
    }

    /// Classify a stored category label, case-insensitively
    pub fn classify(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "overhead" => ExpenseCategory::Overhead,
            "labor" | "labour" | "mano de obra" => ExpenseCategory::Labor,
            "marketing" => ExpenseCategory::Marketing,
            _ => ExpenseCategory::Other,
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for creating or updating an expense
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExpenseInput {
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Amount cannot be negative"))]
    pub amount: f64,
    pub category: Option<String>,
}

impl ExpenseInput {
    /// Category to store; blank or missing becomes `Other`
    pub fn category_label(&self) -> String {
        match self.category.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => ExpenseCategory::Other.to_string(),
        }
    }
}
