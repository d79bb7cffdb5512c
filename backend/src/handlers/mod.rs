//! HTTP request handlers

pub mod expense;
pub mod health;
pub mod ingredient;
pub mod measurement_unit;
pub mod pricing;
pub mod product;

pub use expense::*;
pub use health::*;
pub use ingredient::*;
pub use measurement_unit::*;
pub use pricing::*;
pub use product::*;

use crate::error::AppError;

/// Fallback for unknown `/api` paths
pub async fn api_not_found() -> AppError {
    AppError::NotFound("Endpoint".to_string())
}
