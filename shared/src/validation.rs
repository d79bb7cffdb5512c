//! Input validation for PreciosP
//!
//! Field-level rules are declared with `validator` on the input structs; the
//! functions here add the cross-field rules and report the first failure.

use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::costing::base_unit_cost_from_purchase;
use crate::models::{ExpenseInput, IngredientInput, ProductInput};

/// A rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct InputError {
    pub field: String,
    pub message: String,
}

impl InputError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ValidationErrors> for InputError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.keys().copied().collect();
        fields.sort_unstable();

        match fields.first() {
            Some(field) => {
                let message = field_errors[field]
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                InputError::new(*field, message)
            }
            None => InputError::new("input", "Invalid input"),
        }
    }
}

fn require_name(field: &str, value: &str, message: &str) -> Result<(), InputError> {
    if value.trim().is_empty() {
        return Err(InputError::new(field, message));
    }
    Ok(())
}

fn require_finite(field: &str, value: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::new(field, format!("{} must be a finite number", field)));
    }
    Ok(())
}

/// Validate an ingredient submission
pub fn validate_ingredient_input(input: &IngredientInput) -> Result<(), InputError> {
    input.validate()?;
    require_name("name", &input.name, "Ingredient name cannot be empty")?;

    if input.base_unit_cost.is_none()
        && (input.purchase_price.is_none() || input.purchase_quantity.is_none())
    {
        return Err(InputError::new(
            "base_unit_cost",
            "Provide base_unit_cost or both purchase_price and purchase_quantity",
        ));
    }
    Ok(())
}

/// Cost per base unit for an ingredient submission
///
/// An explicit `base_unit_cost` wins; otherwise it is derived from the
/// purchase fields and the unit's conversion factor.
pub fn resolve_base_unit_cost(
    input: &IngredientInput,
    base_conversion_factor: f64,
) -> Result<f64, InputError> {
    if let Some(cost) = input.base_unit_cost {
        require_finite("base_unit_cost", cost)?;
        return Ok(cost);
    }

    match (input.purchase_price, input.purchase_quantity) {
        (Some(price), Some(quantity)) => {
            base_unit_cost_from_purchase(price, quantity, base_conversion_factor).ok_or_else(|| {
                InputError::new("purchase_quantity", "Purchase quantity must be greater than zero")
            })
        }
        _ => Err(InputError::new(
            "base_unit_cost",
            "Provide base_unit_cost or both purchase_price and purchase_quantity",
        )),
    }
}

/// Validate a product submission; at least one ingredient line is required
pub fn validate_product_input(input: &ProductInput) -> Result<(), InputError> {
    input.validate()?;
    require_name("name", &input.name, "Product name cannot be empty")?;
    require_finite("batch_quantity", input.batch_quantity)?;
    require_finite("package_quantity", input.package_quantity)?;
    require_finite("production_time_hours", input.production_time_hours)?;

    if input.lines.is_empty() {
        return Err(InputError::new("lines", "At least one ingredient is required"));
    }

    for (i, line) in input.lines.iter().enumerate() {
        line.validate().map_err(|e| {
            let inner = InputError::from(e);
            InputError::new(format!("lines[{}].{}", i, inner.field), inner.message)
        })?;
        require_finite("quantity", line.quantity)
            .map_err(|e| InputError::new(format!("lines[{}].quantity", i), e.message))?;
    }
    Ok(())
}

/// Validate an expense submission
pub fn validate_expense_input(input: &ExpenseInput) -> Result<(), InputError> {
    input.validate()?;
    require_name("description", &input.description, "Description is required")?;
    require_finite("amount", input.amount)
}
