//! Business logic services for PreciosP

pub mod cost_engine;
pub mod expense;
pub mod ingredient;
pub mod measurement_unit;
pub mod pricing;
pub mod product;

pub use expense::ExpenseService;
pub use ingredient::IngredientService;
pub use measurement_unit::{MeasurementUnitService, SeedOutcome};
pub use pricing::{PriceReport, PricingService, ReportRequest};
pub use product::ProductService;
