//! Domain models for PreciosP

mod expense;
mod ingredient;
mod measurement_unit;
mod product;

pub use expense::*;
pub use ingredient::*;
pub use measurement_unit::*;
pub use product::*;
