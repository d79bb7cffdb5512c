//! Shared types and calculations for PreciosP
//!
//! This crate contains the models and cost/pricing math shared between the
//! backend and the browser client (via WASM).

pub mod costing;
pub mod models;
pub mod pricing;
pub mod validation;

pub use models::*;
pub use validation::*;
