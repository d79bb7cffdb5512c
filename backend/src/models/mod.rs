//! Domain models for PreciosP
//!
//! Re-exports the shared crate's models so handlers and services share one set of types

pub use shared::models::*;
