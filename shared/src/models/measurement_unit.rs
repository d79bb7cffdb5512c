//! Measurement unit models

use serde::{Deserialize, Serialize};

/// A unit of measure with its conversion to the base unit of its dimension
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasurementUnit {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    /// How many base units one of this unit equals (kilogram -> 1000)
    pub base_conversion_factor: f64,
}

/// Seed definition for a measurement unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSeed {
    pub name: &'static str,
    pub symbol: &'static str,
    pub base_conversion_factor: f64,
}

/// Units inserted when the measurement unit table is empty
pub const DEFAULT_UNITS: &[UnitSeed] = &[
    UnitSeed {
        name: "Grams",
        symbol: "G",
        base_conversion_factor: 1.0,
    },
    UnitSeed {
        name: "Kilograms",
        symbol: "Kg",
        base_conversion_factor: 1000.0,
    },
    UnitSeed {
        name: "Milliliters",
        symbol: "Ml",
        base_conversion_factor: 1.0,
    },
    UnitSeed {
        name: "Liters",
        symbol: "L",
        base_conversion_factor: 1000.0,
    },
    UnitSeed {
        name: "Units",
        symbol: "U",
        base_conversion_factor: 1.0,
    },
];
