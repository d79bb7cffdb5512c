//! Measurement unit service

use serde::Serialize;
use shared::models::{MeasurementUnit, DEFAULT_UNITS};
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};

/// Measurement unit service for the seeded reference data
#[derive(Clone)]
pub struct MeasurementUnitService {
    db: SqlitePool,
}

/// Result of a seeding request
#[derive(Debug, Clone, Serialize)]
pub struct SeedOutcome {
    /// Units inserted by this request; 0 when the table was already populated
    pub inserted: usize,
    pub units: Vec<MeasurementUnit>,
}

fn unit_from_row(row: (i64, String, String, f64)) -> MeasurementUnit {
    MeasurementUnit {
        id: row.0,
        name: row.1,
        symbol: row.2,
        base_conversion_factor: row.3,
    }
}

impl MeasurementUnitService {
    /// Create a new MeasurementUnitService instance
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Get all measurement units
    pub async fn list_units(&self) -> AppResult<Vec<MeasurementUnit>> {
        let rows = sqlx::query_as::<_, (i64, String, String, f64)>(
            "SELECT id, name, symbol, base_conversion_factor FROM measurement_units ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(unit_from_row).collect())
    }

    /// Get a measurement unit by ID
    pub async fn get_unit(&self, unit_id: i64) -> AppResult<MeasurementUnit> {
        let row = sqlx::query_as::<_, (i64, String, String, f64)>(
            "SELECT id, name, symbol, base_conversion_factor FROM measurement_units WHERE id = ?",
        )
        .bind(unit_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Measurement unit".to_string()))?;

        Ok(unit_from_row(row))
    }

    /// Insert the default units if the table is empty
    pub async fn seed_defaults(&self) -> AppResult<SeedOutcome> {
        let mut tx = self.db.begin().await?;

        let mut inserted = 0;
        for unit in DEFAULT_UNITS {
            // The first insert only lands on an empty table
            let sql = if inserted == 0 {
                r#"
                INSERT INTO measurement_units (name, symbol, base_conversion_factor)
                SELECT ?, ?, ? WHERE NOT EXISTS (SELECT 1 FROM measurement_units)
                "#
            } else {
                "INSERT INTO measurement_units (name, symbol, base_conversion_factor) VALUES (?, ?, ?)"
            };

            let result = sqlx::query(sql)
                .bind(unit.name)
                .bind(unit.symbol)
                .bind(unit.base_conversion_factor)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                tracing::debug!("Measurement units already present, skipping seed");
                break;
            }
            inserted += 1;
        }

        if inserted > 0 {
            tracing::info!(inserted, "Seeded default measurement units");
        }

        tx.commit().await?;

        Ok(SeedOutcome {
            inserted,
            units: self.list_units().await?,
        })
    }
}
