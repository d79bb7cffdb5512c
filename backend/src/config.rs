//! Configuration management for PreciosP
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with PRECIOSP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Defaults for the pricing calculator
    pub pricing: PricingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,

    /// Directory holding the built single-page client, served at `/`
    pub static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Insert the default measurement units on startup when the table is empty
    pub seed_units: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingConfig {
    /// Units produced per month, used to spread overhead expenses
    pub monthly_production: f64,

    /// Hours worked per month, used to derive the labor rate
    pub monthly_labor_hours: f64,

    pub default_margin_percent: f64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("PRECIOSP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        Self::load_from(&environment, None)
    }

    /// Load configuration for `environment`, reading overrides from `vars`
    /// instead of the process environment when given
    pub fn load_from(
        environment: &str,
        vars: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment)?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.url", "sqlite://preciosp.db")?
            .set_default("database.max_connections", 5)?
            .set_default("database.seed_units", true)?
            .set_default("pricing.monthly_production", shared::pricing::DEFAULT_MONTHLY_PRODUCTION)?
            .set_default("pricing.monthly_labor_hours", shared::pricing::DEFAULT_MONTHLY_LABOR_HOURS)?
            .set_default("pricing.default_margin_percent", shared::pricing::DEFAULT_MARGIN_PERCENT)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables, e.g. PRECIOSP_SERVER__PORT
            .add_source(
                Environment::with_prefix("PRECIOSP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Configuration for tests and embedded use: in-memory database, no static files
    pub fn in_memory() -> Self {
        Self {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                seed_units: true,
            },
            pricing: PricingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
            static_dir: None,
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            monthly_production: shared::pricing::DEFAULT_MONTHLY_PRODUCTION,
            monthly_labor_hours: shared::pricing::DEFAULT_MONTHLY_LABOR_HOURS,
            default_margin_percent: shared::pricing::DEFAULT_MARGIN_PERCENT,
        }
    }
}
