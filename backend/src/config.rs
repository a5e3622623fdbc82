//! Configuration management for the Stock Analytics Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides of the form `SA__SECTION__KEY`

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::PurchasePolicy;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Warehouse database configuration
    pub database: DatabaseConfig,

    /// Assumptions behind purchase suggestions
    pub purchasing: PurchasePolicy,

    /// Analytics data selection
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// Upload category holding stock analytics exports
    pub category: String,

    /// Most versions offered in the version selector
    pub version_limit: i64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("SA_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let policy = PurchasePolicy::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("purchasing.unit_cost", policy.unit_cost.to_string())?
            .set_default("purchasing.default_supplier", policy.default_supplier.clone())?
            .set_default(
                "purchasing.target_coverage_months",
                i64::from(policy.target_coverage_months),
            )?
            .set_default("purchasing.rounding_lot", policy.rounding_lot.to_string())?
            .set_default("analytics.category", "ANALYTICS")?
            .set_default("analytics.version_limit", 20)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables, e.g. SA__SERVER__PORT
            .add_source(
                Environment::with_prefix("SA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config
            .purchasing
            .validate()
            .map_err(|e| ConfigError::Message(format!("purchasing: {}", e)))?;
        Ok(config)
    }
}
