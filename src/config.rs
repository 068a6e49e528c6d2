//! Service configuration
//!
//! Everything is read once at startup and passed down explicitly. Lookups go
//! through a closure so tests can supply a map instead of touching the
//! process environment.

use serde::Serialize;
use thiserror::Error;
use validator::Validate;

use crate::domain::capacity::DEFAULT_LEAD_DAYS;
use crate::domain::value_objects::WeeklyCapacity;

pub const DEFAULT_PORT: u16 = 8083;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} must be an integer, got {value:?}")]
    NotAnInteger { key: &'static str, value: String },

    #[error("invalid estimator configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Inputs of the capacity estimator.
#[derive(Clone, Debug, Serialize, Validate)]
pub struct EstimatorConfig {
    #[validate(range(min = 1))]
    pub weekly_capacity: i64,
    pub lead_days: u32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self { weekly_capacity: WeeklyCapacity::DEFAULT as i64, lead_days: DEFAULT_LEAD_DAYS }
    }
}

impl EstimatorConfig {
    pub fn with_weekly_capacity(weekly_capacity: i64) -> Result<Self, ConfigError> {
        let config = Self { weekly_capacity, ..Self::default() };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub nats_url: Option<String>,
    pub port: u16,
    pub estimator: EstimatorConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let weekly_capacity = parse_or(var("WEEKLY_CAPACITY"), "WEEKLY_CAPACITY", WeeklyCapacity::DEFAULT as i64)?;
        Ok(Self {
            database_url: var("DATABASE_URL"),
            max_connections: parse_or(var("DATABASE_MAX_CONNECTIONS"), "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            nats_url: var("NATS_URL"),
            port: parse_or(var("PORT"), "PORT", DEFAULT_PORT)?,
            estimator: EstimatorConfig::with_weekly_capacity(weekly_capacity)?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::NotAnInteger { key, value }),
    }
}
