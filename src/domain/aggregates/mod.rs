//! Aggregates module
pub mod capacity_config;

pub use capacity_config::CapacityConfig;
