//! Pharmacy Orders
//!
//! Order fulfillment backend for a compounding-pharmacy storefront.
//!
//! ## Features
//! - Weekly production-capacity estimator (pending backlog → delivery date)
//! - Operator offset ("semanas desplazadas") with atomic increment / reset
//! - PostgreSQL or in-memory storage
//! - Optional NATS publication of configuration changes

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod estimator;
pub mod events;
pub mod presentation;
pub mod store;

pub use config::{AppConfig, EstimatorConfig};
pub use error::Error;
pub use estimator::{CapacityEstimator, Clock, Estimate, FixedClock, SystemClock};

pub type Result<T> = std::result::Result<T, Error>;
