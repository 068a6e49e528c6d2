//! Storage boundary
//!
//! The estimator only sees these two traits. `postgres` backs them with sqlx;
//! `memory` keeps everything in-process for tests and database-less runs.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::events::DomainEvent;
use crate::domain::value_objects::WeeksShifted;

pub use memory::{InMemoryCapacityConfigStore, InMemoryOrderBacklog};
pub use postgres::{PgCapacityConfigStore, PgOrderBacklog};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("order backlog unavailable: {0}")]
    BacklogUnavailable(String),

    #[error("capacity config unavailable: {0}")]
    ConfigUnavailable(String),
}

/// Reads the number of orders awaiting fulfillment.
///
/// Implementations must not cache: every call reflects the latest committed
/// state. The raw count is returned unchecked so callers can detect a
/// negative value as an integrity fault rather than clamping it.
#[async_trait]
pub trait OrderBacklog: Send + Sync {
    async fn count_pending(&self) -> Result<i64, StoreError>;
}

/// Result of a mutation on the capacity config singleton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigChange {
    pub weeks_shifted: WeeksShifted,
    pub events: Vec<DomainEvent>,
}

/// Persistence for the operator's weeks-shifted offset.
#[async_trait]
pub trait CapacityConfigStore: Send + Sync {
    /// Current offset; zero when the record has never been written.
    async fn get_weeks_shifted(&self) -> Result<WeeksShifted, StoreError>;

    /// Atomically adds one week, creating the record with 1 if absent.
    async fn increment(&self) -> Result<ConfigChange, StoreError>;

    /// Sets the offset to zero, creating the record if absent.
    async fn reset(&self) -> Result<ConfigChange, StoreError>;
}
