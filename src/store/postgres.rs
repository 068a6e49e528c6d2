//! PostgreSQL stores
//!
//! Each operation is a single statement, so read-committed isolation is
//! enough: the backlog count sees the latest committed orders and the
//! increment is an atomic upsert, never a read-modify-write.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{CapacityConfigStore, ConfigChange, OrderBacklog, StoreError};
use crate::domain::aggregates::CapacityConfig;
use crate::domain::events::{CapacityEvent, DomainEvent};
use crate::domain::value_objects::{OrderStatus, WeeksShifted};

#[derive(Clone)]
pub struct PgOrderBacklog { db: PgPool }

impl PgOrderBacklog {
    pub fn new(db: PgPool) -> Self { Self { db } }
}

#[async_trait]
impl OrderBacklog for PgOrderBacklog {
    async fn count_pending(&self) -> Result<i64, StoreError> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE status = $1")
            .bind(OrderStatus::Pending.as_str())
            .fetch_one(&self.db).await
            .map_err(|e| StoreError::BacklogUnavailable(e.to_string()))?;
        Ok(total.0)
    }
}

#[derive(Clone)]
pub struct PgCapacityConfigStore { db: PgPool }

impl PgCapacityConfigStore {
    pub fn new(db: PgPool) -> Self { Self { db } }

    async fn upsert(&self, sql: &str) -> Result<WeeksShifted, StoreError> {
        let row: (i64,) = sqlx::query_as(sql)
            .bind(CapacityConfig::SINGLETON_ID)
            .fetch_one(&self.db).await
            .map_err(|e| StoreError::ConfigUnavailable(e.to_string()))?;
        Ok(WeeksShifted::new(row.0))
    }
}

#[async_trait]
impl CapacityConfigStore for PgCapacityConfigStore {
    async fn get_weeks_shifted(&self) -> Result<WeeksShifted, StoreError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT weeks_shifted FROM capacity_config WHERE id = $1")
            .bind(CapacityConfig::SINGLETON_ID)
            .fetch_optional(&self.db).await
            .map_err(|e| StoreError::ConfigUnavailable(e.to_string()))?;
        Ok(row.map(|r| WeeksShifted::new(r.0)).unwrap_or_default())
    }

    async fn increment(&self) -> Result<ConfigChange, StoreError> {
        let weeks_shifted = self.upsert(
            "INSERT INTO capacity_config (id, weeks_shifted, updated_at) VALUES ($1, 1, NOW()) \
             ON CONFLICT (id) DO UPDATE SET weeks_shifted = capacity_config.weeks_shifted + 1, updated_at = NOW() \
             RETURNING weeks_shifted",
        ).await?;
        let event = CapacityEvent::WeeksShiftedIncremented { weeks_shifted: weeks_shifted.value() };
        Ok(ConfigChange { weeks_shifted, events: vec![DomainEvent::Capacity(event)] })
    }

    async fn reset(&self) -> Result<ConfigChange, StoreError> {
        let weeks_shifted = self.upsert(
            "INSERT INTO capacity_config (id, weeks_shifted, updated_at) VALUES ($1, 0, NOW()) \
             ON CONFLICT (id) DO UPDATE SET weeks_shifted = 0, updated_at = NOW() \
             RETURNING weeks_shifted",
        ).await?;
        Ok(ConfigChange { weeks_shifted, events: vec![DomainEvent::Capacity(CapacityEvent::WeeksShiftedReset)] })
    }
}
