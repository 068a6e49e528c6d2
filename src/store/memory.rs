//! In-process stores

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CapacityConfigStore, ConfigChange, OrderBacklog, StoreError};
use crate::domain::aggregates::CapacityConfig;
use crate::domain::value_objects::WeeksShifted;

#[derive(Debug, Default)]
pub struct InMemoryOrderBacklog {
    pending: AtomicI64,
    unavailable: AtomicBool,
}

impl InMemoryOrderBacklog {
    pub fn new(pending: i64) -> Self {
        Self { pending: AtomicI64::new(pending), unavailable: AtomicBool::new(false) }
    }
    pub fn set_pending(&self, pending: i64) { self.pending.store(pending, Ordering::SeqCst); }
    pub fn set_unavailable(&self, unavailable: bool) { self.unavailable.store(unavailable, Ordering::SeqCst); }
}

#[async_trait]
impl OrderBacklog for InMemoryOrderBacklog {
    async fn count_pending(&self) -> Result<i64, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::BacklogUnavailable("in-memory backlog marked unavailable".into()));
        }
        Ok(self.pending.load(Ordering::SeqCst))
    }
}

/// `None` until the first mutation, like an absent database row.
#[derive(Debug, Default)]
pub struct InMemoryCapacityConfigStore {
    config: Mutex<Option<CapacityConfig>>,
    unavailable: AtomicBool,
}

impl InMemoryCapacityConfigStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_weeks_shifted(weeks_shifted: i64) -> Self {
        let config = CapacityConfig::restore(WeeksShifted::new(weeks_shifted), chrono::Utc::now());
        Self { config: Mutex::new(Some(config)), unavailable: AtomicBool::new(false) }
    }

    pub fn set_unavailable(&self, unavailable: bool) { self.unavailable.store(unavailable, Ordering::SeqCst); }

    fn with_config<T>(&self, f: impl FnOnce(&mut Option<CapacityConfig>) -> T) -> Result<T, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::ConfigUnavailable("in-memory config marked unavailable".into()));
        }
        let mut guard = self.config.lock().map_err(|_| StoreError::ConfigUnavailable("config lock poisoned".into()))?;
        Ok(f(&mut *guard))
    }
}

#[async_trait]
impl CapacityConfigStore for InMemoryCapacityConfigStore {
    async fn get_weeks_shifted(&self) -> Result<WeeksShifted, StoreError> {
        self.with_config(|slot| slot.as_ref().map(CapacityConfig::weeks_shifted).unwrap_or_default())
    }

    async fn increment(&self) -> Result<ConfigChange, StoreError> {
        self.with_config(|slot| {
            let config = slot.get_or_insert_with(CapacityConfig::new);
            let weeks_shifted = config.increment();
            ConfigChange { weeks_shifted, events: config.take_events() }
        })
    }

    async fn reset(&self) -> Result<ConfigChange, StoreError> {
        self.with_config(|slot| {
            let config = slot.get_or_insert_with(CapacityConfig::new);
            config.reset();
            ConfigChange { weeks_shifted: config.weeks_shifted(), events: config.take_events() }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::{CapacityEvent, DomainEvent};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_absent_record_reads_zero() {
        let store = InMemoryCapacityConfigStore::new();
        assert!(store.get_weeks_shifted().await.unwrap().is_zero());
    }

    #[tokio::test]
    async fn test_first_increment_creates_record() {
        let store = InMemoryCapacityConfigStore::new();
        let change = store.increment().await.unwrap();
        assert_eq!(change.weeks_shifted.value(), 1);
        assert_eq!(change.events, vec![DomainEvent::Capacity(CapacityEvent::WeeksShiftedIncremented { weeks_shifted: 1 })]);
    }

    #[tokio::test]
    async fn test_reset_then_get_returns_zero() {
        let store = InMemoryCapacityConfigStore::with_weeks_shifted(4);
        let change = store.reset().await.unwrap();
        assert!(change.weeks_shifted.is_zero());
        assert_eq!(change.events, vec![DomainEvent::Capacity(CapacityEvent::WeeksShiftedReset)]);
        assert!(store.get_weeks_shifted().await.unwrap().is_zero());
    }

    #[tokio::test]
    async fn test_reset_without_record_succeeds() {
        let store = InMemoryCapacityConfigStore::new();
        assert!(store.reset().await.unwrap().weeks_shifted.is_zero());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        let store = Arc::new(InMemoryCapacityConfigStore::new());
        store.reset().await.unwrap();
        let handles: Vec<_> = (0..64)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.increment().await.unwrap() })
            })
            .collect();
        for handle in handles { handle.await.unwrap(); }
        assert_eq!(store.get_weeks_shifted().await.unwrap().value(), 64);
    }

    #[tokio::test]
    async fn test_unavailable_stores_fail() {
        let backlog = InMemoryOrderBacklog::new(5);
        assert_eq!(backlog.count_pending().await.unwrap(), 5);
        backlog.set_unavailable(true);
        assert!(matches!(backlog.count_pending().await, Err(StoreError::BacklogUnavailable(_))));

        let config = InMemoryCapacityConfigStore::new();
        config.set_unavailable(true);
        assert!(matches!(config.increment().await, Err(StoreError::ConfigUnavailable(_))));
    }
}
