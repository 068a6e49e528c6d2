//! Capacity estimator service
//!
//! Wires the pure policy in [`crate::domain::capacity`] to its inputs: one
//! backlog read, one config read and the current UTC date. The two reads are
//! not taken under a common lock; drift of a few seconds between them is
//! irrelevant at week granularity.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::config::EstimatorConfig;
use crate::domain::capacity::{estimate_with_lead_days, EstimateError};
use crate::store::{CapacityConfigStore, OrderBacklog};
use crate::Result;

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock, UTC calendar.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate { Utc::now().date_naive() }
}

#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate { self.0 }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Estimate {
    pub date: NaiveDate,
    pub backlog: i64,
    pub weeks_shifted: i64,
    pub weekly_capacity: i64,
}

#[derive(Clone)]
pub struct CapacityEstimator {
    config: EstimatorConfig,
    backlog: Arc<dyn OrderBacklog>,
    settings: Arc<dyn CapacityConfigStore>,
    clock: Arc<dyn Clock>,
}

impl CapacityEstimator {
    pub fn new(config: EstimatorConfig, backlog: Arc<dyn OrderBacklog>, settings: Arc<dyn CapacityConfigStore>) -> Self {
        Self { config, backlog, settings, clock: Arc::new(SystemClock) }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &EstimatorConfig { &self.config }

    pub async fn estimate(&self) -> Result<Estimate> {
        let backlog = self.backlog.count_pending().await?;
        let weeks_shifted = self.settings.get_weeks_shifted().await?.value();
        let weekly_capacity = self.config.weekly_capacity;
        let today = self.clock.today();

        let date = estimate_with_lead_days(backlog, weeks_shifted, weekly_capacity, today, self.config.lead_days)
            .map_err(|e| {
                if let EstimateError::DataIntegrity(count) = e {
                    tracing::error!(backlog = count, "order store returned a negative pending count");
                }
                e
            })?;

        tracing::debug!(backlog, weeks_shifted, weekly_capacity, %today, %date, "estimated fulfillment date");
        Ok(Estimate { date, backlog, weeks_shifted, weekly_capacity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryCapacityConfigStore, InMemoryOrderBacklog};
    use crate::Error;
    use chrono::Days;

    fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2026, 10, 16).unwrap() }

    fn estimator(
        config: EstimatorConfig,
        backlog: Arc<InMemoryOrderBacklog>,
        settings: Arc<InMemoryCapacityConfigStore>,
    ) -> CapacityEstimator {
        CapacityEstimator::new(config, backlog, settings).with_clock(Arc::new(FixedClock(today())))
    }

    #[tokio::test]
    async fn test_reads_backlog_and_offset() {
        let backlog = Arc::new(InMemoryOrderBacklog::new(34));
        let settings = Arc::new(InMemoryCapacityConfigStore::with_weeks_shifted(2));
        let est = estimator(EstimatorConfig::default(), backlog, settings).estimate().await.unwrap();
        assert_eq!(est.date, today() + Days::new(31));
        assert_eq!(est.backlog, 34);
        assert_eq!(est.weeks_shifted, 2);
        assert_eq!(est.weekly_capacity, 17);
    }

    #[tokio::test]
    async fn test_sees_fresh_backlog_on_every_call() {
        let backlog = Arc::new(InMemoryOrderBacklog::new(0));
        let settings = Arc::new(InMemoryCapacityConfigStore::new());
        let svc = estimator(EstimatorConfig::default(), backlog.clone(), settings.clone());
        assert_eq!(svc.estimate().await.unwrap().date, today() + Days::new(3));
        backlog.set_pending(17);
        assert_eq!(svc.estimate().await.unwrap().date, today() + Days::new(10));
        settings.increment().await.unwrap();
        assert_eq!(svc.estimate().await.unwrap().date, today() + Days::new(17));
    }

    #[tokio::test]
    async fn test_hand_built_zero_capacity_is_rejected() {
        let config = EstimatorConfig { weekly_capacity: 0, lead_days: 3 };
        let svc = estimator(config, Arc::new(InMemoryOrderBacklog::new(5)), Arc::new(InMemoryCapacityConfigStore::new()));
        assert!(matches!(svc.estimate().await, Err(Error::Estimate(EstimateError::Configuration(0)))));
    }

    #[tokio::test]
    async fn test_negative_backlog_is_reported_not_clamped() {
        let svc = estimator(EstimatorConfig::default(), Arc::new(InMemoryOrderBacklog::new(-2)), Arc::new(InMemoryCapacityConfigStore::new()));
        assert!(matches!(svc.estimate().await, Err(Error::Estimate(EstimateError::DataIntegrity(-2)))));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let backlog = Arc::new(InMemoryOrderBacklog::new(5));
        backlog.set_unavailable(true);
        let svc = estimator(EstimatorConfig::default(), backlog, Arc::new(InMemoryCapacityConfigStore::new()));
        assert!(matches!(svc.estimate().await, Err(Error::Store(_))));
    }
}
