//! Domain events
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    Capacity(CapacityEvent),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CapacityEvent {
    WeeksShiftedIncremented { weeks_shifted: i64 },
    WeeksShiftedReset,
}

/// Wire form of an event, as published to the message bus.
#[derive(Clone, Debug, Serialize)]
pub struct EventEnvelope {
    pub id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub event: DomainEvent,
}

impl EventEnvelope {
    pub fn wrap(event: DomainEvent) -> Self {
        Self { id: Uuid::now_v7(), occurred_at: Utc::now(), event }
    }
}
