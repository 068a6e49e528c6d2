//! Best-effort publication of domain events to NATS.

use crate::domain::events::{DomainEvent, EventEnvelope};

pub const CAPACITY_SUBJECT: &str = "pharmacy.capacity.config";

/// Publishes to NATS when a client is configured; otherwise a no-op.
#[derive(Clone, Default)]
pub struct EventPublisher { nats: Option<async_nats::Client> }

impl EventPublisher {
    pub fn new(nats: Option<async_nats::Client>) -> Self { Self { nats } }
    pub fn disabled() -> Self { Self::default() }
    pub fn is_enabled(&self) -> bool { self.nats.is_some() }

    /// Failures are logged and swallowed; the write they describe has
    /// already been committed.
    pub async fn publish_all(&self, events: Vec<DomainEvent>) {
        let Some(client) = &self.nats else { return };
        for event in events {
            let envelope = EventEnvelope::wrap(event);
            let payload = match serde_json::to_vec(&envelope) {
                Ok(payload) => payload,
                Err(e) => { tracing::warn!(error = %e, "could not serialize domain event"); continue; }
            };
            if let Err(e) = client.publish(CAPACITY_SUBJECT.to_string(), payload.into()).await {
                tracing::warn!(error = %e, event_id = %envelope.id, "failed to publish domain event");
            }
        }
    }
}
