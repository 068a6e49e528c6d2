//! CapacityConfig Aggregate
//!
//! Singleton record holding the operator's manual delay. There is exactly one
//! row (id [`CapacityConfig::SINGLETON_ID`]); it is created lazily on the first
//! mutation and never deleted.

use chrono::{DateTime, Utc};
use crate::domain::value_objects::WeeksShifted;
use crate::domain::events::{DomainEvent, CapacityEvent};

#[derive(Clone, Debug)]
pub struct CapacityConfig {
    weeks_shifted: WeeksShifted,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

impl CapacityConfig {
    pub const SINGLETON_ID: i32 = 1;

    pub fn new() -> Self {
        Self { weeks_shifted: WeeksShifted::default(), updated_at: Utc::now(), events: vec![] }
    }

    pub fn restore(weeks_shifted: WeeksShifted, updated_at: DateTime<Utc>) -> Self {
        Self { weeks_shifted, updated_at, events: vec![] }
    }

    pub fn weeks_shifted(&self) -> WeeksShifted { self.weeks_shifted }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    pub fn increment(&mut self) -> WeeksShifted {
        self.weeks_shifted = self.weeks_shifted.increment();
        self.touch();
        self.raise_event(DomainEvent::Capacity(CapacityEvent::WeeksShiftedIncremented { weeks_shifted: self.weeks_shifted.value() }));
        self.weeks_shifted
    }

    pub fn reset(&mut self) {
        self.weeks_shifted = WeeksShifted::default();
        self.touch();
        self.raise_event(DomainEvent::Capacity(CapacityEvent::WeeksShiftedReset));
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
    fn touch(&mut self) { self.updated_at = Utc::now(); }
}

impl Default for CapacityConfig { fn default() -> Self { Self::new() } }
