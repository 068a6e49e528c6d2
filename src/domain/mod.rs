//! Domain layer: value objects, the capacity policy, aggregates and events.
pub mod value_objects;
pub mod capacity;
pub mod aggregates;
pub mod events;

pub use capacity::{estimate, estimate_with_lead_days, EstimateError, DEFAULT_LEAD_DAYS};
