//! Value Objects for order fulfillment

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of orders the workshop can fulfill in a 7-day period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyCapacity(u64);

impl WeeklyCapacity {
    pub const DEFAULT: u64 = 17;

    pub fn new(value: i64) -> Result<Self, CapacityError> {
        if value <= 0 { return Err(CapacityError::NonPositive(value)); }
        Ok(Self(value as u64))
    }
    pub fn value(&self) -> u64 { self.0 }
}

impl Default for WeeklyCapacity { fn default() -> Self { Self(Self::DEFAULT) } }

impl fmt::Display for WeeklyCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum CapacityError { NonPositive(i64) }
impl std::error::Error for CapacityError {}
impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::NonPositive(v) => write!(f, "weekly capacity must be positive, got {v}") }
    }
}

/// Count of orders awaiting fulfillment. Never negative once constructed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BacklogCount(u64);

impl BacklogCount {
    /// Rejects negative counts coming back from the order store.
    pub fn new(value: i64) -> Option<Self> { u64::try_from(value).ok().map(Self) }
    pub fn value(&self) -> u64 { self.0 }
}

/// Operator-applied delay, in whole weeks. Stored signed; only the
/// non-negative part ever moves an estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeeksShifted(i64);

impl WeeksShifted {
    pub fn new(value: i64) -> Self { Self(value) }
    pub fn value(&self) -> i64 { self.0 }
    pub fn effective(&self) -> u64 { self.0.max(0) as u64 }
    pub fn increment(&self) -> Self { Self(self.0.saturating_add(1)) }
    pub fn is_zero(&self) -> bool { self.0 == 0 }
}

/// Order lifecycle states as persisted in `orders.status`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus { #[default] Pending, Confirmed, Shipped, Delivered, Cancelled }

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Orders in this state count toward the production backlog.
    pub fn awaits_fulfillment(&self) -> bool { matches!(self, Self::Pending) }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}
