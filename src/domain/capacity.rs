//! Weekly production-capacity policy
//!
//! Maps the pending-order backlog onto a fulfillment date:
//!
//! ```text
//! weeks  = floor(backlog / weekly_capacity) + max(weeks_shifted, 0)
//! result = today + weeks * 7 days + lead_days
//! ```
//!
//! All arithmetic is on calendar dates (UTC), so the result does not depend
//! on the host timezone.

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::domain::value_objects::{BacklogCount, WeeklyCapacity, WeeksShifted};

/// Minimum preparation time, even with an empty backlog.
pub const DEFAULT_LEAD_DAYS: u32 = 3;

const DAYS_PER_WEEK: u64 = 7;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimateError {
    #[error("weekly capacity must be positive, got {0}")]
    Configuration(i64),

    #[error("order store reported a negative backlog: {0}")]
    DataIntegrity(i64),

    #[error("estimated date overflows the calendar ({weeks} weeks from {today})")]
    OutOfRange { today: NaiveDate, weeks: u64 },
}

/// Estimate with the standard 3-day lead time.
pub fn estimate(
    backlog_count: i64,
    weeks_shifted: i64,
    weekly_capacity: i64,
    today: NaiveDate,
) -> Result<NaiveDate, EstimateError> {
    estimate_with_lead_days(backlog_count, weeks_shifted, weekly_capacity, today, DEFAULT_LEAD_DAYS)
}

pub fn estimate_with_lead_days(
    backlog_count: i64,
    weeks_shifted: i64,
    weekly_capacity: i64,
    today: NaiveDate,
    lead_days: u32,
) -> Result<NaiveDate, EstimateError> {
    let capacity = WeeklyCapacity::new(weekly_capacity)
        .map_err(|_| EstimateError::Configuration(weekly_capacity))?;
    let backlog = BacklogCount::new(backlog_count)
        .ok_or(EstimateError::DataIntegrity(backlog_count))?;
    project(backlog, WeeksShifted::new(weeks_shifted), capacity, today, lead_days)
}

/// Typed core of [`estimate`]; inputs are already validated.
pub fn project(
    backlog: BacklogCount,
    weeks_shifted: WeeksShifted,
    capacity: WeeklyCapacity,
    today: NaiveDate,
    lead_days: u32,
) -> Result<NaiveDate, EstimateError> {
    let weeks_needed = backlog.value() / capacity.value();
    let weeks = weeks_needed.saturating_add(weeks_shifted.effective());
    let out_of_range = || EstimateError::OutOfRange { today, weeks };

    let days = weeks
        .checked_mul(DAYS_PER_WEEK)
        .and_then(|d| d.checked_add(u64::from(lead_days)))
        .ok_or_else(out_of_range)?;
    today.checked_add_days(Days::new(days)).ok_or_else(out_of_range)
}
