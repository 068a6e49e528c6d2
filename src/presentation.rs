//! Rendering of estimated dates for API responses.

use chrono::{NaiveDate, SecondsFormat};
use serde::Serialize;
use thiserror::Error;

/// Argentine short date convention.
const AR_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresentationError {
    #[error("cannot format date {0}")]
    Format(NaiveDate),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormattedEstimate {
    /// Midnight UTC, e.g. `2026-10-19T00:00:00.000Z`.
    pub iso: String,
    /// `dd/mm/yyyy`, e.g. `19/10/2026`.
    pub localized: String,
}

pub fn format(date: NaiveDate) -> Result<FormattedEstimate, PresentationError> {
    let midnight = date.and_hms_opt(0, 0, 0).ok_or(PresentationError::Format(date))?;
    Ok(FormattedEstimate {
        iso: midnight.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true),
        localized: date.format(AR_DATE_FORMAT).to_string(),
    })
}
