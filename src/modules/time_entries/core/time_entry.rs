use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::core::errors::ApplicationError;

pub const MAX_HOURS_PER_ENTRY: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub name: String,
    pub project: String,
    pub hours: Decimal,
    pub log_date: NaiveDate,
    pub logged_by: String,
    pub description: String,
    pub cancelled: bool,
    pub created_at: DateTime<Utc>,
}

/// A time entry that has passed validation but has no identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimeEntry {
    pub project: String,
    pub hours: Decimal,
    pub log_date: NaiveDate,
    pub logged_by: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Hours of a single entry must lie in (0, 24].
pub fn check_hours(hours: Decimal) -> Result<Decimal, ApplicationError> {
    if hours <= Decimal::ZERO {
        return Err(ApplicationError::validation("Hours must be greater than 0"));
    }
    if hours > MAX_HOURS_PER_ENTRY {
        return Err(ApplicationError::validation("Hours cannot exceed 24 in a day"));
    }
    Ok(hours)
}
