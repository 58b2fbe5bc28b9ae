// Every remote parameter arrives as text. This is the boundary where it is
// turned into typed values; nothing past it sees raw strings.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::shared::core::errors::ApplicationError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams(HashMap<String, String>);

impl RawParams {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self(values)
    }

    /// Trimmed value, with blank treated the same as absent.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn required(&self, key: &str, label: &str) -> Result<&str, ApplicationError> {
        self.text(key)
            .ok_or_else(|| ApplicationError::validation(format!("{label} is required")))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

pub fn parse_decimal(raw: &str, label: &str) -> Result<Decimal, ApplicationError> {
    Decimal::from_str(raw.trim())
        .map_err(|_| ApplicationError::validation(format!("{label} must be a number, got '{raw}'")))
}

/// Accepts both JSON numbers and numeric strings.
pub fn coerce_decimal(value: &serde_json::Value, label: &str) -> Result<Decimal, ApplicationError> {
    match value {
        serde_json::Value::Number(number) => parse_decimal(&number.to_string(), label),
        serde_json::Value::String(text) => parse_decimal(text, label),
        serde_json::Value::Null => Err(ApplicationError::validation(format!(
            "{label} is required"
        ))),
        other => Err(ApplicationError::validation(format!(
            "{label} must be a number, got {other}"
        ))),
    }
}

pub fn parse_month(raw: &str) -> Result<u32, ApplicationError> {
    match raw.trim().parse::<u32>() {
        Ok(month) if (1..=12).contains(&month) => Ok(month),
        _ => Err(ApplicationError::validation(format!(
            "Month must be between 1 and 12, got '{raw}'"
        ))),
    }
}

pub fn parse_year(raw: &str) -> Result<i32, ApplicationError> {
    match raw.trim().parse::<i32>() {
        Ok(year) if (1..=9999).contains(&year) => Ok(year),
        _ => Err(ApplicationError::validation(format!(
            "Year must be between 1 and 9999, got '{raw}'"
        ))),
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ApplicationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        ApplicationError::validation(format!("Date must be formatted as YYYY-MM-DD, got '{raw}'"))
    })
}

/// Inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn day(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    pub fn year(year: i32) -> Result<Self, ApplicationError> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1);
        let end = NaiveDate::from_ymd_opt(year, 12, 31);
        match (start, end) {
            (Some(start), Some(end)) => Ok(Self::new(start, end)),
            _ => Err(ApplicationError::validation(format!("Year {year} is out of range"))),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    pub month: u32,
    pub year: i32,
    #[serde(skip)]
    range: DateRange,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self, ApplicationError> {
        let invalid = || ApplicationError::validation(format!("Invalid period {month}/{year}"));
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next.and_then(|date| date.pred_opt()).ok_or_else(invalid)?;
        Ok(Self {
            month,
            year,
            range: DateRange::new(start, end),
        })
    }

    pub fn containing(date: NaiveDate) -> Result<Self, ApplicationError> {
        Self::new(date.month(), date.year())
    }

    /// Missing month or year fall back to the ones of `today`, independently.
    pub fn resolve(
        month: Option<&str>,
        year: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, ApplicationError> {
        let month = month.map(parse_month).transpose()?.unwrap_or(today.month());
        let year = year.map(parse_year).transpose()?.unwrap_or(today.year());
        Self::new(month, year)
    }

    pub fn date_range(&self) -> DateRange {
        self.range
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.range.contains(date)
    }
}
