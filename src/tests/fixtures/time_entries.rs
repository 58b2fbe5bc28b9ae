// Shared builders for time logs. Defaults come from
// ./src/tests/fixtures/json/time_entry.json.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::fs;

use crate::modules::time_entries::core::time_entry::{NewTimeEntry, TimeEntry};

const TIME_ENTRY_JSON: &str = "./src/tests/fixtures/json/time_entry.json";

fn fixture_time_entry() -> TimeEntry {
    let json_str = fs::read_to_string(TIME_ENTRY_JSON).unwrap();
    serde_json::from_str(&json_str).unwrap()
}

pub struct TimeEntryBuilder {
    inner: TimeEntry,
}

impl Default for TimeEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TimeEntryBuilder {
    pub fn new() -> Self {
        Self {
            inner: fixture_time_entry(),
        }
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.inner.name = v.into();
        self
    }

    pub fn project(mut self, v: impl Into<String>) -> Self {
        self.inner.project = v.into();
        self
    }

    pub fn hours(mut self, v: Decimal) -> Self {
        self.inner.hours = v;
        self
    }

    pub fn log_date(mut self, v: NaiveDate) -> Self {
        self.inner.log_date = v;
        self
    }

    pub fn logged_by(mut self, v: impl Into<String>) -> Self {
        self.inner.logged_by = v.into();
        self
    }

    pub fn description(mut self, v: impl Into<String>) -> Self {
        self.inner.description = v.into();
        self
    }

    pub fn cancelled(mut self, v: bool) -> Self {
        self.inner.cancelled = v;
        self
    }

    pub fn build(self) -> TimeEntry {
        self.inner
    }
}

pub struct NewTimeEntryBuilder {
    inner: NewTimeEntry,
}

impl Default for NewTimeEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl NewTimeEntryBuilder {
    pub fn new() -> Self {
        let entry = fixture_time_entry();
        Self {
            inner: NewTimeEntry {
                project: entry.project,
                hours: entry.hours,
                log_date: entry.log_date,
                logged_by: entry.logged_by,
                description: entry.description,
                created_at: entry.created_at,
            },
        }
    }

    pub fn project(mut self, v: impl Into<String>) -> Self {
        self.inner.project = v.into();
        self
    }

    pub fn hours(mut self, v: Decimal) -> Self {
        self.inner.hours = v;
        self
    }

    pub fn log_date(mut self, v: NaiveDate) -> Self {
        self.inner.log_date = v;
        self
    }

    pub fn logged_by(mut self, v: impl Into<String>) -> Self {
        self.inner.logged_by = v.into();
        self
    }

    pub fn created_at(mut self, v: DateTime<Utc>) -> Self {
        self.inner.created_at = v;
        self
    }

    pub fn build(self) -> NewTimeEntry {
        self.inner
    }
}

#[cfg(test)]
mod time_entry_builder_tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = TimeEntryBuilder::default().build();
        assert_eq!(built.name, "TL-2024-00001");
        assert_eq!(built.project, "PROJ-001");
        assert_eq!(built.hours, dec!(2));
        assert_eq!(built.log_date, NaiveDate::from_ymd_opt(2024, 4, 15).unwrap());
        assert_eq!(built.logged_by, "jane@example.com");
        assert!(!built.cancelled);
    }

    #[rstest]
    fn new_entry_builder_shares_the_fixture_defaults() {
        let built = NewTimeEntryBuilder::default().hours(dec!(3.5)).build();
        assert_eq!(built.project, "PROJ-001");
        assert_eq!(built.hours, dec!(3.5));
        assert_eq!(built.logged_by, "jane@example.com");
    }
}
