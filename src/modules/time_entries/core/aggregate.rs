// Pure reductions over time entry records. No I/O, no errors: a record whose
// hours are missing or unreadable counts as zero hours.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::modules::time_entries::core::time_entry::TimeEntry;

pub trait BillableRecord {
    fn billable_hours(&self) -> Option<Decimal>;
}

impl BillableRecord for TimeEntry {
    fn billable_hours(&self) -> Option<Decimal> {
        Some(self.hours)
    }
}

/// Untyped rows, e.g. entries exported by another system.
impl BillableRecord for serde_json::Value {
    fn billable_hours(&self) -> Option<Decimal> {
        match self.get("hours")? {
            serde_json::Value::Number(number) => Decimal::from_str(&number.to_string()).ok(),
            serde_json::Value::String(text) => Decimal::from_str(text.trim()).ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub total_hours: Decimal,
    pub total_amount: Decimal,
    pub log_count: usize,
}

/// Sums and multiplies without panicking: a result outside the decimal range
/// saturates at `Decimal::MAX` (or `MIN`) and is logged.
pub fn aggregate<R: BillableRecord>(records: &[R], rate: Decimal) -> Aggregate {
    let total_hours = saturating_sum(
        records
            .iter()
            .map(|record| record.billable_hours().unwrap_or(Decimal::ZERO)),
    );
    let total_amount = total_hours.checked_mul(rate).unwrap_or_else(|| {
        tracing::warn!(%total_hours, %rate, "billed amount overflows, saturating");
        total_hours.saturating_mul(rate)
    });
    Aggregate {
        total_hours,
        total_amount,
        log_count: records.len(),
    }
}

pub fn saturating_add(total: Decimal, value: Decimal) -> Decimal {
    total.checked_add(value).unwrap_or_else(|| {
        tracing::warn!(%total, %value, "decimal total overflows, saturating");
        total.saturating_add(value)
    })
}

pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, saturating_add)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoursByAuthorAndProject {
    pub logged_by: String,
    pub project: String,
    pub total_hours: Decimal,
    pub entries: usize,
}

/// Groups entries by (author, project), most hours first. Groups with equal
/// totals keep the order in which they were first encountered.
pub fn group_by_author_and_project(entries: &[TimeEntry]) -> Vec<HoursByAuthorAndProject> {
    let mut groups: Vec<HoursByAuthorAndProject> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for entry in entries {
        let key = (entry.logged_by.as_str(), entry.project.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(HoursByAuthorAndProject {
                logged_by: entry.logged_by.clone(),
                project: entry.project.clone(),
                total_hours: Decimal::ZERO,
                entries: 0,
            });
            groups.len() - 1
        });
        groups[slot].total_hours = saturating_add(groups[slot].total_hours, entry.hours);
        groups[slot].entries += 1;
    }

    // sort_by is stable
    groups.sort_by(|a, b| b.total_hours.cmp(&a.total_hours));
    groups
}
