use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::modules::time_entries::core::aggregate::aggregate;
use crate::modules::time_entries::core::project::Project;
use crate::modules::time_entries::core::time_entry::TimeEntry;
use crate::shared::core::params::Period;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceLine {
    pub name: String,
    pub hours: Decimal,
    pub log_date: NaiveDate,
    pub logged_by: String,
    pub description: String,
}

impl From<TimeEntry> for InvoiceLine {
    fn from(entry: TimeEntry) -> Self {
        Self {
            name: entry.name,
            hours: entry.hours,
            log_date: entry.log_date,
            logged_by: entry.logged_by,
            description: entry.description,
        }
    }
}

/// Derived on request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub project: String,
    pub project_name: String,
    pub customer: Option<String>,
    pub month: u32,
    pub year: i32,
    pub total_hours: Decimal,
    pub billing_rate: Decimal,
    pub total_amount: Decimal,
    pub log_count: usize,
    pub logs: Vec<InvoiceLine>,
    pub generated_on: NaiveDate,
    pub generated_by: String,
}

impl Invoice {
    /// `rate` is the project's billable rate at the time of the call.
    pub fn assemble(
        project: Project,
        rate: Decimal,
        period: Period,
        entries: Vec<TimeEntry>,
        generated_on: NaiveDate,
        generated_by: &str,
    ) -> Self {
        let totals = aggregate(&entries, rate);
        Self {
            project: project.id,
            project_name: project.project_name,
            customer: project.customer,
            month: period.month,
            year: period.year,
            total_hours: totals.total_hours,
            billing_rate: rate,
            total_amount: totals.total_amount,
            log_count: totals.log_count,
            logs: entries.into_iter().map(InvoiceLine::from).collect(),
            generated_on,
            generated_by: generated_by.to_string(),
        }
    }
}
