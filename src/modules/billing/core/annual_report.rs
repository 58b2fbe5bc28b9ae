use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::modules::time_entries::core::aggregate::{aggregate, saturating_sum};
use crate::modules::time_entries::core::project::Project;
use crate::modules::time_entries::core::time_entry::TimeEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnualReportLine {
    pub project: String,
    pub project_name: String,
    pub billing_rate: Decimal,
    pub total_hours: Decimal,
    pub total_amount: Decimal,
    pub log_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnualReport {
    pub year: i32,
    pub projects: Vec<AnnualReportLine>,
    pub total_hours: Decimal,
    pub total_amount: Decimal,
    pub log_count: usize,
}

impl AnnualReport {
    /// One line per project with entries, ordered by project id. Entries of a
    /// project missing from `projects` are billed at zero.
    pub fn assemble(year: i32, projects: &[Project], entries: Vec<TimeEntry>) -> Self {
        let by_id: HashMap<&str, &Project> = projects
            .iter()
            .map(|project| (project.id.as_str(), project))
            .collect();

        let mut grouped: BTreeMap<String, Vec<TimeEntry>> = BTreeMap::new();
        for entry in entries {
            grouped.entry(entry.project.clone()).or_default().push(entry);
        }

        let lines: Vec<AnnualReportLine> = grouped
            .into_iter()
            .map(|(id, entries)| {
                let project = by_id.get(id.as_str());
                let rate = project.map(|p| p.rate_or_zero()).unwrap_or(Decimal::ZERO);
                let totals = aggregate(&entries, rate);
                AnnualReportLine {
                    project_name: project
                        .map(|p| p.project_name.clone())
                        .unwrap_or_else(|| id.clone()),
                    project: id,
                    billing_rate: rate,
                    total_hours: totals.total_hours,
                    total_amount: totals.total_amount,
                    log_count: totals.log_count,
                }
            })
            .collect();

        Self {
            year,
            total_hours: saturating_sum(lines.iter().map(|line| line.total_hours)),
            total_amount: saturating_sum(lines.iter().map(|line| line.total_amount)),
            log_count: lines.iter().map(|line| line.log_count).sum(),
            projects: lines,
        }
    }
}
