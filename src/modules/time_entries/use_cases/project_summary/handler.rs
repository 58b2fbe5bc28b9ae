use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::modules::time_entries::adapters::outbound::time_log_store::{EntryQuery, TimeLogStore};
use crate::modules::time_entries::core::aggregate::aggregate;
use crate::modules::time_entries::core::time_entry::TimeEntry;
use crate::modules::time_entries::use_cases::project_summary::command::ProjectSummaryQuery;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::identity::Caller;
use crate::shared::core::params::Period;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    pub total_hours: Decimal,
    pub billing_rate: Decimal,
    pub total_amount: Decimal,
    pub log_count: usize,
    pub logs: Vec<TimeEntry>,
}

/// Totals over the most recent `row_limit` entries of a project.
pub struct ProjectSummaryHandler {
    store: Arc<dyn TimeLogStore>,
    row_limit: usize,
}

impl ProjectSummaryHandler {
    pub fn new(store: Arc<dyn TimeLogStore>, row_limit: usize) -> Self {
        Self { store, row_limit }
    }

    /// Readable by any caller, guests included.
    pub async fn handle(
        &self,
        caller: &Caller,
        query: ProjectSummaryQuery,
    ) -> Result<ProjectSummary, ApplicationError> {
        let project = self
            .store
            .project(&query.project)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("Project not found: {}", query.project)))?;

        let mut entries = EntryQuery::for_project(&project.id)
            .newest_first()
            .limit(self.row_limit);
        if let Some(period) = query.period {
            entries = entries.within(period.date_range());
        }
        let logs = self.store.list_time_entries(&entries).await?;
        tracing::debug!(user = %caller.user, project = %project.id, rows = logs.len(), "project summarized");

        let rate = project.rate_or_zero();
        let totals = aggregate(&logs, rate);
        Ok(ProjectSummary {
            project: project.id,
            period: query.period,
            total_hours: totals.total_hours,
            billing_rate: rate,
            total_amount: totals.total_amount,
            log_count: totals.log_count,
            logs,
        })
    }
}
