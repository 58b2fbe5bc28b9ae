use std::sync::Arc;

use crate::modules::billing::core::timesheet_csv;
use crate::modules::billing::use_cases::download_timesheet_csv::command::DownloadTimesheetCsv;
use crate::modules::billing::use_cases::generate_invoice::handler::INVOICE_ROLES;
use crate::modules::time_entries::adapters::outbound::time_log_store::{EntryQuery, TimeLogStore};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::identity::Caller;
use crate::shared::infrastructure::authorizer::Authorizer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimesheetFile {
    pub file_name: String,
    pub content: String,
}

pub struct DownloadTimesheetCsvHandler {
    store: Arc<dyn TimeLogStore>,
    authorizer: Arc<dyn Authorizer>,
}

impl DownloadTimesheetCsvHandler {
    pub fn new(store: Arc<dyn TimeLogStore>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self { store, authorizer }
    }

    pub async fn handle(
        &self,
        caller: &Caller,
        command: DownloadTimesheetCsv,
    ) -> Result<TimesheetFile, ApplicationError> {
        self.authorizer.require_any_role(caller, &INVOICE_ROLES)?;

        let period = command.period;
        let entries = self
            .store
            .list_time_entries(&EntryQuery::for_project(&command.project).within(period.date_range()))
            .await?;
        tracing::debug!(project = %command.project, rows = entries.len(), "timesheet exported");

        Ok(TimesheetFile {
            file_name: timesheet_csv::file_name(&command.project, period.year, period.month),
            content: timesheet_csv::render(&entries),
        })
    }
}
