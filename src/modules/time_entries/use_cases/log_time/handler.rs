use std::sync::Arc;

use serde::Serialize;

use crate::modules::time_entries::adapters::outbound::time_log_store::TimeLogStore;
use crate::modules::time_entries::lifecycle::writer;
use crate::modules::time_entries::use_cases::log_time::command::LogTime;
use crate::modules::time_entries::use_cases::log_time::validator::TimeEntryValidator;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::identity::Caller;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogTimeReceipt {
    pub success: bool,
    pub time_log: String,
    pub message: String,
}

pub struct LogTimeHandler {
    store: Arc<dyn TimeLogStore>,
    validator: Arc<TimeEntryValidator>,
}

impl LogTimeHandler {
    pub fn new(store: Arc<dyn TimeLogStore>, validator: Arc<TimeEntryValidator>) -> Self {
        Self { store, validator }
    }

    pub async fn handle(
        &self,
        caller: &Caller,
        command: LogTime,
    ) -> Result<LogTimeReceipt, ApplicationError> {
        self.validator.validate(caller, &command).await?;

        let project = command.project.clone();
        let hours = command.hours.normalize();
        let mut transaction = self.store.begin().await?;
        let entry = writer::insert_time_entry(
            transaction.as_mut(),
            command.into_new_time_entry(&caller.user),
        )
        .await?;
        transaction.commit().await?;

        tracing::info!(time_log = %entry.name, project = %project, user = %caller.user, "time logged");
        Ok(LogTimeReceipt {
            success: true,
            time_log: entry.name,
            message: format!("Logged {hours} hours for {project}"),
        })
    }
}
