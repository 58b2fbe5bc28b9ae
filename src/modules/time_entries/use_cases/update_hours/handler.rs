use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::modules::time_entries::adapters::outbound::time_log_store::TimeLogStore;
use crate::modules::time_entries::core::time_entry::check_hours;
use crate::modules::time_entries::lifecycle::writer;
use crate::modules::time_entries::use_cases::update_hours::command::UpdateHours;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::identity::Caller;
use crate::shared::infrastructure::authorizer::{Action, Authorizer, DocType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoursUpdated {
    pub success: bool,
    pub time_log: String,
    pub old_hours: Decimal,
    pub new_hours: Decimal,
    pub message: String,
}

pub struct UpdateHoursHandler {
    store: Arc<dyn TimeLogStore>,
    authorizer: Arc<dyn Authorizer>,
}

impl UpdateHoursHandler {
    pub fn new(store: Arc<dyn TimeLogStore>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self { store, authorizer }
    }

    pub async fn handle(
        &self,
        caller: &Caller,
        command: UpdateHours,
    ) -> Result<HoursUpdated, ApplicationError> {
        let new_hours = check_hours(command.new_hours)?;

        let entry = self
            .store
            .time_entry(&command.time_log)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("Time Log {} not found", command.time_log)))?;

        // Authors may always edit their own logs.
        if entry.logged_by != caller.user
            && !self.authorizer.has_permission(
                caller,
                DocType::TimeLog,
                Action::Write,
                Some(&entry.logged_by),
            )
        {
            return Err(ApplicationError::permission("You can only edit your own time logs"));
        }

        let mut transaction = self.store.begin().await?;
        writer::update_time_entry_hours(transaction.as_mut(), &entry.name, new_hours).await?;
        transaction.commit().await?;

        let old_hours = entry.hours;
        tracing::info!(
            time_log = %entry.name,
            user = %caller.user,
            old_hours = %old_hours,
            new_hours = %new_hours,
            "time log hours updated"
        );
        Ok(HoursUpdated {
            success: true,
            time_log: entry.name,
            old_hours,
            new_hours,
            message: format!(
                "Updated from {} to {} hours",
                old_hours.normalize(),
                new_hours.normalize()
            ),
        })
    }
}
