use std::sync::Arc;

use crate::modules::time_entries::adapters::outbound::time_log_store::TimeLogStore;
use crate::modules::time_entries::core::time_entry::check_hours;
use crate::modules::time_entries::use_cases::log_time::command::LogTime;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::identity::Caller;
use crate::shared::infrastructure::authorizer::{Action, Authorizer, DocType};

/// Input constraints first, then the create permission, then the project
/// lookup. No side effects.
pub struct TimeEntryValidator {
    store: Arc<dyn TimeLogStore>,
    authorizer: Arc<dyn Authorizer>,
}

impl TimeEntryValidator {
    pub fn new(store: Arc<dyn TimeLogStore>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self { store, authorizer }
    }

    pub async fn validate(&self, caller: &Caller, command: &LogTime) -> Result<(), ApplicationError> {
        check_hours(command.hours)?;

        if !self
            .authorizer
            .has_permission(caller, DocType::TimeLog, Action::Create, None)
        {
            return Err(ApplicationError::permission(
                "You don't have permission to create Time Logs",
            ));
        }

        if !self.store.project_exists(&command.project).await? {
            return Err(ApplicationError::validation(format!(
                "Project {} does not exist",
                command.project
            )));
        }
        Ok(())
    }
}
