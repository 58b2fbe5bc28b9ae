use std::sync::Arc;

use serde::Serialize;

use crate::modules::billing::use_cases::all_employees_hours::command::AllEmployeesHours;
use crate::modules::time_entries::adapters::outbound::time_log_store::{EntryQuery, TimeLogStore};
use crate::modules::time_entries::core::aggregate::{HoursByAuthorAndProject, group_by_author_and_project};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::identity::{Caller, Role};
use crate::shared::infrastructure::authorizer::Authorizer;

pub const HR_ROLES: [Role; 2] = [Role::HrManager, Role::SystemManager];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeesHours {
    pub month: u32,
    pub year: i32,
    pub data: Vec<HoursByAuthorAndProject>,
}

pub struct AllEmployeesHoursHandler {
    store: Arc<dyn TimeLogStore>,
    authorizer: Arc<dyn Authorizer>,
}

impl AllEmployeesHoursHandler {
    pub fn new(store: Arc<dyn TimeLogStore>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self { store, authorizer }
    }

    pub async fn handle(
        &self,
        caller: &Caller,
        query: AllEmployeesHours,
    ) -> Result<EmployeesHours, ApplicationError> {
        self.authorizer.require_any_role(caller, &HR_ROLES)?;

        let period = query.period;
        let entries = self
            .store
            .list_time_entries(&EntryQuery::default().within(period.date_range()))
            .await?;

        Ok(EmployeesHours {
            month: period.month,
            year: period.year,
            data: group_by_author_and_project(&entries),
        })
    }
}
