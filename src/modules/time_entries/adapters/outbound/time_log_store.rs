// Storage port for projects and time logs. The store owns persistence and the
// transaction boundary: writes are staged on a transaction and only become
// visible to others once `commit` returns. Dropping a transaction without
// committing discards it.

use async_trait::async_trait;
use thiserror::Error;

use crate::modules::time_entries::core::project::{Project, ProjectBilling};
use crate::modules::time_entries::core::time_entry::{NewTimeEntry, TimeEntry};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::params::DateRange;
use rust_decimal::Decimal;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("time log {0} does not exist")]
    UnknownTimeLog(String),

    #[error("project {0} does not exist")]
    UnknownProject(String),

    #[error("transaction already finished")]
    TransactionFinished,

    #[error("backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for ApplicationError {
    fn from(error: StoreError) -> Self {
        ApplicationError::unexpected("time log store", error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryQuery {
    pub project: Option<String>,
    pub logged_by: Option<String>,
    pub range: Option<DateRange>,
    pub include_cancelled: bool,
    pub order: DateOrder,
    pub limit: Option<usize>,
}

impl EntryQuery {
    pub fn for_project(project: impl Into<String>) -> Self {
        Self {
            project: Some(project.into()),
            ..Self::default()
        }
    }

    pub fn within(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.order = DateOrder::Descending;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, entry: &TimeEntry) -> bool {
        (self.include_cancelled || !entry.cancelled)
            && self.project.as_ref().is_none_or(|project| &entry.project == project)
            && self.logged_by.as_ref().is_none_or(|author| &entry.logged_by == author)
            && self.range.is_none_or(|range| range.contains(entry.log_date))
    }
}

#[async_trait]
pub trait TimeLogStore: Send + Sync {
    async fn project(&self, id: &str) -> Result<Option<Project>, StoreError>;
    async fn project_exists(&self, id: &str) -> Result<bool, StoreError>;
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError>;
    async fn time_entry(&self, name: &str) -> Result<Option<TimeEntry>, StoreError>;
    async fn list_time_entries(&self, query: &EntryQuery) -> Result<Vec<TimeEntry>, StoreError>;
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError>;
}

/// Reads through a transaction see its own staged writes.
#[async_trait]
pub trait StoreTransaction: Send {
    async fn project(&mut self, id: &str) -> Result<Option<Project>, StoreError>;
    async fn insert_time_entry(&mut self, entry: NewTimeEntry) -> Result<TimeEntry, StoreError>;
    async fn update_time_entry_hours(
        &mut self,
        name: &str,
        hours: Decimal,
    ) -> Result<TimeEntry, StoreError>;
    async fn list_time_entries(&mut self, query: &EntryQuery) -> Result<Vec<TimeEntry>, StoreError>;
    async fn set_project_billing(
        &mut self,
        project: &str,
        billing: ProjectBilling,
    ) -> Result<(), StoreError>;
    async fn commit(&mut self) -> Result<(), StoreError>;
}
