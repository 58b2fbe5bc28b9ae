use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::modules::time_entries::adapters::outbound::time_log_store::{
    StoreTransaction, TimeLogStore,
};
use crate::modules::time_entries::core::time_entry::TimeEntry;
use crate::modules::time_entries::lifecycle::writer;
use crate::modules::time_entries::use_cases::bulk_log_time::command::BulkLogTime;
use crate::modules::time_entries::use_cases::log_time::command::LogTime;
use crate::modules::time_entries::use_cases::log_time::validator::TimeEntryValidator;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::identity::Caller;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkItemError {
    /// Zero based position in the submitted list.
    pub index: usize,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkLogTimeReport {
    pub created: Vec<String>,
    pub created_count: usize,
    pub errors: Vec<BulkItemError>,
    pub error_count: usize,
}

pub struct BulkLogTimeHandler {
    store: Arc<dyn TimeLogStore>,
    validator: Arc<TimeEntryValidator>,
}

impl BulkLogTimeHandler {
    pub fn new(store: Arc<dyn TimeLogStore>, validator: Arc<TimeEntryValidator>) -> Self {
        Self { store, validator }
    }

    /// All items share one transaction and one commit at the end. A failing
    /// item is recorded and skipped.
    pub async fn handle(
        &self,
        caller: &Caller,
        command: BulkLogTime,
    ) -> Result<BulkLogTimeReport, ApplicationError> {
        let mut transaction = self.store.begin().await?;
        let mut created = Vec::new();
        let mut errors = Vec::new();

        for (index, item) in command.items.iter().enumerate() {
            match self
                .log_one(caller, transaction.as_mut(), item, command.created_at)
                .await
            {
                Ok(entry) => created.push(entry.name),
                Err(error) => {
                    tracing::warn!(index, user = %caller.user, error = %error, "bulk item rejected");
                    errors.push(BulkItemError {
                        index,
                        error: format!("Item {}: {error}", index + 1),
                    });
                }
            }
        }

        transaction.commit().await?;
        tracing::info!(
            user = %caller.user,
            created = created.len(),
            rejected = errors.len(),
            "bulk time logged"
        );
        Ok(BulkLogTimeReport {
            created_count: created.len(),
            error_count: errors.len(),
            created,
            errors,
        })
    }

    async fn log_one(
        &self,
        caller: &Caller,
        transaction: &mut dyn StoreTransaction,
        item: &Value,
        created_at: DateTime<Utc>,
    ) -> Result<TimeEntry, ApplicationError> {
        let command = LogTime::from_json(item, created_at)?;
        self.validator.validate(caller, &command).await?;
        writer::insert_time_entry(transaction, command.into_new_time_entry(&caller.user)).await
    }
}
