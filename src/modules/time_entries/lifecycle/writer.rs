// Persists time logs through an open transaction with the save hooks around
// each write. Committing is left to the caller so several writes can share
// one commit.

use rust_decimal::Decimal;

use crate::modules::time_entries::adapters::outbound::time_log_store::StoreTransaction;
use crate::modules::time_entries::core::time_entry::{NewTimeEntry, TimeEntry, check_hours};
use crate::modules::time_entries::lifecycle::hooks;
use crate::shared::core::errors::ApplicationError;

pub async fn insert_time_entry(
    transaction: &mut dyn StoreTransaction,
    entry: NewTimeEntry,
) -> Result<TimeEntry, ApplicationError> {
    hooks::validate_before_insert(&entry)?;
    let inserted = transaction.insert_time_entry(entry).await?;
    hooks::update_project_billing(transaction, &inserted.project).await?;
    Ok(inserted)
}

pub async fn update_time_entry_hours(
    transaction: &mut dyn StoreTransaction,
    name: &str,
    hours: Decimal,
) -> Result<TimeEntry, ApplicationError> {
    check_hours(hours)?;
    let updated = transaction.update_time_entry_hours(name, hours).await?;
    hooks::update_project_billing(transaction, &updated.project).await?;
    Ok(updated)
}
