// Save hooks for time logs. They run inside the caller's transaction, so a
// failing hook leaves nothing behind once the transaction is dropped.

use crate::modules::time_entries::adapters::outbound::time_log_store::{
    EntryQuery, StoreTransaction,
};
use crate::modules::time_entries::core::aggregate::aggregate;
use crate::modules::time_entries::core::project::ProjectBilling;
use crate::modules::time_entries::core::time_entry::{NewTimeEntry, check_hours};
use crate::shared::core::errors::ApplicationError;

pub fn validate_before_insert(entry: &NewTimeEntry) -> Result<(), ApplicationError> {
    check_hours(entry.hours)?;
    Ok(())
}

/// Recomputes the billed hours and amount of `project` from every
/// non-cancelled entry visible to the transaction, staged ones included.
pub async fn update_project_billing(
    transaction: &mut dyn StoreTransaction,
    project: &str,
) -> Result<ProjectBilling, ApplicationError> {
    let record = transaction
        .project(project)
        .await?
        .ok_or_else(|| ApplicationError::validation(format!("Project {project} does not exist")))?;

    let entries = transaction
        .list_time_entries(&EntryQuery::for_project(project))
        .await?;
    let totals = aggregate(&entries, record.rate_or_zero());
    let billing = ProjectBilling {
        billed_hours: totals.total_hours,
        billed_amount: totals.total_amount,
    };
    transaction.set_project_billing(project, billing).await?;

    tracing::debug!(
        project,
        billed_hours = %billing.billed_hours,
        billed_amount = %billing.billed_amount,
        "project billing recomputed"
    );
    Ok(billing)
}
