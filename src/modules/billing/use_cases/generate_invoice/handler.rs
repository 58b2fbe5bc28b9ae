use std::sync::Arc;

use crate::modules::billing::core::invoice::Invoice;
use crate::modules::billing::use_cases::generate_invoice::command::GenerateInvoice;
use crate::modules::time_entries::adapters::outbound::time_log_store::{EntryQuery, TimeLogStore};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::identity::{Caller, Role};
use crate::shared::infrastructure::authorizer::Authorizer;

pub const INVOICE_ROLES: [Role; 2] = [Role::TimeTrackerManager, Role::SystemManager];

pub struct GenerateInvoiceHandler {
    store: Arc<dyn TimeLogStore>,
    authorizer: Arc<dyn Authorizer>,
}

impl GenerateInvoiceHandler {
    pub fn new(store: Arc<dyn TimeLogStore>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self { store, authorizer }
    }

    pub async fn handle(
        &self,
        caller: &Caller,
        command: GenerateInvoice,
    ) -> Result<Invoice, ApplicationError> {
        self.authorizer.require_any_role(caller, &INVOICE_ROLES)?;

        let project = self
            .store
            .project(&command.project)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("Project {} not found", command.project)))?;

        let Some(rate) = project.billable_rate() else {
            return Err(ApplicationError::validation(format!(
                "Billing rate not set for project {}",
                project.id
            )));
        };

        let period = command.period;
        let entries = self
            .store
            .list_time_entries(&EntryQuery::for_project(&project.id).within(period.date_range()))
            .await?;
        if entries.is_empty() {
            return Err(ApplicationError::not_found(format!(
                "No time logs found for {} in {}/{}",
                project.id, period.month, period.year
            )));
        }

        let invoice = Invoice::assemble(
            project,
            rate,
            period,
            entries,
            command.requested_on,
            &caller.user,
        );
        tracing::info!(
            project = %invoice.project,
            month = invoice.month,
            year = invoice.year,
            total_amount = %invoice.total_amount,
            user = %caller.user,
            "invoice generated"
        );
        Ok(invoice)
    }
}
