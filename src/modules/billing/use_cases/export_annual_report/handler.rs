use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

use crate::modules::billing::use_cases::export_annual_report::command::ExportAnnualReport;
use crate::modules::billing::use_cases::generate_invoice::handler::INVOICE_ROLES;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::identity::Caller;
use crate::shared::infrastructure::authorizer::Authorizer;
use crate::shared::infrastructure::job_queue::{JobDescriptor, JobQueue, QueueName};

pub const ANNUAL_REPORT_JOB: &str = "billing.annual_report";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnualReportQueued {
    pub message: String,
    pub job_id: Uuid,
    pub tip: String,
}

/// Hands the report to the job queue and answers right away. The requester
/// hears back through a notification.
pub struct ExportAnnualReportHandler {
    authorizer: Arc<dyn Authorizer>,
    queue: Arc<dyn JobQueue>,
    timeout: Duration,
}

impl ExportAnnualReportHandler {
    pub fn new(authorizer: Arc<dyn Authorizer>, queue: Arc<dyn JobQueue>, timeout: Duration) -> Self {
        Self {
            authorizer,
            queue,
            timeout,
        }
    }

    pub async fn handle(
        &self,
        caller: &Caller,
        command: ExportAnnualReport,
    ) -> Result<AnnualReportQueued, ApplicationError> {
        self.authorizer.require_any_role(caller, &INVOICE_ROLES)?;

        let descriptor = JobDescriptor::new(
            ANNUAL_REPORT_JOB,
            QueueName::Long,
            self.timeout,
            caller.user.clone(),
            serde_json::json!({ "year": command.year }),
        );
        let job_id = self.queue.submit(descriptor).await?;
        tracing::info!(%job_id, year = command.year, user = %caller.user, "annual report enqueued");

        Ok(AnnualReportQueued {
            message: format!("Annual report for {} is being generated.", command.year),
            job_id,
            tip: "You will be notified when the report is ready.".into(),
        })
    }
}
