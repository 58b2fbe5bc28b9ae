use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::billing::core::annual_report::AnnualReport;
use crate::modules::billing::use_cases::export_annual_report::handler::ANNUAL_REPORT_JOB;
use crate::modules::time_entries::adapters::outbound::time_log_store::{EntryQuery, TimeLogStore};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::params::DateRange;
use crate::shared::infrastructure::job_queue::{JobDescriptor, JobReport, JobRunner};

/// Runs the billing jobs the queue hands over.
pub struct BillingJobRunner {
    store: Arc<dyn TimeLogStore>,
}

impl BillingJobRunner {
    pub fn new(store: Arc<dyn TimeLogStore>) -> Self {
        Self { store }
    }

    async fn annual_report(&self, descriptor: &JobDescriptor) -> anyhow::Result<JobReport> {
        let year = descriptor
            .payload
            .get("year")
            .and_then(serde_json::Value::as_i64)
            .and_then(|year| i32::try_from(year).ok())
            .ok_or_else(|| ApplicationError::validation("Annual report job needs a year"))?;

        let range = DateRange::year(year)?;
        let entries = self
            .store
            .list_time_entries(&EntryQuery::default().within(range))
            .await?;
        let projects = self.store.list_projects().await?;
        let report = AnnualReport::assemble(year, &projects, entries);

        Ok(JobReport {
            subject: format!("Annual Report {year} Ready"),
            body: serde_json::json!({
                "job_id": descriptor.job_id,
                "year": year,
                "report": report,
            }),
        })
    }
}

#[async_trait]
impl JobRunner for BillingJobRunner {
    async fn run(&self, descriptor: &JobDescriptor) -> anyhow::Result<JobReport> {
        match descriptor.method.as_str() {
            ANNUAL_REPORT_JOB => self.annual_report(descriptor).await,
            other => Err(anyhow::anyhow!("no billing job named {other}")),
        }
    }
}
