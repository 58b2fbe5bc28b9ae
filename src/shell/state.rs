use std::sync::Arc;

use crate::modules::billing::use_cases::all_employees_hours::handler::AllEmployeesHoursHandler;
use crate::modules::billing::use_cases::download_timesheet_csv::handler::DownloadTimesheetCsvHandler;
use crate::modules::billing::use_cases::export_annual_report::handler::ExportAnnualReportHandler;
use crate::modules::billing::use_cases::generate_invoice::handler::GenerateInvoiceHandler;
use crate::modules::time_entries::adapters::outbound::time_log_store::TimeLogStore;
use crate::modules::time_entries::use_cases::bulk_log_time::handler::BulkLogTimeHandler;
use crate::modules::time_entries::use_cases::log_time::handler::LogTimeHandler;
use crate::modules::time_entries::use_cases::log_time::validator::TimeEntryValidator;
use crate::modules::time_entries::use_cases::project_summary::handler::ProjectSummaryHandler;
use crate::modules::time_entries::use_cases::update_hours::handler::UpdateHoursHandler;
use crate::shared::infrastructure::authorizer::Authorizer;
use crate::shared::infrastructure::job_queue::JobQueue;
use crate::shell::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub log_time: Arc<LogTimeHandler>,
    pub bulk_log_time: Arc<BulkLogTimeHandler>,
    pub update_hours: Arc<UpdateHoursHandler>,
    pub project_summary: Arc<ProjectSummaryHandler>,
    pub generate_invoice: Arc<GenerateInvoiceHandler>,
    pub export_annual_report: Arc<ExportAnnualReportHandler>,
    pub download_timesheet_csv: Arc<DownloadTimesheetCsvHandler>,
    pub all_employees_hours: Arc<AllEmployeesHoursHandler>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn TimeLogStore>,
        authorizer: Arc<dyn Authorizer>,
        queue: Arc<dyn JobQueue>,
        config: &AppConfig,
    ) -> Self {
        let validator = Arc::new(TimeEntryValidator::new(store.clone(), authorizer.clone()));
        Self {
            log_time: Arc::new(LogTimeHandler::new(store.clone(), validator.clone())),
            bulk_log_time: Arc::new(BulkLogTimeHandler::new(store.clone(), validator)),
            update_hours: Arc::new(UpdateHoursHandler::new(store.clone(), authorizer.clone())),
            project_summary: Arc::new(ProjectSummaryHandler::new(
                store.clone(),
                config.summary_row_limit,
            )),
            generate_invoice: Arc::new(GenerateInvoiceHandler::new(
                store.clone(),
                authorizer.clone(),
            )),
            export_annual_report: Arc::new(ExportAnnualReportHandler::new(
                authorizer.clone(),
                queue,
                config.annual_report_timeout,
            )),
            download_timesheet_csv: Arc::new(DownloadTimesheetCsvHandler::new(
                store.clone(),
                authorizer.clone(),
            )),
            all_employees_hours: Arc::new(AllEmployeesHoursHandler::new(store, authorizer)),
        }
    }
}
