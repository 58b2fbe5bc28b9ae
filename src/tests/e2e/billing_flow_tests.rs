use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use crate::modules::billing::adapters::outbound::job_runner::BillingJobRunner;
use crate::modules::billing::use_cases::all_employees_hours::command::AllEmployeesHours;
use crate::modules::billing::use_cases::export_annual_report::command::ExportAnnualReport;
use crate::modules::billing::use_cases::export_annual_report::handler::ANNUAL_REPORT_JOB;
use crate::modules::billing::use_cases::generate_invoice::command::GenerateInvoice;
use crate::modules::time_entries::use_cases::project_summary::command::ProjectSummaryQuery;
use crate::shared::core::errors::{ApplicationError, UNEXPECTED_MESSAGE};
use crate::shared::core::identity::{Caller, Role};
use crate::shared::core::params::Period;
use crate::shared::infrastructure::job_queue::in_memory::TokioJobQueue;
use crate::shared::infrastructure::job_queue::{JobDescriptor, JobQueue, QueueName};
use crate::shared::infrastructure::notifier::NotificationStatus;
use crate::shared::infrastructure::notifier::in_memory::ChannelNotifier;
use crate::tests::fixtures::app_state::{make_test_state, manager, seeded_store, user};
use crate::tests::fixtures::time_entries::TimeEntryBuilder;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn invoice(project: &str) -> GenerateInvoice {
    GenerateInvoice::new(project, Some("4"), Some("2024"), date(2024, 5, 1)).unwrap()
}

#[tokio::test]
async fn cancelled_entries_never_reach_any_total() {
    let store = seeded_store().await;
    for (hours, cancelled) in [(dec!(2), false), (dec!(6), true)] {
        store
            .add_time_entry(
                TimeEntryBuilder::new()
                    .hours(hours)
                    .log_date(date(2024, 4, 10))
                    .cancelled(cancelled)
                    .build(),
            )
            .await;
    }
    let (state, _) = make_test_state(store);

    let invoice = state.generate_invoice.handle(&manager(), invoice("PROJ-001")).await.unwrap();
    let summary = state
        .project_summary
        .handle(
            &manager(),
            ProjectSummaryQuery::new("PROJ-001", Some("4"), Some("2024"), date(2024, 5, 1)).unwrap(),
        )
        .await
        .unwrap();
    let hours = state
        .all_employees_hours
        .handle(
            &Caller::new("admin@example.com", vec![Role::SystemManager]),
            AllEmployeesHours {
                period: Period::new(4, 2024).unwrap(),
            },
        )
        .await
        .unwrap();

    assert_eq!(invoice.total_hours, dec!(2));
    assert_eq!(summary.total_hours, dec!(2));
    assert_eq!(hours.data[0].total_hours, dec!(2));
}

#[tokio::test]
async fn invoicing_refuses_before_reading_anything() {
    let store = seeded_store().await;
    let (state, _) = make_test_state(store.clone());

    let invoice = state.generate_invoice.handle(&user(), invoice("PROJ-001")).await;
    let export = state
        .export_annual_report
        .handle(&user(), ExportAnnualReport { year: 2024 })
        .await;

    assert!(matches!(invoice, Err(ApplicationError::Permission(_))));
    assert!(matches!(export, Err(ApplicationError::Permission(_))));
    assert_eq!(store.read_count(), 0);
}

#[tokio::test]
async fn invoicing_distinguishes_missing_rates_from_empty_periods() {
    let (state, _) = make_test_state(seeded_store().await);

    let without_rate = state.generate_invoice.handle(&manager(), invoice("PROJ-002")).await;
    let empty = state.generate_invoice.handle(&manager(), invoice("PROJ-001")).await;

    assert!(matches!(without_rate, Err(ApplicationError::Validation(_))));
    assert!(matches!(empty, Err(ApplicationError::NotFound(_))));
}

#[tokio::test]
async fn a_failing_background_job_notifies_the_requester() {
    let (notifier, mut notifications) = ChannelNotifier::new();
    let (queue, _worker) = TokioJobQueue::start(
        Arc::new(BillingJobRunner::new(seeded_store().await)),
        Arc::new(notifier),
        4,
    );

    queue
        .submit(JobDescriptor::new(
            ANNUAL_REPORT_JOB,
            QueueName::Long,
            Duration::from_secs(5),
            "boss@example.com",
            serde_json::json!({ "year": "not a year" }),
        ))
        .await
        .unwrap();
    queue
        .submit(JobDescriptor::new(
            "billing.unknown",
            QueueName::Long,
            Duration::from_secs(5),
            "boss@example.com",
            serde_json::json!({}),
        ))
        .await
        .unwrap();

    let relayed = notifications.recv().await.unwrap();
    assert_eq!(relayed.status, NotificationStatus::Failed);
    assert_eq!(relayed.recipient, "boss@example.com");
    assert_eq!(relayed.body["error"], "Annual report job needs a year");
    let hidden = notifications.recv().await.unwrap();
    assert_eq!(hidden.status, NotificationStatus::Failed);
    assert_eq!(hidden.body["error"], UNEXPECTED_MESSAGE);
}
