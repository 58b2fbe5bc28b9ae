use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use serde_json::json;

use crate::modules::time_entries::adapters::outbound::time_log_store::{EntryQuery, StoreTransaction, TimeLogStore};
use crate::modules::time_entries::lifecycle::writer;
use crate::modules::time_entries::use_cases::bulk_log_time::command::BulkLogTime;
use crate::modules::time_entries::use_cases::log_time::command::LogTime;
use crate::modules::time_entries::use_cases::project_summary::command::ProjectSummaryQuery;
use crate::modules::time_entries::use_cases::update_hours::command::UpdateHours;
use crate::shared::core::errors::ApplicationError;
use crate::tests::fixtures::app_state::{make_test_state, seeded_store, user};
use crate::tests::fixtures::time_entries::NewTimeEntryBuilder;

fn log(project: &str, hours: rust_decimal::Decimal) -> LogTime {
    LogTime {
        project: project.into(),
        hours,
        description: None,
        log_date: NaiveDate::from_ymd_opt(2024, 4, 15),
        created_at: Utc.with_ymd_and_hms(2024, 4, 15, 9, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn logged_hours_roll_up_into_the_summary_and_the_project() {
    let store = seeded_store().await;
    let (state, _) = make_test_state(store.clone());

    state.log_time.handle(&user(), log("PROJ-001", dec!(2))).await.unwrap();
    state.log_time.handle(&user(), log("PROJ-001", dec!(3))).await.unwrap();

    let today = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
    let summary = state
        .project_summary
        .handle(&user(), ProjectSummaryQuery::new("PROJ-001", None, None, today).unwrap())
        .await
        .unwrap();
    assert_eq!(summary.total_hours, dec!(5));
    assert_eq!(summary.total_amount, dec!(50));
    assert_eq!(summary.log_count, 2);

    let project = store.project("PROJ-001").await.unwrap().unwrap();
    assert_eq!(project.billed_hours, dec!(5));
    assert_eq!(project.billed_amount, dec!(50));
}

#[tokio::test]
async fn a_bad_bulk_item_is_reported_while_the_rest_is_kept() {
    let store = seeded_store().await;
    let (state, _) = make_test_state(store.clone());
    let created_at = Utc.with_ymd_and_hms(2024, 4, 15, 9, 0, 0).unwrap();
    let command = BulkLogTime {
        items: vec![
            json!({ "project": "PROJ-001", "hours": 1 }),
            json!({ "project": "PROJ-001", "hours": 30 }),
            json!({ "project": "PROJ-001", "hours": "2.5" }),
        ],
        created_at,
    };

    let report = state.bulk_log_time.handle(&user(), command).await.unwrap();

    assert_eq!(report.created_count, 2);
    assert_eq!(report.error_count, 1);
    assert_eq!(report.errors[0].index, 1);
    assert!(report.errors[0].error.starts_with("Item 2: "));
    let project = store.project("PROJ-001").await.unwrap().unwrap();
    assert_eq!(project.billed_hours, dec!(3.5));
}

#[tokio::test]
async fn updating_hours_recomputes_project_billing() {
    let store = seeded_store().await;
    let (state, _) = make_test_state(store.clone());
    let receipt = state.log_time.handle(&user(), log("PROJ-001", dec!(2))).await.unwrap();

    state
        .update_hours
        .handle(
            &user(),
            UpdateHours {
                time_log: receipt.time_log.clone(),
                new_hours: dec!(7),
            },
        )
        .await
        .unwrap();

    let project = store.project("PROJ-001").await.unwrap().unwrap();
    assert_eq!(project.billed_hours, dec!(7));
    assert_eq!(project.billed_amount, dec!(70));
}

#[tokio::test]
async fn uncommitted_writes_stay_invisible() {
    let store = seeded_store().await;
    let mut transaction = store.begin().await.unwrap();

    writer::insert_time_entry(transaction.as_mut(), NewTimeEntryBuilder::new().build())
        .await
        .unwrap();
    let inside = transaction
        .list_time_entries(&EntryQuery::for_project("PROJ-001"))
        .await
        .unwrap();
    assert_eq!(inside.len(), 1);
    assert!(store.list_time_entries(&EntryQuery::for_project("PROJ-001")).await.unwrap().is_empty());

    drop(transaction);
    assert!(store.list_time_entries(&EntryQuery::for_project("PROJ-001")).await.unwrap().is_empty());
    let project = store.project("PROJ-001").await.unwrap().unwrap();
    assert_eq!(project.billed_hours, dec!(0));
}

#[tokio::test]
async fn logging_against_an_unknown_project_writes_nothing() {
    let store = seeded_store().await;
    let (state, _) = make_test_state(store.clone());

    let result = state.log_time.handle(&user(), log("PROJ-404", dec!(2))).await;

    assert_eq!(
        result.map(|receipt| receipt.success),
        Err(ApplicationError::validation("Project PROJ-404 does not exist"))
    );
    assert!(store.list_time_entries(&EntryQuery::default()).await.unwrap().is_empty());
}
