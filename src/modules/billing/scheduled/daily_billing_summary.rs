use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::modules::time_entries::adapters::outbound::time_log_store::{EntryQuery, TimeLogStore};
use crate::modules::time_entries::core::aggregate::aggregate;
use crate::modules::time_entries::core::time_entry::TimeEntry;
use crate::shared::core::params::DateRange;
use crate::shared::infrastructure::notifier::{Notification, NotificationStatus, Notifier};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDay {
    pub project: String,
    pub total_hours: Decimal,
    pub total_amount: Decimal,
    pub log_count: usize,
}

/// Totals per project for the day before `today`. Nothing is sent when no
/// time was logged that day.
pub async fn daily_billing_summary(
    store: &dyn TimeLogStore,
    notifier: &dyn Notifier,
    recipient: &str,
    today: NaiveDate,
) -> anyhow::Result<Vec<ProjectDay>> {
    let day = today
        .pred_opt()
        .ok_or_else(|| anyhow::anyhow!("no day before {today}"))?;
    let entries = store
        .list_time_entries(&EntryQuery::default().within(DateRange::day(day)))
        .await?;

    let mut by_project: BTreeMap<String, Vec<TimeEntry>> = BTreeMap::new();
    for entry in entries {
        by_project.entry(entry.project.clone()).or_default().push(entry);
    }

    let mut summary = Vec::with_capacity(by_project.len());
    for (project, entries) in by_project {
        let rate = store
            .project(&project)
            .await?
            .map(|project| project.rate_or_zero())
            .unwrap_or(Decimal::ZERO);
        let totals = aggregate(&entries, rate);
        summary.push(ProjectDay {
            project,
            total_hours: totals.total_hours,
            total_amount: totals.total_amount,
            log_count: totals.log_count,
        });
    }

    tracing::info!(%day, projects = summary.len(), "daily billing summary");
    if summary.is_empty() {
        return Ok(summary);
    }

    notifier
        .notify(Notification {
            recipient: recipient.to_string(),
            subject: format!("Daily Billing Summary {day}"),
            status: NotificationStatus::Info,
            body: serde_json::json!({ "date": day, "projects": summary }),
        })
        .await?;
    Ok(summary)
}

#[cfg(test)]
mod daily_billing_summary_tests {
    use super::*;
    use crate::shared::infrastructure::notifier::in_memory::ChannelNotifier;
    use crate::tests::fixtures::app_state::seeded_store;
    use crate::tests::fixtures::time_entries::TimeEntryBuilder;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_summarise_yesterday_per_project() {
        let store = seeded_store().await;
        for (project, hours, day, cancelled) in [
            ("PROJ-001", dec!(2), date(2024, 4, 14), false),
            ("PROJ-001", dec!(1.5), date(2024, 4, 14), false),
            ("PROJ-001", dec!(8), date(2024, 4, 14), true),
            ("PROJ-002", dec!(4), date(2024, 4, 14), false),
            ("PROJ-001", dec!(6), date(2024, 4, 15), false),
        ] {
            store
                .add_time_entry(
                    TimeEntryBuilder::new()
                        .project(project)
                        .hours(hours)
                        .log_date(day)
                        .cancelled(cancelled)
                        .build(),
                )
                .await;
        }
        let (notifier, mut notifications) = ChannelNotifier::new();

        let summary = daily_billing_summary(
            store.as_ref(),
            &notifier,
            "billing@example.com",
            date(2024, 4, 15),
        )
        .await
        .unwrap();

        assert_eq!(
            summary,
            vec![
                ProjectDay {
                    project: "PROJ-001".into(),
                    total_hours: dec!(3.5),
                    total_amount: dec!(35),
                    log_count: 2,
                },
                ProjectDay {
                    project: "PROJ-002".into(),
                    total_hours: dec!(4),
                    total_amount: dec!(0),
                    log_count: 1,
                },
            ]
        );
        let notification = notifications.recv().await.unwrap();
        assert_eq!(notification.recipient, "billing@example.com");
        assert_eq!(notification.subject, "Daily Billing Summary 2024-04-14");
        assert_eq!(notification.body["projects"][0]["total_amount"], 35.0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_stay_quiet_after_an_empty_day() {
        let store = seeded_store().await;
        let (notifier, mut notifications) = ChannelNotifier::new();

        let summary = daily_billing_summary(store.as_ref(), &notifier, "billing@example.com", date(2024, 4, 15))
            .await
            .unwrap();

        assert!(summary.is_empty());
        assert!(notifications.try_recv().is_err());
    }
}
