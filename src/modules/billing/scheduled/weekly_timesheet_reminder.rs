use std::collections::{BTreeMap, HashSet};

use chrono::{Days, NaiveDate};

use crate::modules::time_entries::adapters::outbound::time_log_store::{EntryQuery, TimeLogStore};
use crate::shared::core::params::DateRange;
use crate::shared::infrastructure::notifier::{Notification, NotificationStatus, Notifier};

const RECENT_DAYS: u64 = 7;
const LOOKBACK_DAYS: u64 = 28;

/// Reminds everyone who logged time in the four weeks before the last seven
/// days but nothing since. Returns the authors reached, in name order; a
/// failed delivery is logged and skipped.
pub async fn weekly_timesheet_reminder(
    store: &dyn TimeLogStore,
    notifier: &dyn Notifier,
    today: NaiveDate,
) -> anyhow::Result<Vec<String>> {
    let out_of_range = || anyhow::anyhow!("reminder window around {today} is out of range");
    let recent_start = today
        .checked_sub_days(Days::new(RECENT_DAYS - 1))
        .ok_or_else(out_of_range)?;
    let earlier_end = recent_start.pred_opt().ok_or_else(out_of_range)?;
    let earlier_start = earlier_end
        .checked_sub_days(Days::new(LOOKBACK_DAYS - 1))
        .ok_or_else(out_of_range)?;

    let recent = store
        .list_time_entries(&EntryQuery::default().within(DateRange::new(recent_start, today)))
        .await?;
    let active: HashSet<&str> = recent.iter().map(|entry| entry.logged_by.as_str()).collect();

    let earlier = store
        .list_time_entries(&EntryQuery::default().within(DateRange::new(earlier_start, earlier_end)))
        .await?;
    let mut last_logged: BTreeMap<&str, NaiveDate> = BTreeMap::new();
    for entry in earlier.iter().filter(|entry| !active.contains(entry.logged_by.as_str())) {
        let last = last_logged.entry(entry.logged_by.as_str()).or_insert(entry.log_date);
        *last = (*last).max(entry.log_date);
    }

    let mut reminded = Vec::with_capacity(last_logged.len());
    for (author, last) in last_logged {
        let delivery = notifier
            .notify(Notification {
                recipient: author.to_string(),
                subject: "Timesheet reminder".into(),
                status: NotificationStatus::Info,
                body: serde_json::json!({
                    "message": format!("You have not logged any time since {last}."),
                    "last_logged": last,
                }),
            })
            .await;
        match delivery {
            Ok(()) => reminded.push(author.to_string()),
            Err(error) => tracing::error!(%author, error = ?error, "could not send timesheet reminder"),
        }
    }

    tracing::info!(reminded = reminded.len(), "weekly timesheet reminder");
    Ok(reminded)
}
