// Scheduled billing tasks. Each schedule runs on its own tokio task; a failed
// run is logged and the next tick tries again.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::modules::billing::scheduled::daily_billing_summary::daily_billing_summary;
use crate::modules::billing::scheduled::weekly_timesheet_reminder::weekly_timesheet_reminder;
use crate::modules::time_entries::adapters::outbound::time_log_store::TimeLogStore;
use crate::shared::infrastructure::notifier::Notifier;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);
const WEEK: Duration = Duration::from_secs(7 * 24 * 60 * 60);

pub fn spawn_scheduled(
    store: Arc<dyn TimeLogStore>,
    notifier: Arc<dyn Notifier>,
    billing_recipient: String,
) -> Vec<JoinHandle<()>> {
    let daily = {
        let store = store.clone();
        let notifier = notifier.clone();
        tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + DAY, DAY);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let today = Utc::now().date_naive();
                if let Err(error) =
                    daily_billing_summary(store.as_ref(), notifier.as_ref(), &billing_recipient, today).await
                {
                    tracing::error!(%error, "daily billing summary failed");
                }
            }
        })
    };

    let weekly = tokio::spawn(async move {
        let mut ticks = interval_at(Instant::now() + WEEK, WEEK);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticks.tick().await;
            let today = Utc::now().date_naive();
            if let Err(error) = weekly_timesheet_reminder(store.as_ref(), notifier.as_ref(), today).await {
                tracing::error!(%error, "weekly timesheet reminder failed");
            }
        }
    });

    vec![daily, weekly]
}
