use std::sync::Arc;

use rust_decimal_macros::dec;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::modules::billing::adapters::outbound::job_runner::BillingJobRunner;
use crate::modules::time_entries::adapters::outbound::time_log_store_in_memory::InMemoryTimeLogStore;
use crate::modules::time_entries::core::project::Project;
use crate::shared::core::identity::{Caller, Role};
use crate::shared::infrastructure::authorizer::in_memory::RoleTableAuthorizer;
use crate::shared::infrastructure::job_queue::in_memory::TokioJobQueue;
use crate::shared::infrastructure::notifier::Notification;
use crate::shared::infrastructure::notifier::in_memory::ChannelNotifier;
use crate::shell::config::AppConfig;
use crate::shell::state::AppState;

pub const USER: &str = "jane@example.com";
pub const MANAGER: &str = "boss@example.com";
pub const HR: &str = "hr@example.com";

pub fn user() -> Caller {
    Caller::new(USER, vec![Role::TimeTrackerUser])
}

pub fn manager() -> Caller {
    Caller::new(MANAGER, vec![Role::TimeTrackerManager])
}

pub fn hr() -> Caller {
    Caller::new(HR, vec![Role::HrManager])
}

/// PROJ-001 bills 10 per hour for ACME, PROJ-002 has no rate.
pub async fn seed_projects(store: &InMemoryTimeLogStore) {
    store
        .add_project(
            Project::new("PROJ-001", "Website")
                .with_billing_rate(dec!(10))
                .with_customer("ACME"),
        )
        .await;
    store.add_project(Project::new("PROJ-002", "Internal tooling")).await;
}

pub async fn seeded_store() -> Arc<InMemoryTimeLogStore> {
    let store = InMemoryTimeLogStore::new();
    seed_projects(&store).await;
    Arc::new(store)
}

/// Needs a running tokio runtime for the job queue worker.
pub fn make_test_state(
    store: Arc<InMemoryTimeLogStore>,
) -> (AppState, UnboundedReceiver<Notification>) {
    let (notifier, notifications) = ChannelNotifier::new();
    let (queue, _worker) = TokioJobQueue::start(
        Arc::new(BillingJobRunner::new(store.clone())),
        Arc::new(notifier),
        16,
    );
    let state = AppState::new(
        store,
        Arc::new(RoleTableAuthorizer::default()),
        Arc::new(queue),
        &AppConfig::default(),
    );
    (state, notifications)
}
