use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use time_tracker::modules::billing::adapters::outbound::job_runner::BillingJobRunner;
use time_tracker::modules::time_entries::adapters::outbound::time_log_store::TimeLogStore;
use time_tracker::modules::time_entries::adapters::outbound::time_log_store_in_memory::InMemoryTimeLogStore;
use time_tracker::modules::time_entries::core::project::Project;
use time_tracker::shared::infrastructure::authorizer::in_memory::RoleTableAuthorizer;
use time_tracker::shared::infrastructure::job_queue::in_memory::TokioJobQueue;
use time_tracker::shared::infrastructure::notifier::Notifier;
use time_tracker::shared::infrastructure::notifier::in_memory::LogNotifier;
use time_tracker::shell::config::AppConfig;
use time_tracker::shell::state::AppState;
use time_tracker::shell::{graphql, http, workers};

const JOB_QUEUE_CAPACITY: usize = 64;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    let store = InMemoryTimeLogStore::new();
    if let Some(path) = &config.projects_file {
        for project in load_projects(path)? {
            store.add_project(project).await;
        }
    }
    let store: Arc<dyn TimeLogStore> = Arc::new(store);
    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);

    let (queue, _job_worker) = TokioJobQueue::start(
        Arc::new(BillingJobRunner::new(store.clone())),
        notifier.clone(),
        JOB_QUEUE_CAPACITY,
    );
    let _scheduled = workers::spawn_scheduled(store.clone(), notifier, config.billing_recipient.clone());

    let state = AppState::new(
        store,
        Arc::new(RoleTableAuthorizer::default()),
        Arc::new(queue),
        &config,
    );
    let schema = graphql::build_schema(state.clone());

    let app = http::router(state)
        .merge(graphql::router(schema))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.addr()?;
    tracing::info!("API: http://{addr}/api/method, GraphQL: http://{addr}{}", graphql::GRAPHQL_PATH);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}

fn load_projects(path: &Path) -> anyhow::Result<Vec<Project>> {
    let raw = fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let projects: Vec<Project> =
        serde_json::from_str(&raw).with_context(|| format!("{} is not a project list", path.display()))?;
    tracing::info!(count = projects.len(), "projects loaded");
    Ok(projects)
}
