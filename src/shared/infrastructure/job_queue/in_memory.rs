use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::shared::core::errors::{ApplicationError, UNEXPECTED_MESSAGE};
use crate::shared::infrastructure::job_queue::{JobDescriptor, JobQueue, JobRunner, QueueError};
use crate::shared::infrastructure::notifier::{Notification, NotificationStatus, Notifier};

/// Channel backed queue drained by a single tokio worker.
#[derive(Clone)]
pub struct TokioJobQueue {
    sender: mpsc::Sender<JobDescriptor>,
}

impl TokioJobQueue {
    pub fn start(
        runner: Arc<dyn JobRunner>,
        notifier: Arc<dyn Notifier>,
        capacity: usize,
    ) -> (Self, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::channel::<JobDescriptor>(capacity.max(1));
        let worker = tokio::spawn(async move {
            while let Some(descriptor) = receiver.recv().await {
                execute(runner.clone(), notifier.as_ref(), descriptor).await;
            }
            tracing::info!("job queue worker stopped");
        });
        (Self { sender }, worker)
    }
}

#[async_trait]
impl JobQueue for TokioJobQueue {
    async fn submit(&self, descriptor: JobDescriptor) -> Result<Uuid, QueueError> {
        let job_id = descriptor.job_id;
        self.sender.try_send(descriptor).map_err(|error| match error {
            mpsc::error::TrySendError::Full(_) => QueueError::Full,
            mpsc::error::TrySendError::Closed(_) => QueueError::Closed,
        })?;
        Ok(job_id)
    }
}

/// Each job runs on its own task, so a panicking job is reported like any
/// other failure and the worker keeps draining the queue.
async fn execute(runner: Arc<dyn JobRunner>, notifier: &dyn Notifier, descriptor: JobDescriptor) {
    tracing::info!(job_id = %descriptor.job_id, method = %descriptor.method, "job started");
    let mut job = {
        let descriptor = descriptor.clone();
        tokio::spawn(async move { runner.run(&descriptor).await })
    };
    let outcome = match tokio::time::timeout(descriptor.timeout, &mut job).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(join_error)) => {
            tracing::error!(job_id = %descriptor.job_id, error = %join_error, "job panicked");
            Ok(Err(anyhow::anyhow!("job task failed: {join_error}")))
        }
        Err(elapsed) => {
            job.abort();
            Err(elapsed)
        }
    };

    let notification = match outcome {
        Ok(Ok(report)) => {
            tracing::info!(job_id = %descriptor.job_id, "job completed");
            Notification {
                recipient: descriptor.requested_by.clone(),
                subject: report.subject,
                status: NotificationStatus::Completed,
                body: report.body,
            }
        }
        Ok(Err(error)) => {
            tracing::error!(
                job_id = %descriptor.job_id,
                method = %descriptor.method,
                error = ?error,
                "job failed"
            );
            let reason = match error.downcast_ref::<ApplicationError>() {
                Some(ApplicationError::Unexpected(_)) | None => UNEXPECTED_MESSAGE.to_string(),
                Some(known) => known.to_string(),
            };
            Notification {
                recipient: descriptor.requested_by.clone(),
                subject: format!("Job {} failed", descriptor.method),
                status: NotificationStatus::Failed,
                body: serde_json::json!({ "job_id": descriptor.job_id, "error": reason }),
            }
        }
        Err(_) => {
            tracing::error!(
                job_id = %descriptor.job_id,
                timeout_secs = descriptor.timeout.as_secs(),
                "job timed out"
            );
            Notification {
                recipient: descriptor.requested_by.clone(),
                subject: format!("Job {} timed out", descriptor.method),
                status: NotificationStatus::TimedOut,
                body: serde_json::json!({
                    "job_id": descriptor.job_id,
                    "timeout_secs": descriptor.timeout.as_secs(),
                }),
            }
        }
    };

    if let Err(error) = notifier.notify(notification).await {
        tracing::error!(job_id = %descriptor.job_id, error = ?error, "could not notify requester");
    }
}
