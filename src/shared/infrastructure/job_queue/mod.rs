// Background job port.
//
// Delivery contract: at-most-once. A submitted descriptor is handed to the
// runner exactly once or not at all (if the process stops first); it is never
// retried. Every execution ends in one notification to the requester:
// completed, failed or timed out. There is no cancellation handle.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::core::errors::ApplicationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueName {
    Short,
    Default,
    Long,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobDescriptor {
    pub job_id: Uuid,
    pub method: String,
    pub queue: QueueName,
    pub timeout: Duration,
    pub requested_by: String,
    pub payload: Json,
}

impl JobDescriptor {
    pub fn new(
        method: impl Into<String>,
        queue: QueueName,
        timeout: Duration,
        requested_by: impl Into<String>,
        payload: Json,
    ) -> Self {
        Self {
            job_id: Uuid::now_v7(),
            method: method.into(),
            queue,
            timeout,
            requested_by: requested_by.into(),
            payload,
        }
    }
}

/// What a finished job reports back to its requester.
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    pub subject: String,
    pub body: Json,
}

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("job queue is closed")]
    Closed,

    #[error("job queue is full")]
    Full,
}

impl From<QueueError> for ApplicationError {
    fn from(error: QueueError) -> Self {
        ApplicationError::unexpected("job queue", error)
    }
}

#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn submit(&self, descriptor: JobDescriptor) -> Result<Uuid, QueueError>;
}

/// Executes descriptors dequeued by a queue worker.
#[async_trait]
pub trait JobRunner: Send + Sync {
    async fn run(&self, descriptor: &JobDescriptor) -> anyhow::Result<JobReport>;
}

pub mod in_memory;
