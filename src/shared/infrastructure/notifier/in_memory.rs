use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::shared::infrastructure::notifier::{Notification, NotificationStatus, Notifier};

/// Writes notifications to the log. Used when no mail transport is wired.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: Notification) -> anyhow::Result<()> {
        match notification.status {
            NotificationStatus::Failed | NotificationStatus::TimedOut => tracing::warn!(
                recipient = %notification.recipient,
                subject = %notification.subject,
                body = %notification.body,
                "notification"
            ),
            _ => tracing::info!(
                recipient = %notification.recipient,
                subject = %notification.subject,
                "notification"
            ),
        }
        Ok(())
    }
}

/// Forwards every notification into an unbounded channel for inspection.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn notify(&self, notification: Notification) -> anyhow::Result<()> {
        self.sender
            .send(notification)
            .map_err(|_| anyhow::anyhow!("Notification channel closed"))
    }
}
