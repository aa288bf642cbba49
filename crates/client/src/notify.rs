//! Transient user notices ("toasts").
//!
//! [`NotificationCenter`] queues every notice for polling views and fans it
//! out over a `tokio::sync::broadcast` channel for live ones.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, RwLock};

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

const DEFAULT_CAPACITY: usize = 64;

/// Shared notice queue. Cloning yields another handle to the same queue.
#[derive(Clone)]
pub struct NotificationCenter {
    queue: Arc<RwLock<Vec<Notice>>>,
    sender: broadcast::Sender<Notice>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(DEFAULT_CAPACITY);
        Self {
            queue: Arc::new(RwLock::new(Vec::new())),
            sender,
        }
    }

    pub async fn push(&self, level: NoticeLevel, message: impl Into<String>) {
        let notice = Notice {
            level,
            message: message.into(),
            at: Utc::now(),
        };
        match level {
            NoticeLevel::Error => tracing::warn!(message = %notice.message, "Error notice"),
            _ => tracing::info!(message = %notice.message, ?level, "Notice"),
        }
        self.queue.write().await.push(notice.clone());
        // Ignore the SendError; it only means no live view is subscribed.
        let _ = self.sender.send(notice);
    }

    pub async fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message).await;
    }

    pub async fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message).await;
    }

    pub async fn info(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message).await;
    }

    /// Show the user-facing message for a failed operation.
    ///
    /// Server faults and expired sessions were already announced by the
    /// HTTP client, so they are not repeated here.
    pub async fn report(&self, err: &ClientError) {
        if err.is_reported() {
            return;
        }
        self.error(err.user_message()).await;
    }

    /// Take every queued notice, oldest first.
    pub async fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.queue.write().await)
    }

    /// Copy of the queued notices without removing them.
    pub async fn snapshot(&self) -> Vec<Notice> {
        self.queue.read().await.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn drain_empties_queue_in_order() {
        let center = NotificationCenter::new();
        center.success("Branch Created!").await;
        center.error("Failed to delete").await;

        assert_eq!(center.snapshot().await.len(), 2);
        let drained = center.drain().await;
        let messages: Vec<_> = drained.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, ["Branch Created!", "Failed to delete"]);
        assert_eq!(drained[1].level, NoticeLevel::Error);
        assert!(center.drain().await.is_empty());
    }

    #[tokio::test]
    async fn subscribers_receive_notices() {
        let center = NotificationCenter::new();
        let mut rx = center.subscribe();
        center.info("Loading").await;
        let notice = rx.recv().await.unwrap();
        assert_eq!(notice.message, "Loading");
        assert_eq!(notice.level, NoticeLevel::Info);
    }

    #[tokio::test]
    async fn clones_share_the_queue() {
        let center = NotificationCenter::new();
        let other = center.clone();
        other.success("Saved").await;
        assert_eq!(center.drain().await.len(), 1);
    }
}
