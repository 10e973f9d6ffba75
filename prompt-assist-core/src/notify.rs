//! One-way user feedback channel.

use std::sync::{Arc, Mutex};

/// Receives user-visible status messages. The core never reads back from it.
pub trait NotificationSink {
    fn notify(&self, message: &str, is_error: bool);
}

/// Sink that forwards notifications to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, message: &str, is_error: bool) {
        if is_error {
            tracing::warn!(target: "prompt_assist::notify", "{}", message);
        } else {
            tracing::info!(target: "prompt_assist::notify", "{}", message);
        }
    }
}

/// A notification captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub is_error: bool,
}

/// Sink that keeps every notification in memory.
///
/// Clones share the same buffer, so a caller can hand one clone to a
/// `LocalStore` and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.last().cloned())
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(|n| n.is_error)
            .collect()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, message: &str, is_error: bool) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(Notification {
                message: message.to_string(),
                is_error,
            });
        }
    }
}
