//! Notifier that keeps every notification.

use std::sync::{Mutex, PoisonError};

use crate::board::ports::{Notification, Notifier};

/// Records notifications in delivery order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    delivered: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every notification delivered so far.
    #[must_use]
    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent notification.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!(?notification, "notification delivered");
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
