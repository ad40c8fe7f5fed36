//! User-facing notifications.
//!
//! The page controller queues notifications as actions complete; whatever
//! displays the page drains the queue and shows them.

use std::collections::VecDeque;

use bharat_core::NotificationLevel;
use serde::Serialize;

/// A message shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// FIFO queue of pending notifications.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    queue: VecDeque<Notification>,
}

impl Notifications {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notification.
    pub fn push(&mut self, notification: Notification) {
        tracing::debug!(
            level = %notification.level,
            message = %notification.message,
            "Notification queued"
        );
        self.queue.push_back(notification);
    }

    /// Most recently queued notification, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Notification> {
        self.queue.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take every pending notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let mut notifications = Notifications::new();
        notifications.push(Notification::success("one"));
        notifications.push(Notification::error("two"));

        assert_eq!(notifications.last(), Some(&Notification::error("two")));

        let drained = notifications.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "one");
        assert_eq!(drained[0].level, NotificationLevel::Success);
        assert!(notifications.is_empty());
    }
}
