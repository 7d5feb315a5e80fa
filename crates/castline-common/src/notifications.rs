use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Severity level for user-facing notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A user-facing notification.
///
/// Error notifications are modal alerts: they carry no TTL and stay queued
/// until the user acknowledges them.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub body: String,
    pub created_at: Instant,
    pub ttl: Option<Duration>,
}

impl Notification {
    /// Creates an info notification with a 5-second TTL.
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_ttl(NotificationLevel::Info, title, body, Duration::from_secs(5))
    }

    /// Creates an "Error" alert that waits for acknowledgement.
    pub fn error_alert(body: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: "Error".into(),
            body: body.into(),
            created_at: Instant::now(),
            ttl: None,
        }
    }

    fn with_ttl(
        level: NotificationLevel,
        title: impl Into<String>,
        body: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
            created_at: Instant::now(),
            ttl: Some(ttl),
        }
    }

    /// Returns `true` if this notification has a TTL and has outlived it.
    pub fn is_expired(&self) -> bool {
        self.ttl
            .is_some_and(|ttl| self.created_at.elapsed() >= ttl)
    }

    /// Returns `true` if the user has to dismiss this notification.
    pub fn needs_acknowledgement(&self) -> bool {
        self.ttl.is_none()
    }
}

/// A bounded queue of notifications owned by the presentation context.
///
/// Expired transient entries are evicted lazily. Alerts stay until
/// [`NotificationQueue::acknowledge`] is called for them.
#[derive(Debug)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    capacity: usize,
}

impl NotificationQueue {
    /// Creates a new queue with the given maximum capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a notification, evicting expired entries first.
    /// If still at capacity after eviction, the oldest entry is removed.
    pub fn push(&mut self, notification: Notification) {
        self.evict_expired();
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    /// Returns all currently visible (non-expired) notifications.
    pub fn visible(&mut self) -> Vec<&Notification> {
        self.evict_expired();
        self.items.iter().collect()
    }

    /// The oldest alert still waiting for the user, if any.
    pub fn pending_alert(&self) -> Option<&Notification> {
        self.items.iter().find(|n| n.needs_acknowledgement())
    }

    /// Dismisses the oldest pending alert ("Ok"). Returns it if there was one.
    pub fn acknowledge(&mut self) -> Option<Notification> {
        let idx = self.items.iter().position(|n| n.needs_acknowledgement())?;
        self.items.remove(idx)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn evict_expired(&mut self) {
        self.items.retain(|n| !n.is_expired());
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(16)
    }
}
