//! Transient notifications (toasts) raised by grid and shell operations

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Default,
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn new(message: impl Into<String>, variant: NotificationVariant) -> Self {
        Self {
            message: message.into(),
            variant,
        }
    }

    pub fn plain(message: impl Into<String>) -> Self {
        Self::new(message, NotificationVariant::Default)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationVariant::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationVariant::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationVariant::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationVariant::Error)
    }
}

/// Stack of on-screen notifications; each one dismisses itself after the
/// timeout, and the oldest is dropped when the stack is full
pub struct NotificationCenter {
    active: VecDeque<(Notification, Instant)>,
    timeout: Duration,
    max_visible: usize,
}

impl NotificationCenter {
    pub fn new(timeout: Duration, max_visible: usize) -> Self {
        Self {
            active: VecDeque::new(),
            timeout,
            max_visible: max_visible.max(1),
        }
    }

    pub fn push(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }

    pub fn push_at(&mut self, notification: Notification, now: Instant) {
        if self.active.len() >= self.max_visible {
            self.active.pop_front();
        }
        self.active.push_back((notification, now));
    }

    /// Drop everything older than the timeout
    pub fn expire(&mut self, now: Instant) {
        let timeout = self.timeout;
        self.active
            .retain(|(_, shown)| now.saturating_duration_since(*shown) < timeout);
    }

    /// Oldest first
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter().map(|(n, _)| n)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_is_bounded() {
        let mut center = NotificationCenter::new(Duration::from_secs(3), 3);
        for i in 0..5 {
            center.push(Notification::info(format!("n{}", i)));
        }
        let messages: Vec<&str> = center.visible().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["n2", "n3", "n4"]);
    }

    #[test]
    fn test_notifications_expire() {
        let mut center = NotificationCenter::new(Duration::from_millis(3000), 3);
        let start = Instant::now();
        center.push_at(Notification::success("saved"), start);
        center.push_at(Notification::warning("deleted"), start + Duration::from_millis(2000));

        center.expire(start + Duration::from_millis(3500));
        let messages: Vec<&str> = center.visible().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["deleted"]);

        center.expire(start + Duration::from_millis(6000));
        assert!(center.is_empty());
    }
}
