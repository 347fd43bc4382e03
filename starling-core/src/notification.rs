use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}
impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }
    fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Notifications {
    items: VecDeque<(Notification, Instant)>,
}
impl Notifications {
    pub const TTL: Duration = Duration::from_secs(4);
    const MAX_VISIBLE: usize = 5;

    pub fn push(&mut self, notification: Notification, now: Instant) {
        match notification.level {
            NotificationLevel::Error => tracing::warn!("{}", notification.message),
            _ => tracing::info!("{}", notification.message),
        }
        self.items.push_back((notification, now));
        while self.items.len() > Self::MAX_VISIBLE {
            self.items.pop_front();
        }
    }

    /// Drop every notification older than [`Self::TTL`].
    pub fn expire(&mut self, now: Instant) {
        self.items
            .retain(|(_, created)| now.saturating_duration_since(*created) < Self::TTL);
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter().map(|(n, _)| n)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_expire() {
        let start = Instant::now();
        let mut notifications = Notifications::default();
        notifications.push(Notification::info("one"), start);
        notifications.push(Notification::error("two"), start + Duration::from_secs(3));

        notifications.expire(start + Duration::from_secs(5));
        let messages: Vec<_> = notifications.visible().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, ["two"]);

        notifications.expire(start + Duration::from_secs(8));
        assert!(notifications.is_empty());
    }
}
