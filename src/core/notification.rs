//! Transient notifications shown in the corner of the screen

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::debug;

use super::NotifyLevel;

pub const DEFAULT_TTL: Duration = Duration::from_secs(5);
pub const DEFAULT_CAPACITY: usize = 5;

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub level: NotifyLevel,
    pub text: String,
    pub created: Instant,
}

/// Bounded queue of notifications that dismiss themselves after a delay.
///
/// Several notifications can be visible at once. When the queue is full the
/// oldest one is evicted to make room.
#[derive(Debug)]
pub struct NotificationCenter {
    items: VecDeque<Notification>,
    ttl: Duration,
    capacity: usize,
    next_id: u64,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_CAPACITY)
    }
}

impl NotificationCenter {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            ttl,
            capacity,
            next_id: 1,
        }
    }

    pub fn push(&mut self, level: NotifyLevel, text: impl Into<String>) -> u64 {
        self.push_at(level, text, Instant::now())
    }

    pub fn push_at(&mut self, level: NotifyLevel, text: impl Into<String>, now: Instant) -> u64 {
        let text = text.into();
        debug!(level = level.label(), %text, "notification");
        while self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        let id = self.next_id;
        self.next_id += 1;
        self.items.push_back(Notification {
            id,
            level,
            text,
            created: now,
        });
        id
    }

    /// Drop every notification older than the TTL
    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items
            .retain(|item| now.saturating_duration_since(item.created) < ttl);
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn dismiss_all(&mut self) {
        self.items.clear();
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_expire_after_ttl() {
        let mut center = NotificationCenter::new(Duration::from_secs(5), 5);
        let start = Instant::now();
        center.push_at(NotifyLevel::Info, "first", start);
        center.push_at(NotifyLevel::Error, "second", start + Duration::from_secs(3));

        center.expire(start + Duration::from_millis(4_999));
        assert_eq!(center.len(), 2);

        center.expire(start + Duration::from_secs(5));
        let texts: Vec<&str> = center.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["second"]);

        center.expire(start + Duration::from_secs(8));
        assert!(center.is_empty());
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut center = NotificationCenter::new(Duration::from_secs(5), 3);
        let now = Instant::now();
        for i in 0..10 {
            center.push_at(NotifyLevel::Info, format!("n{i}"), now);
            assert!(center.len() <= 3);
        }
        let texts: Vec<&str> = center.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["n7", "n8", "n9"]);
    }

    #[test]
    fn dismiss_by_id() {
        let mut center = NotificationCenter::default();
        let a = center.push(NotifyLevel::Info, "a");
        let b = center.push(NotifyLevel::Success, "b");
        assert!(center.dismiss(a));
        assert!(!center.dismiss(a));
        assert_eq!(center.latest().map(|n| n.id), Some(b));
    }

    #[test]
    fn zero_capacity_still_holds_one() {
        let mut center = NotificationCenter::new(DEFAULT_TTL, 0);
        center.push(NotifyLevel::Info, "a");
        center.push(NotifyLevel::Info, "b");
        assert_eq!(center.len(), 1);
    }
}
