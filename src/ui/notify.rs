//! Notification surface - transient queued messages
//!
//! Every dispatcher action pushes into this queue; the CLI flushes it after
//! the action completes. The queue is bounded: past capacity the oldest
//! entry is dropped, mirroring auto-dismissing toasts. Never persisted.

use chrono::{DateTime, Utc};
use colored::Colorize;
use std::collections::VecDeque;

const DEFAULT_CAPACITY: usize = 8;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Error,
}

impl Level {
    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Level::Info => "ℹ",
            Level::Success => "✔",
            Level::Error => "✖",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Success => "success",
            Level::Error => "error",
        }
    }
}

/// One transient message
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: Utc::now(),
        }
    }

    /// Format for terminal display
    pub fn format(&self) -> String {
        let line = format!("{} {}", self.level.symbol(), self.message);
        match self.level {
            Level::Info => line.cyan().to_string(),
            Level::Success => line.green().to_string(),
            Level::Error => line.red().to_string(),
        }
    }
}

/// Bounded FIFO of notifications
#[derive(Debug)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    capacity: usize,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::new(Level::Info, message));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::new(Level::Success, message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::new(Level::Error, message));
    }

    fn push(&mut self, notification: Notification) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    /// Take all pending notifications, oldest first
    pub fn drain(&mut self) -> Vec<Notification> {
        self.items.drain(..).collect()
    }

    /// Print and clear all pending notifications
    pub fn flush(&mut self) {
        for notification in self.drain() {
            println!("{}", notification.format());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_drain_order() {
        let mut queue = NotificationQueue::new();
        queue.info("first");
        queue.success("second");
        queue.error("third");

        let drained = queue.drain();
        assert_eq!(drained.len(), 3);
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[2].level, Level::Error);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut queue = NotificationQueue::with_capacity(2);
        queue.info("one");
        queue.info("two");
        queue.info("three");

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "two");
        assert_eq!(drained[1].message, "three");
    }

    #[test]
    fn test_level_symbols() {
        assert_eq!(Level::Success.symbol(), "✔");
        assert_eq!(Level::Error.name(), "error");
    }
}
