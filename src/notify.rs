//! User-facing notification queue.
//!
//! Stores push one entry per noteworthy outcome (currently only fetch
//! failures); the view layer drains the queue and renders toasts.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// A single pending notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// In-memory notification buffer shared between stores and the view layer.
pub struct NotificationCenter {
    buffer: Mutex<Vec<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            buffer: Mutex::new(Vec::new()),
        }
    }

    pub fn push_info(&self, message: impl Into<String>) {
        self.push(Level::Info, message);
    }

    pub fn push_error(&self, message: impl Into<String>) {
        self.push(Level::Error, message);
    }

    fn push(&self, level: Level, message: impl Into<String>) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.push(Notification {
                level,
                message: message.into(),
                at: Utc::now(),
            });
        }
    }

    /// Take all pending notifications, leaving the queue empty.
    pub fn drain(&self) -> Vec<Notification> {
        self.buffer
            .lock()
            .map(|mut buf| buf.drain(..).collect())
            .unwrap_or_default()
    }

    /// Pending notification count.
    pub fn len(&self) -> usize {
        self.buffer.lock().map(|buf| buf.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
