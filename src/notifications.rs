//! Transient in-app notifications.
//!
//! A single slot: `show` opens (replacing whatever was showing),
//! `dismiss` closes, and an armed deadline closes it automatically
//! after the configured duration. Both paths converge on the same
//! closed state.

use std::time::{Duration, Instant};

/// Auto-hide duration for an open notification.
pub const AUTO_HIDE: Duration = Duration::from_millis(6000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Success => "success",
        }
    }
}

/// The user-facing message currently in the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub open: bool,
    pub message: String,
    pub severity: Severity,
}

impl Default for Notification {
    fn default() -> Self {
        Self {
            open: false,
            message: String::new(),
            severity: Severity::Info,
        }
    }
}

/// Holds at most one visible notification at a time.
///
/// A `show` while one is open replaces its content and re-arms the
/// auto-hide deadline; there is no stacking.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    current: Notification,
    deadline: Option<Instant>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the notification slot with the given content.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        self.show_at(message, severity, Instant::now());
    }

    /// Close the notification. Safe to call when already closed.
    pub fn dismiss(&mut self) {
        self.current.open = false;
        self.deadline = None;
    }

    /// Expire the auto-hide deadline if it has passed. Called once per
    /// event-loop tick.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// The notification currently in the slot (open or not).
    pub fn current(&self) -> &Notification {
        &self.current
    }

    pub fn is_open(&self) -> bool {
        self.current.open
    }

    fn show_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.current = Notification {
            open: true,
            message: message.into(),
            severity,
        };
        self.deadline = Some(now + AUTO_HIDE);
    }

    fn tick_at(&mut self, now: Instant) {
        if let Some(deadline) = self.deadline {
            if now >= deadline {
                self.dismiss();
            }
        }
    }
}
