//! Transient notifications for brief, non-blocking feedback.
//!
//! Toasts expire on their own; the presentation layer decides how to show
//! them (the terminal binary prints them to stderr).

use std::time::{Duration, Instant};

/// Types of toast notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

impl ToastLevel {
    /// Get the icon for this toast level
    pub fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Info => "ℹ",
            ToastLevel::Warning => "⚠",
            ToastLevel::Error => "✗",
        }
    }
}

/// A single toast notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Error)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// Queue of active toasts
#[derive(Debug)]
pub struct ToastManager {
    toasts: Vec<Toast>,
    default_duration: Duration,
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

impl ToastManager {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            default_duration,
        }
    }

    pub fn add(&mut self, toast: Toast) {
        log::debug!("Toast [{:?}]: {}", toast.level, toast.message);
        self.toasts.push(toast);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.add(Toast::info(message).with_duration(self.default_duration));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.add(Toast::warning(message).with_duration(self.default_duration));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.add(Toast::error(message).with_duration(self.default_duration));
    }

    /// Remove expired toasts
    pub fn cleanup(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    pub fn has_toasts(&self) -> bool {
        !self.toasts.is_empty()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Hand every pending toast to the caller, emptying the queue
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }
}
