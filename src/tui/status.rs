//! Status bar messages.

use std::time::{Duration, Instant};

/// How long a message stays in the status bar.
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(6);

/// Temporary status bar message with optional auto-clear.
///
/// Action results (exports, change log writes, clipboard copies) land here
/// instead of stdout while the dashboard owns the terminal.
#[derive(Debug, Clone, Default)]
pub struct StatusMessage {
    message: Option<String>,
    is_error: bool,
    set_at: Option<Instant>,
    auto_clear_after: Option<Duration>,
}

impl StatusMessage {
    /// Status line that never clears on its own.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status line that clears after `duration`.
    #[must_use]
    pub const fn with_auto_clear(duration: Duration) -> Self {
        Self {
            message: None,
            is_error: false,
            set_at: None,
            auto_clear_after: Some(duration),
        }
    }

    /// Show an informational message.
    pub fn set(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
        self.set_at = Some(Instant::now());
    }

    /// Show a failure message.
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.set(msg);
        self.is_error = true;
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.is_error = false;
        self.set_at = None;
    }

    /// Current message, expiring it first if its time is up.
    pub fn message(&mut self) -> Option<&str> {
        if let (Some(set_at), Some(duration)) = (self.set_at, self.auto_clear_after) {
            if set_at.elapsed() >= duration {
                self.clear();
            }
        }
        self.message.as_deref()
    }

    /// Current message without checking expiry.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.is_error
    }
}
