//! Transient notification (toast) state.

use std::time::{Duration, Instant};

use evalbox_core::eval::{Notice, Severity};

#[derive(Debug, Clone, Default)]
pub struct NotificationState {
    pub visible: bool,
    pub message: String,
    pub severity: Severity,
    shown_at: Option<Instant>,
}

impl NotificationState {
    pub fn show(&mut self, notice: Notice, now: Instant) {
        self.visible = true;
        self.message = notice.message;
        self.severity = notice.severity;
        self.shown_at = Some(now);
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
        self.shown_at = None;
    }

    /// Hides the notification once `timeout` has elapsed. `None` never expires.
    pub fn expire(&mut self, now: Instant, timeout: Option<Duration>) {
        if let (true, Some(shown_at), Some(timeout)) = (self.visible, self.shown_at, timeout)
            && now.saturating_duration_since(shown_at) >= timeout
        {
            self.dismiss();
        }
    }
}
