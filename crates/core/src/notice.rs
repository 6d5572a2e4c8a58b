//! Transient user-facing notifications.

use std::time::{Duration, Instant};

/// How long a notice stays visible unless configured otherwise.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

/// Styling of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Operation completed.
    Success,
    /// Operation refused or failed.
    Error,
}

/// A message that dismisses itself once its time is up.
#[derive(Debug, Clone)]
pub struct Notice {
    /// Text shown to the user.
    pub message: String,
    /// Success or error styling.
    pub kind: NoticeKind,
    shown_at: Instant,
}

impl Notice {
    /// Success notice shown from `now`.
    pub fn success(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Success,
            shown_at: now,
        }
    }

    /// Error notice shown from `now`.
    pub fn error(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
            shown_at: now,
        }
    }

    /// Whether the notice should be dismissed at `now`.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) >= ttl
    }
}
