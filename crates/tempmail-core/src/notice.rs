//! Transient user notifications.

/// Shown after a first-time account is provisioned.
pub const ACCOUNT_CREATED: &str = "New email generated!";
/// Shown after the held account was deleted and replaced.
pub const ACCOUNT_REPLACED: &str = "Account deleted. New email generated!";
/// Shown when the held token is rejected and re-provisioning starts.
pub const SESSION_EXPIRED: &str = "Session expired. Generating new email...";
/// Shown when the shell copied the address.
pub const COPIED: &str = "Copied to clipboard!";
/// Shown when the shell's address countdown runs out.
pub const TIMER_EXPIRED: &str = "Timer expired! Extend or get a new email.";

/// Text for `count` newly arrived messages.
#[must_use]
pub fn new_messages(count: usize) -> String {
    format!("You have {count} new email(s)!")
}

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Something worked.
    Success,
    /// Something failed.
    Error,
}

/// A notification the shell shows briefly, then dismisses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Monotonic sequence number, unique per controller.
    pub seq: u64,
    /// Text to display.
    pub text: String,
    /// Severity.
    pub kind: NoticeKind,
}

impl Notice {
    /// Returns true for error notices.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, NoticeKind::Error)
    }
}
