//! Controller state as seen by the shell.

use tempmail_api::{Account, Message, MessageDetails};

use crate::notice::Notice;

/// Which screen the shell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Address and message list.
    #[default]
    Home,
    /// A single opened message.
    Details,
}

/// Immutable copy of the controller state, published after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)] // Mirrors independent UI flags
pub struct Snapshot {
    /// Splash screen still showing (first provisioning not finished).
    pub splash: bool,
    /// Held account, if any.
    pub account: Option<Account>,
    /// Inbox, newest first.
    pub messages: Vec<Message>,
    /// Currently opened message.
    pub selected: Option<MessageDetails>,
    /// Current screen.
    pub view: View,
    /// A remote operation is in progress.
    pub loading: bool,
    /// The held account is being deleted and replaced.
    pub deleting: bool,
    /// Notice currently on screen.
    pub notice: Option<Notice>,
    /// A recurring poll is active.
    pub polling: bool,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            splash: true,
            account: None,
            messages: Vec::new(),
            selected: None,
            view: View::Home,
            loading: false,
            deleting: false,
            notice: None,
            polling: false,
        }
    }
}

impl Snapshot {
    /// Address of the held account.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.account.as_ref().map(|a| a.address.as_str())
    }

    /// Number of unread messages.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.seen).count()
    }
}
