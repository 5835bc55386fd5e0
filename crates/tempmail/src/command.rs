//! Commands typed at the prompt.

use tempmail_core::Snapshot;

/// A command read from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// New address, old account left on the server (`n`).
    NewAccount,
    /// Delete the account, then get a new address (`d`).
    DeleteAndNew,
    /// Refresh the inbox (`r`).
    Refresh,
    /// Open a message by list position or id (`o <n|id>`).
    Open(MessageRef),
    /// Back to the inbox (`b`).
    Back,
    /// Print the address for copying (`c`).
    Copy,
    /// Show the command list (`h`).
    Help,
    /// Exit (`q`).
    Quit,
    /// Anything else.
    Unknown(String),
}

/// How an `open` command names its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageRef {
    /// 1-based position in the displayed list.
    Position(usize),
    /// Provider message id.
    Id(String),
}

impl MessageRef {
    /// Resolves to a message id in the current inbox.
    ///
    /// Positions outside the list resolve to `None`. Ids are passed through
    /// unchecked; the service decides whether they exist.
    #[must_use]
    pub fn resolve(&self, snapshot: &Snapshot) -> Option<String> {
        match self {
            Self::Position(n) => n
                .checked_sub(1)
                .and_then(|i| snapshot.messages.get(i))
                .map(|m| m.id.clone()),
            Self::Id(id) => Some(id.clone()),
        }
    }
}

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  n          new address
  d          delete account and get a new address
  r          refresh inbox
  o <n|id>   open message by number or id
  b          back to inbox
  c          copy address
  h          show this help
  q          quit";

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let word = parts.next()?;
        let arg = parts.next();

        let command = match (word.to_ascii_lowercase().as_str(), arg) {
            ("n" | "new", None) => Self::NewAccount,
            ("d" | "delete", None) => Self::DeleteAndNew,
            ("r" | "refresh", None) => Self::Refresh,
            ("o" | "open", Some(target)) if parts.next().is_none() => {
                Self::Open(target.parse().map_or_else(
                    |_| MessageRef::Id(target.to_string()),
                    MessageRef::Position,
                ))
            }
            ("b" | "back", None) => Self::Back,
            ("c" | "copy", None) => Self::Copy,
            ("h" | "help" | "?", None) => Self::Help,
            ("q" | "quit" | "exit", None) => Self::Quit,
            _ => Self::Unknown(line.trim().to_string()),
        };
        Some(command)
    }
}
