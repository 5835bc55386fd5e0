//! Address and inbox view.

use std::fmt::Write;

use tempmail_core::{Message, Snapshot};

use super::format_date_local;

/// Longest intro shown in the list, in characters.
const INTRO_MAX_CHARS: usize = 60;

/// Renders the address header and the numbered message list.
#[must_use]
pub fn view_home(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    let address = snapshot.address().unwrap_or("(no address)");
    let _ = writeln!(out, "Address: {address}");

    if snapshot.deleting {
        out.push_str("Deleting account and generating a new address...\n");
    } else if snapshot.loading {
        out.push_str("Loading...\n");
    }

    let _ = writeln!(
        out,
        "Inbox ({} messages, {} unread)",
        snapshot.messages.len(),
        snapshot.unread_count()
    );

    if snapshot.messages.is_empty() {
        out.push_str("  No messages yet. Waiting for incoming mail...");
        return out;
    }

    for (i, message) in snapshot.messages.iter().enumerate() {
        view_row(&mut out, i + 1, message);
    }
    out.truncate(out.trim_end().len());
    out
}

fn view_row(out: &mut String, position: usize, message: &Message) {
    let marker = if message.seen { ' ' } else { '*' };
    let subject = if message.subject.is_empty() {
        "(no subject)"
    } else {
        message.subject.as_str()
    };
    let _ = writeln!(
        out,
        "{position:>3}. {marker} {} | {subject} | {}",
        message.from.display_name(),
        format_date_local(&message.created_at)
    );
    if !message.intro.is_empty() {
        let _ = writeln!(out, "        {}", truncate_chars(&message.intro, INTRO_MAX_CHARS));
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
