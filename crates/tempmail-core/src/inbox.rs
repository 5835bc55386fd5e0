//! Inbox ordering and change detection.

use tempmail_api::Message;

/// Sorts messages newest first by creation time.
///
/// The sort is stable, so messages with equal timestamps keep the order the
/// service returned them in.
pub fn sort_newest_first(messages: &mut [Message]) {
    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Number of messages gained between two synchronizations.
///
/// Never negative: a shrinking inbox reports zero.
#[must_use]
pub const fn new_message_count(previous: usize, current: usize) -> usize {
    current.saturating_sub(previous)
}
