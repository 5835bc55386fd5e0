//! Terminal rendering.
//!
//! Every view renders a [`Snapshot`] to a string; the caller decides where
//! it goes.

mod details;
mod home;
mod toast;

use chrono::{DateTime, Local, Utc};
use tempmail_core::{Snapshot, View};

use details::view_details;
use home::view_home;
pub use toast::view_notice;

/// Shown until the first account is ready.
pub const SPLASH: &str = "tempmail: generating your disposable address...";

/// Renders the screen for `snapshot`.
#[must_use]
pub fn view_screen(snapshot: &Snapshot) -> String {
    if snapshot.splash {
        return SPLASH.to_string();
    }
    match (snapshot.view, snapshot.selected.as_ref()) {
        (View::Details, Some(details)) => view_details(details),
        _ => view_home(snapshot),
    }
}

/// Formats a timestamp in the local timezone.
///
/// Produces strings like "Thu, 15 Jan 2026 14:31:43".
#[must_use]
pub fn format_date_local(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format("%a, %d %b %Y %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splash_first() {
        let snapshot = Snapshot::default();
        assert_eq!(view_screen(&snapshot), SPLASH);
    }

    #[test]
    fn test_details_without_selection_falls_back_to_home() {
        let snapshot = Snapshot {
            splash: false,
            view: View::Details,
            ..Snapshot::default()
        };
        assert!(view_screen(&snapshot).contains("Inbox"));
    }

    #[test]
    fn test_format_date_local_shape() {
        let date = DateTime::parse_from_rfc3339("2026-01-15T19:31:43Z")
            .map(|d| d.with_timezone(&Utc))
            .ok();
        let formatted = date.as_ref().map(format_date_local).unwrap_or_default();
        assert!(formatted.contains("Jan 2026"));
        assert_eq!(formatted.len(), "Thu, 15 Jan 2026 14:31:43".len());
    }
}
