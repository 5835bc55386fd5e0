//! Notice lines.

use tempmail_core::{Notice, NoticeKind};

/// Renders a notice as a single tagged line.
#[must_use]
pub fn view_notice(notice: &Notice) -> String {
    let tag = match notice.kind {
        NoticeKind::Success => "[ok]",
        NoticeKind::Error => "[error]",
    };
    format!("{tag} {}", notice.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        let ok = Notice {
            seq: 1,
            text: "Copied to clipboard!".to_string(),
            kind: NoticeKind::Success,
        };
        assert_eq!(view_notice(&ok), "[ok] Copied to clipboard!");

        let err = Notice {
            seq: 2,
            text: "Session expired. Generating new email...".to_string(),
            kind: NoticeKind::Error,
        };
        assert_eq!(
            view_notice(&err),
            "[error] Session expired. Generating new email..."
        );
    }
}
