//! Opened message view.

use std::fmt::Write;

use tempmail_core::MessageDetails;

use super::format_date_local;

/// Renders headers and body of an opened message.
///
/// The plain text body is preferred; when it is empty the HTML parts are
/// converted to Markdown.
#[must_use]
pub fn view_details(details: &MessageDetails) -> String {
    let mut out = String::new();
    let subject = if details.subject.is_empty() {
        "(no subject)"
    } else {
        details.subject.as_str()
    };
    let to = details
        .to
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let _ = writeln!(out, "Subject: {subject}");
    let _ = writeln!(out, "From:    {}", details.from);
    let _ = writeln!(out, "To:      {to}");
    let _ = writeln!(out, "Date:    {}", format_date_local(&details.created_at));
    out.push('\n');
    out.push_str(body_text(details).trim_end());
    out.push_str("\n\n(b: back to inbox)");
    out
}

fn body_text(details: &MessageDetails) -> String {
    if !details.text.trim().is_empty() {
        return details.text.clone();
    }
    if details.html.is_empty() {
        return "(empty message)".to_string();
    }
    let html = details.html.concat();
    htmd::convert(&html).unwrap_or_else(|e| {
        tracing::warn!("Failed to convert HTML body: {}", e);
        html
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempmail_core::{Address, Message};

    fn details(text: &str, html: Vec<&str>) -> MessageDetails {
        MessageDetails {
            summary: Message {
                id: "m1".to_string(),
                from: Address {
                    address: "alice@example.com".to_string(),
                    name: "Alice".to_string(),
                },
                to: vec![Address {
                    address: "k3x9q@dispostable.test".to_string(),
                    name: String::new(),
                }],
                subject: "Verify your email".to_string(),
                intro: String::new(),
                seen: false,
                created_at: Utc::now(),
            },
            html: html.into_iter().map(String::from).collect(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_headers() {
        let out = view_details(&details("Hi", Vec::new()));
        assert!(out.starts_with("Subject: Verify your email\n"));
        assert!(out.contains("k3x9q@dispostable.test"));
        assert!(out.contains("alice@example.com"));
        assert!(out.contains("Date:    "));
    }

    #[test]
    fn test_prefers_text_body() {
        let out = view_details(&details("Your code is 1234", vec!["<p>ignored</p>"]));
        assert!(out.contains("Your code is 1234"));
        assert!(!out.contains("ignored"));
    }

    #[test]
    fn test_html_fallback() {
        let out = view_details(&details("", vec!["<p>Your code is <b>1234</b></p>"]));
        assert!(out.contains("Your code is"));
        assert!(out.contains("1234"));
        assert!(!out.contains("<p>"));
    }

    #[test]
    fn test_empty_message() {
        let out = view_details(&details("  ", Vec::new()));
        assert!(out.contains("(empty message)"));
    }
}
