//! Wire types exchanged with the mailbox service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A domain on which the service accepts new addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// Domain identifier.
    pub id: String,
    /// Domain name (e.g. `example.com`).
    pub domain: String,
    /// Whether the domain currently accepts mail.
    pub is_active: bool,
    /// Whether the domain is reserved for private use.
    #[serde(default)]
    pub is_private: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl Domain {
    /// Returns true if new public accounts can be registered on this domain.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        self.is_active && !self.is_private
    }
}

/// A provisioned disposable account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account identifier issued by the service.
    pub id: String,
    /// Email address.
    pub address: String,
    /// Bearer token for inbox operations.
    pub token: String,
    /// Password chosen at registration, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Account {
    /// Returns true if the account carries a usable bearer token.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

/// A mailbox participant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Email address.
    pub address: String,
    /// Display name (may be empty).
    #[serde(default)]
    pub name: String,
}

impl Address {
    /// Returns the display name, or the address when the name is empty.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.address
        } else {
            &self.name
        }
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name.trim().is_empty() {
            write!(f, "{}", self.address)
        } else {
            write!(f, "{} <{}>", self.name, self.address)
        }
    }
}

/// Summary of a received message, as listed in the inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message identifier.
    pub id: String,
    /// Sender.
    pub from: Address,
    /// Recipients.
    #[serde(default)]
    pub to: Vec<Address>,
    /// Subject line.
    #[serde(default)]
    pub subject: String,
    /// Short preview of the body.
    #[serde(default)]
    pub intro: String,
    /// Whether the message has been opened.
    #[serde(default)]
    pub seen: bool,
    /// When the message was received.
    pub created_at: DateTime<Utc>,
}

/// A message with its full body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDetails {
    /// Summary fields.
    #[serde(flatten)]
    pub summary: Message,
    /// HTML body parts, in order.
    #[serde(default)]
    pub html: Vec<String>,
    /// Plain-text body.
    #[serde(default)]
    pub text: String,
}

impl std::ops::Deref for MessageDetails {
    type Target = Message;

    fn deref(&self) -> &Self::Target {
        &self.summary
    }
}

/// A list response.
///
/// The service answers with a Hydra collection (`{"hydra:member": [...]}`)
/// by default and a bare array when asked for plain JSON; both are accepted.
#[derive(Debug, Clone)]
pub struct Collection<T>(pub Vec<T>);

impl<T> Collection<T> {
    /// Unwraps the members.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Collection<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Hydra {
                #[serde(rename = "hydra:member")]
                member: Vec<T>,
            },
            Plain(Vec<T>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Hydra { member } => Self(member),
            Repr::Plain(items) => Self(items),
        })
    }
}

/// Body of account registration and token requests.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Credentials<'a> {
    pub address: &'a str,
    pub password: &'a str,
}

/// Response to account registration.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RegisteredAccount {
    pub id: String,
    pub address: String,
}

/// Response to a token request.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new)]
mod tests {
    use super::*;

    const MESSAGE_JSON: &str = r#"{
        "@id": "/messages/64f1",
        "@type": "Message",
        "id": "64f1",
        "accountId": "/accounts/a1",
        "msgid": "<abc@example.com>",
        "from": {"address": "alice@example.com", "name": "Alice"},
        "to": [{"address": "box@dispostable.test", "name": ""}],
        "subject": "Hello",
        "intro": "Just saying hi",
        "seen": false,
        "isDeleted": false,
        "hasAttachments": false,
        "size": 1234,
        "downloadUrl": "/messages/64f1/download",
        "createdAt": "2024-05-01T10:15:00+00:00",
        "updatedAt": "2024-05-01T10:15:01+00:00"
    }"#;

    #[test]
    fn test_message_deserialization_ignores_extra_fields() {
        let msg: Message = serde_json::from_str(MESSAGE_JSON).unwrap();
        assert_eq!(msg.id, "64f1");
        assert_eq!(msg.from.display_name(), "Alice");
        assert_eq!(msg.to.len(), 1);
        assert_eq!(msg.to[0].display_name(), "box@dispostable.test");
        assert!(!msg.seen);
        assert_eq!(msg.created_at.to_rfc3339(), "2024-05-01T10:15:00+00:00");
    }

    #[test]
    fn test_message_details_flatten() {
        let json = r#"{
            "id": "m1",
            "from": {"address": "bob@example.com", "name": "Bob"},
            "to": [],
            "subject": "Report",
            "intro": "See attached",
            "seen": true,
            "createdAt": "2024-05-02T08:00:00Z",
            "html": ["<p>part one</p>", "<p>part two</p>"],
            "text": "part one\npart two"
        }"#;
        let details: MessageDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.subject, "Report");
        assert_eq!(details.html.len(), 2);
        assert_eq!(details.text, "part one\npart two");
        assert!(details.seen);
    }

    #[test]
    fn test_collection_hydra_and_plain() {
        let hydra = format!(r#"{{"hydra:member": [{MESSAGE_JSON}], "hydra:totalItems": 1}}"#);
        let parsed: Collection<Message> = serde_json::from_str(&hydra).unwrap();
        assert_eq!(parsed.into_inner().len(), 1);

        let plain = format!("[{MESSAGE_JSON}, {MESSAGE_JSON}]");
        let parsed: Collection<Message> = serde_json::from_str(&plain).unwrap();
        assert_eq!(parsed.into_inner().len(), 2);
    }

    #[test]
    fn test_domain_usable() {
        let json = r#"{
            "id": "d1", "domain": "dispostable.test", "isActive": true,
            "isPrivate": false,
            "createdAt": "2024-01-01T00:00:00+00:00",
            "updatedAt": "2024-01-01T00:00:00+00:00"
        }"#;
        let mut domain: Domain = serde_json::from_str(json).unwrap();
        assert!(domain.is_usable());
        domain.is_private = true;
        assert!(!domain.is_usable());
    }

    #[test]
    fn test_address_display() {
        let named = Address {
            address: "a@example.com".into(),
            name: "A".into(),
        };
        let bare = Address {
            address: "b@example.com".into(),
            name: String::new(),
        };
        assert_eq!(named.to_string(), "A <a@example.com>");
        assert_eq!(bare.to_string(), "b@example.com");
    }
}
