//! Error types for mailbox service operations.

use reqwest::StatusCode;

/// Result type alias for mailbox service operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Mailbox service error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The bearer token was rejected (HTTP 401).
    #[error("Unauthorized: token rejected by the service")]
    Unauthorized,

    /// Any other non-success response.
    #[error("Service returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The service offered no public, active domain to register on.
    #[error("No active domain available for new accounts")]
    NoDomains,

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Creates an error from a non-success status and its response body.
    #[must_use]
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            return Self::Unauthorized;
        }
        Self::Status {
            status: status.as_u16(),
            message: extract_message(body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            }),
        }
    }

    /// Returns true if the service rejected the bearer token.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns the HTTP status code, if the error came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Pulls a human-readable message out of a Hydra/Problem+JSON error body.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["hydra:description", "detail", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_from_status() {
        let err = Error::from_status(StatusCode::UNAUTHORIZED, "");
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_hydra_description_used() {
        let body = r#"{"@type":"ConstraintViolationList","hydra:description":"address: This value is already used."}"#;
        let err = Error::from_status(StatusCode::UNPROCESSABLE_ENTITY, body);
        match err {
            Error::Status { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "address: This value is already used.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_falls_back_to_reason_phrase() {
        let err = Error::from_status(StatusCode::TOO_MANY_REQUESTS, "not json");
        assert_eq!(err.to_string(), "Service returned 429: Too Many Requests");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_detail_field() {
        let err = Error::from_status(StatusCode::NOT_FOUND, r#"{"detail":"Not Found"}"#);
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().ends_with("Not Found"));
    }
}
