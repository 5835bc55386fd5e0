//! Error types for the core library.

use thiserror::Error;

/// Fallback text for failures that carry no message.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Errors that can occur in core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The service rejected the held account's token.
    #[error("Session expired")]
    AuthExpired,

    /// Any other mailbox service failure.
    #[error("{0}")]
    Service(String),

    /// The controller has shut down and no longer accepts actions.
    #[error("Controller has shut down")]
    Closed,
}

impl Error {
    /// Text shown to the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Service(message) if message.trim().is_empty() => UNKNOWN_ERROR.to_string(),
            other => other.to_string(),
        }
    }

    /// Converts an account creation failure.
    ///
    /// Creation is unauthenticated, so a 401 there is an ordinary service
    /// failure and never [`Error::AuthExpired`].
    #[must_use]
    pub fn from_provision(error: tempmail_api::Error) -> Self {
        Self::Service(error.to_string())
    }
}

impl From<tempmail_api::Error> for Error {
    fn from(error: tempmail_api::Error) -> Self {
        if error.is_unauthorized() {
            Self::AuthExpired
        } else {
            Self::Service(error.to_string())
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_auth_expired() {
        assert_eq!(
            Error::from(tempmail_api::Error::Unauthorized),
            Error::AuthExpired
        );
    }

    #[test]
    fn test_other_failures_keep_message() {
        let err = Error::from(tempmail_api::Error::Status {
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(err, Error::Service("Service returned 500: boom".into()));
        assert_eq!(err.user_message(), "Service returned 500: boom");
    }

    #[test]
    fn test_unauthorized_create_is_service_failure() {
        let err = Error::from_provision(tempmail_api::Error::Unauthorized);
        assert_eq!(
            err,
            Error::Service("Unauthorized: token rejected by the service".into())
        );
        assert_ne!(err.user_message(), "Session expired");
    }

    #[test]
    fn test_empty_message_falls_back() {
        assert_eq!(Error::Service(String::new()).user_message(), UNKNOWN_ERROR);
    }
}
