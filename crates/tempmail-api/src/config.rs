//! Client configuration types.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Base URL of the public mail.tm service.
pub const DEFAULT_BASE_URL: &str = "https://api.mail.tm";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Mailbox service client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (always ends with `/`).
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration for the given base URL with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or not HTTP(S).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        ClientConfigBuilder::new(base_url).build()
    }

    /// Creates a configuration for the public mail.tm service.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in URL fails to parse.
    pub fn mail_tm() -> Result<Self> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Creates a configuration builder.
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(base_url)
    }

    /// Resolves an API path (without leading slash) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

/// Builder for client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, not HTTP(S), or the
    /// timeout is zero.
    pub fn build(self) -> Result<ClientConfig> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "unsupported URL scheme: {}",
                base_url.scheme()
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig("timeout must be non-zero".into()));
        }

        Ok(ClientConfig {
            base_url,
            timeout: self.timeout,
            user_agent: self.user_agent.unwrap_or_else(|| {
                format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
            }),
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_tm_defaults() {
        let config = ClientConfig::mail_tm().unwrap();
        assert_eq!(config.base_url.as_str(), "https://api.mail.tm/");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.user_agent.starts_with("tempmail-api/"));
    }

    #[test]
    fn test_endpoint_join_keeps_base_path() {
        let config = ClientConfig::new("http://127.0.0.1:8080/api").unwrap();
        assert_eq!(
            config.endpoint("/messages").unwrap().as_str(),
            "http://127.0.0.1:8080/api/messages"
        );
        assert_eq!(
            config.endpoint("accounts/abc").unwrap().as_str(),
            "http://127.0.0.1:8080/api/accounts/abc"
        );
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder("https://mail.example.com")
            .timeout(Duration::from_secs(5))
            .user_agent("test-agent")
            .build()
            .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_rejects_bad_scheme() {
        let err = ClientConfig::new("ftp://mail.example.com").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = ClientConfig::builder(DEFAULT_BASE_URL)
            .timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_garbage_url() {
        assert!(matches!(
            ClientConfig::new("not a url").unwrap_err(),
            Error::Url(_)
        ));
    }
}
