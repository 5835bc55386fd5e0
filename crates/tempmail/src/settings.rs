//! Application settings.

use std::path::PathBuf;
use std::time::Duration;

use tempmail_api::{ClientConfig, DEFAULT_BASE_URL};
use tempmail_core::ControllerConfig;

/// Environment variable overriding [`AppSettings::api_base_url`].
pub const API_URL_ENV: &str = "TEMPMAIL_API_URL";

/// Application settings read at startup.
///
/// Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Base URL of the mailbox provider.
    pub api_base_url: String,
    /// Per-request timeout.
    pub request_timeout_secs: u64,
    /// Inbox poll period.
    pub poll_interval_secs: u64,
    /// Splash screen duration.
    pub splash_delay_ms: u64,
    /// How long a notice stays visible.
    pub notice_ttl_ms: u64,
    /// Countdown after which the shell reports the address as expired.
    pub address_ttl_secs: u64,
    /// Mirror notices as desktop notifications.
    pub desktop_notifications: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            poll_interval_secs: 10,
            splash_delay_ms: 2500,
            notice_ttl_ms: 3000,
            address_ttl_secs: 600,
            desktop_notifications: false,
        }
    }
}

impl AppSettings {
    /// Parses settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    /// Replaces the base URL with `url` when it is set and non-empty.
    #[must_use]
    pub fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        self
    }

    /// Replaces a zero poll interval with the default.
    ///
    /// A zero period would poll the provider continuously.
    #[must_use]
    pub fn validated(mut self) -> Self {
        if self.poll_interval_secs == 0 {
            let default = Self::default().poll_interval_secs;
            tracing::warn!(
                "poll_interval_secs must be non-zero, using the default of {}s",
                default
            );
            self.poll_interval_secs = default;
        }
        self
    }

    /// Timings for the controller.
    #[must_use]
    pub const fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            splash_delay: Duration::from_millis(self.splash_delay_ms),
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            notice_ttl: Duration::from_millis(self.notice_ttl_ms),
        }
    }

    /// Connection settings for the mailbox client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or timeout is invalid.
    pub fn client_config(&self) -> tempmail_api::Result<ClientConfig> {
        ClientConfig::builder(self.api_base_url.clone())
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .build()
    }

    /// Address countdown duration.
    #[must_use]
    pub const fn address_ttl(&self) -> Duration {
        Duration::from_secs(self.address_ttl_secs)
    }
}

/// Location of the settings file.
pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tempmail")
        .join("settings.json")
}

/// Loads settings from the settings file, then applies the environment
/// override.
///
/// A missing file yields defaults. An unreadable or malformed file is logged
/// and defaults are used.
pub async fn load_settings() -> AppSettings {
    let settings_path = settings_path();

    let settings = match tokio::fs::read_to_string(&settings_path).await {
        Ok(contents) => AppSettings::from_json(&contents).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed settings file {:?}: {}", settings_path, e);
            AppSettings::default()
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppSettings::default(),
        Err(e) => {
            tracing::warn!("Failed to read settings file {:?}: {}", settings_path, e);
            AppSettings::default()
        }
    };

    settings
        .validated()
        .with_api_url_override(std::env::var(API_URL_ENV).ok())
}
