//! Controller timing configuration.

use std::time::Duration;

/// Timings that drive the controller's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// How long the splash screen shows before the first account is provisioned.
    pub splash_delay: Duration,
    /// Period of the recurring inbox poll.
    pub poll_interval: Duration,
    /// How long a notice stays visible.
    pub notice_ttl: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            splash_delay: Duration::from_millis(2500),
            poll_interval: Duration::from_secs(10),
            notice_ttl: Duration::from_secs(3),
        }
    }
}

impl ControllerConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the splash delay.
    #[must_use]
    pub const fn with_splash_delay(mut self, delay: Duration) -> Self {
        self.splash_delay = delay;
        self
    }

    /// Sets the poll interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets how long notices stay visible.
    #[must_use]
    pub const fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }
}
