//! Recurring inbox poll.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Shortest period a poll can be armed with.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Owned handle to the single recurring poll.
///
/// [`arm`](Self::arm) and [`disarm`](Self::disarm) are the only mutators.
/// Arming always tears down the previous poll first, so at most one poll is
/// ever active. Dropping the handle cancels the poll.
#[derive(Debug, Default)]
pub struct PollHandle {
    active: Option<ActivePoll>,
}

#[derive(Debug)]
struct ActivePoll {
    account_id: String,
    interval: Interval,
}

impl PollHandle {
    /// Creates a disarmed handle.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Arms a poll for `account_id` whose first tick is one `period` from now.
    pub fn arm(&mut self, account_id: impl Into<String>, period: Duration) {
        self.disarm();
        let period = period.max(MIN_PERIOD);
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.active = Some(ActivePoll {
            account_id: account_id.into(),
            interval,
        });
    }

    /// Cancels the active poll. Returns true if one was active.
    pub fn disarm(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Returns true if a poll is active.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.active.is_some()
    }

    /// Account the active poll was armed for.
    #[must_use]
    pub fn account_id(&self) -> Option<&str> {
        self.active.as_ref().map(|poll| poll.account_id.as_str())
    }

    /// Waits for the next tick. Never completes while disarmed.
    ///
    /// Cancel safe.
    pub async fn tick(&mut self) {
        match self.active.as_mut() {
            Some(poll) => {
                poll.interval.tick().await;
            }
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_disarmed() {
        let poll = PollHandle::new();
        assert!(!poll.is_armed());
        assert!(poll.account_id().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_previous() {
        let mut poll = PollHandle::new();
        poll.arm("a", Duration::from_secs(10));
        poll.arm("b", Duration::from_secs(10));
        assert_eq!(poll.account_id(), Some("b"));
        assert!(poll.disarm());
        assert!(!poll.disarm());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let mut poll = PollHandle::new();
        let start = Instant::now();
        poll.arm("a", Duration::from_secs(10));
        poll.tick().await;
        let first = start.elapsed();
        assert!(first >= Duration::from_secs(10) && first < Duration::from_secs(11));
        poll.tick().await;
        let second = start.elapsed();
        assert!(second >= Duration::from_secs(20) && second < Duration::from_secs(21));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarmed_tick_never_fires() {
        let mut poll = PollHandle::new();
        let fired = tokio::time::timeout(Duration::from_secs(60), poll.tick()).await;
        assert!(fired.is_err());
    }
}
