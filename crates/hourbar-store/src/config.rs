//! Store configuration.

use std::time::Duration;

/// Configuration for a [`CandleStore`](crate::CandleStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Age after which a snapshot is rebuilt on the next lookup.
    pub refresh_interval: Duration,
    /// Upper bound on one rebuild; `None` waits indefinitely.
    pub rebuild_timeout: Option<Duration>,
    /// Minimum wait after a failed rebuild before a lookup retries.
    pub retry_backoff: Duration,
}

impl StoreConfig {
    /// Default refresh interval (5 minutes).
    pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

    /// Default rebuild timeout (60 seconds).
    pub const DEFAULT_REBUILD_TIMEOUT: Duration = Duration::from_secs(60);

    /// Default retry backoff (10 seconds).
    pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(10);

    /// Sets the refresh interval.
    #[must_use]
    pub const fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Sets the rebuild timeout.
    #[must_use]
    pub const fn with_rebuild_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.rebuild_timeout = timeout;
        self
    }

    /// Sets the retry backoff.
    #[must_use]
    pub const fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Self::DEFAULT_REFRESH_INTERVAL,
            rebuild_timeout: Some(Self::DEFAULT_REBUILD_TIMEOUT),
            retry_backoff: Self::DEFAULT_RETRY_BACKOFF,
        }
    }
}
