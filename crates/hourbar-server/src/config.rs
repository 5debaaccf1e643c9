//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Configuration for [`serve`](crate::serve).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: SocketAddr,
    /// Period of the background refresher.
    pub refresh_interval: Duration,
    /// Whether to refresh on a timer in addition to lazily on lookup.
    pub periodic_refresh: bool,
}

impl ServerConfig {
    /// Default listen port.
    pub const DEFAULT_PORT: u16 = 3000;

    /// Default refresh period (5 minutes).
    pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

    /// Sets the listen address.
    #[must_use]
    pub const fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    /// Sets the refresh period.
    #[must_use]
    pub const fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Enables or disables the background refresher.
    #[must_use]
    pub const fn with_periodic_refresh(mut self, enabled: bool) -> Self {
        self.periodic_refresh = enabled;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, Self::DEFAULT_PORT)),
            refresh_interval: Self::DEFAULT_REFRESH_INTERVAL,
            periodic_refresh: false,
        }
    }
}
