//! Resolver configuration types.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Recursive resolver queried for HTTPS records (Google public DNS).
pub const DEFAULT_HINT_NAMESERVER: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 53);

/// Minimum time between two resolution attempts for one endpoint.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(60);

/// Configuration for endpoint resolution.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Nameserver that receives the HTTPS record query.
    pub hint_nameserver: SocketAddr,

    /// Timeout for each HTTPS query attempt.
    pub query_timeout: Duration,

    /// Number of attempts for the HTTPS query.
    pub attempts: usize,

    /// How long a resolution result (or failure) is reused before DNS is
    /// asked again.
    pub freshness_window: Duration,

    /// Whether to query HTTPS records for address and port hints at all.
    /// If false, only the platform resolver is used.
    pub https_hints: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            hint_nameserver: DEFAULT_HINT_NAMESERVER,
            query_timeout: Duration::from_secs(5),
            attempts: 2,
            freshness_window: DEFAULT_FRESHNESS_WINDOW,
            https_hints: true,
        }
    }
}

impl ResolverConfig {
    /// Create a configuration that sends HTTPS queries to `nameserver`.
    pub fn with_nameserver(nameserver: SocketAddr) -> Self {
        Self {
            hint_nameserver: nameserver,
            ..Default::default()
        }
    }

    /// Set the HTTPS query timeout.
    pub fn query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Set the number of HTTPS query attempts.
    pub fn attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    /// Set the freshness window.
    pub fn freshness_window(mut self, window: Duration) -> Self {
        self.freshness_window = window;
        self
    }

    /// Enable or disable the HTTPS record hint query.
    pub fn https_hints(mut self, enabled: bool) -> Self {
        self.https_hints = enabled;
        self
    }
}
