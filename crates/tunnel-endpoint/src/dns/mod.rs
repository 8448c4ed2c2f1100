//! Endpoint resolution.
//!
//! Host name endpoints are resolved in one round:
//!
//! 1. An HTTPS record (RFC 9460) is queried from a fixed recursive resolver.
//!    If it carries a port and an address hint, that pair is the endpoint.
//!    IPv6 hints are used only when the host has global IPv6 connectivity.
//! 2. Otherwise the platform resolver looks the name up, the first IPv4
//!    result is preferred, and the endpoint keeps the port it was given.
//!
//! Results are cached per endpoint for a fixed freshness window, failures
//! included, which bounds the DNS query rate no matter how often callers ask.
//!
//! # Configuration
//!
//! ```ignore
//! use tunnel_endpoint::dns::{EndpointResolver, ResolverConfig};
//! use std::time::Duration;
//!
//! let config = ResolverConfig::with_nameserver("1.1.1.1:53".parse()?)
//!     .query_timeout(Duration::from_secs(3))
//!     .freshness_window(Duration::from_secs(30));
//!
//! let resolver = EndpointResolver::new(config)?;
//! ```

mod backend;
mod config;
mod hints;
mod resolver;

pub use backend::{ResolverBackend, SystemBackend};
pub use config::{DEFAULT_FRESHNESS_WINDOW, DEFAULT_HINT_NAMESERVER, ResolverConfig};
pub use hints::{HintLookup, HttpsHints, prefer_ipv4};
pub use resolver::EndpointResolver;
