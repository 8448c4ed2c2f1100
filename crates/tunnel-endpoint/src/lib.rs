//! Peer endpoint parsing and resolution for secure tunnels.
//!
//! This crate turns a user supplied peer address such as
//! `vpn.example.com:51820` or `[2001:db8::1]:51820` into a numeric socket
//! address, and keeps that answer fresh as DNS changes:
//!
//! - **Parsing**: [`EndpointSpec::parse`] splits `host:port` text and tells
//!   numeric literals apart from host names. No I/O.
//! - **Resolution**: [`EndpointResolver`] resolves host names using HTTPS
//!   record hints with a platform lookup fallback, and caches each result
//!   for a freshness window.
//!
//! # Example
//!
//! ```ignore
//! use tunnel_endpoint::{EndpointResolver, EndpointSpec};
//!
//! let spec = EndpointSpec::parse("vpn.example.com:51820")?;
//! let resolver = EndpointResolver::system()?;
//!
//! // Resolution does blocking network I/O; call it off the UI thread.
//! match resolver.resolve_blocking(&spec) {
//!     Some(endpoint) => println!("Peer at {endpoint}"),
//!     None => println!("{spec} did not resolve, retrying later"),
//! }
//! ```
//!
//! # Errors
//!
//! Only malformed endpoint text is reported as an error. DNS failures show
//! up as an absent resolution and are retried after the freshness window.

pub mod dns;
mod endpoint;
mod error;
pub mod network_info;
pub mod runtime;

pub use dns::{EndpointResolver, ResolverConfig};
pub use endpoint::{EndpointHost, EndpointSpec, ResolvedEndpoint};
pub use error::{Error, Result};
