//! Endpoint specifications and their resolved form.
//!
//! An [`EndpointSpec`] is what the user typed: a host (numeric address or DNS
//! name) plus a port. A [`ResolvedEndpoint`] is always numeric and is what a
//! tunnel actually sends packets to.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::{Host, Url};

use crate::error::{Error, Result};

/// Characters that would be read as URI path, query or fragment delimiters.
const FORBIDDEN_CHARACTERS: [char; 3] = ['/', '?', '#'];

/// Non-special scheme: no default port is ever elided and unbracketed hosts
/// stay opaque strings.
const SYNTHETIC_SCHEME: &str = "wg";

/// The host part of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EndpointHost {
    /// A numeric IPv4 or IPv6 address. Needs no resolution.
    Address(IpAddr),
    /// A DNS host name.
    Domain(String),
}

impl EndpointHost {
    fn from_text(text: &str) -> Self {
        match text.parse::<IpAddr>() {
            Ok(addr) => Self::Address(addr),
            Err(_) => Self::Domain(text.to_string()),
        }
    }

    /// Whether the host is a numeric address literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Address(_))
    }
}

/// Renders the bare host, without brackets.
impl fmt::Display for EndpointHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(addr) => write!(f, "{addr}"),
            Self::Domain(name) => f.write_str(name),
        }
    }
}

/// A user supplied peer endpoint (`host:port` or `[v6]:port`).
///
/// Equality and hashing are structural on host and port, which makes a spec
/// usable directly as a cache key.
///
/// # Example
///
/// ```
/// use tunnel_endpoint::EndpointSpec;
///
/// let spec = EndpointSpec::parse("[2001:db8::1]:51820").unwrap();
/// assert!(spec.is_literal());
/// assert_eq!(spec.to_string(), "[2001:db8::1]:51820");
///
/// let spec: EndpointSpec = "vpn.example.com:51820".parse().unwrap();
/// assert!(!spec.is_literal());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointSpec {
    host: EndpointHost,
    port: u16,
}

impl EndpointSpec {
    /// Create a spec from an already split host and port.
    pub fn new(host: EndpointHost, port: u16) -> Self {
        Self { host, port }
    }

    /// Parse endpoint text.
    ///
    /// Fails with [`Error::MalformedEndpoint`] if the text contains `/`, `?`
    /// or `#`, has no usable host, or lacks a port in `0..=65535`. Performs
    /// no network I/O.
    pub fn parse(text: &str) -> Result<Self> {
        if text.contains(FORBIDDEN_CHARACTERS) {
            return Err(Error::malformed(text, "forbidden characters"));
        }

        let url = Url::parse(&format!("{SYNTHETIC_SCHEME}://{text}"))
            .map_err(|e| Error::malformed(text, e.to_string()))?;

        let port = url
            .port()
            .ok_or_else(|| Error::malformed(text, "missing/invalid port number"))?;

        let host = match url.host() {
            Some(Host::Ipv6(addr)) => EndpointHost::Address(IpAddr::V6(addr)),
            Some(Host::Ipv4(addr)) => EndpointHost::Address(IpAddr::V4(addr)),
            // The URL parser percent-encodes characters a DNS name cannot hold.
            Some(Host::Domain(name)) if !name.is_empty() && !name.contains('%') => {
                EndpointHost::from_text(name)
            }
            _ => return Err(Error::malformed(text, "missing/invalid host")),
        };

        Ok(Self { host, port })
    }

    /// The host part.
    pub fn host(&self) -> &EndpointHost {
        &self.host
    }

    /// The port part.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether the host is a numeric literal, so resolution is the identity.
    pub fn is_literal(&self) -> bool {
        self.host.is_literal()
    }

    /// The socket address of a literal spec, `None` for host names.
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        match self.host {
            EndpointHost::Address(addr) => Some(SocketAddr::new(addr, self.port)),
            EndpointHost::Domain(_) => None,
        }
    }
}

impl fmt::Display for EndpointSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            EndpointHost::Address(IpAddr::V6(addr)) => write!(f, "[{addr}]:{}", self.port),
            host => write!(f, "{host}:{}", self.port),
        }
    }
}

impl FromStr for EndpointSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<SocketAddr> for EndpointSpec {
    fn from(addr: SocketAddr) -> Self {
        Self::new(EndpointHost::Address(addr.ip()), addr.port())
    }
}

impl From<ResolvedEndpoint> for EndpointSpec {
    fn from(resolved: ResolvedEndpoint) -> Self {
        Self::from(resolved.0)
    }
}

impl Serialize for EndpointSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EndpointSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// A numeric endpoint produced by resolution.
///
/// Renders like a literal [`EndpointSpec`]: `[v6]:port` or `v4:port`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedEndpoint(SocketAddr);

impl ResolvedEndpoint {
    /// Wrap a socket address. Any IPv6 scope id or flow label is dropped.
    pub fn new(addr: SocketAddr) -> Self {
        Self(SocketAddr::new(addr.ip(), addr.port()))
    }

    /// The resolved address.
    pub fn ip(&self) -> IpAddr {
        self.0.ip()
    }

    /// The resolved port.
    pub fn port(&self) -> u16 {
        self.0.port()
    }

    /// The socket address to connect to.
    pub fn socket_addr(&self) -> SocketAddr {
        self.0
    }
}

impl From<SocketAddr> for ResolvedEndpoint {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr)
    }
}

impl fmt::Display for ResolvedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
