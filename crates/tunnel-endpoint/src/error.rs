//! Error types for endpoint parsing and resolution.

/// Result type alias for endpoint operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or resolving an endpoint.
///
/// Only [`Error::MalformedEndpoint`] ever reaches callers of the resolver's
/// public API directly. The DNS variants are produced by resolver backends
/// and absorbed by [`EndpointResolver`](crate::EndpointResolver), which
/// reports them as an absent resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The endpoint text could not be split into a host and a port.
    #[error("Malformed endpoint '{input}': {reason}")]
    MalformedEndpoint { input: String, reason: String },

    /// The host name did not resolve to any address.
    #[error("Unknown host '{host}': {message}")]
    UnknownHost { host: String, message: String },

    /// The HTTPS record query failed at the transport or protocol level.
    #[error("DNS error: {0}")]
    Dns(String),

    /// Invalid resolver configuration.
    #[error("Invalid resolver configuration: {0}")]
    Config(String),
}

impl Error {
    /// Create a malformed endpoint error.
    pub fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedEndpoint {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown host error.
    pub fn unknown_host(host: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnknownHost {
            host: host.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from user input rather than the network.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedEndpoint { .. })
    }
}

impl From<hickory_resolver::ResolveError> for Error {
    fn from(err: hickory_resolver::ResolveError) -> Self {
        Self::Dns(err.to_string())
    }
}
