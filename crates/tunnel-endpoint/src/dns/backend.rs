//! DNS and network backends used by the endpoint resolver.

use std::future::Future;
use std::net::IpAddr;

use hickory_resolver::config::{NameServerConfig, ResolverConfig as HickoryConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::proto::xfer::Protocol;
use hickory_resolver::{Resolver, TokioResolver};

use crate::dns::config::ResolverConfig;
use crate::dns::hints::{HintLookup, HttpsHints};
use crate::error::{Error, Result};
use crate::network_info;

/// The I/O the endpoint resolver depends on.
///
/// [`SystemBackend`] is the production implementation. Tests and embedders
/// with their own DNS stack can supply another one.
pub trait ResolverBackend: Send + Sync + 'static {
    /// Query the HTTPS record for `host`. Failures map to
    /// [`HintLookup::NoHints`].
    fn https_hints(&self, host: &str) -> impl Future<Output = HintLookup> + Send;

    /// Look up all addresses of `host` with the platform resolver, in the
    /// order the platform returns them.
    fn lookup_ip(&self, host: &str, port: u16) -> impl Future<Output = Result<Vec<IpAddr>>> + Send;

    /// Whether this machine has a globally routable IPv6 address.
    fn has_global_ipv6(&self) -> impl Future<Output = bool> + Send;
}

/// Backend backed by hickory (HTTPS records), the platform resolver
/// (address lookups) and netdev (interface enumeration).
pub struct SystemBackend {
    /// Resolver pinned to the hint nameserver, `None` if hints are disabled.
    hints: Option<TokioResolver>,
}

impl SystemBackend {
    /// Create a backend from the given configuration.
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        if config.attempts == 0 {
            return Err(Error::Config("attempts must be at least 1".to_string()));
        }

        let hints = config.https_hints.then(|| {
            let (resolver_config, resolver_opts) = build_resolver_config(config);
            Resolver::builder_with_config(resolver_config, TokioConnectionProvider::default())
                .with_options(resolver_opts)
                .build()
        });

        Ok(Self { hints })
    }
}

impl ResolverBackend for SystemBackend {
    async fn https_hints(&self, host: &str) -> HintLookup {
        let Some(resolver) = &self.hints else {
            return HintLookup::NoHints;
        };

        match query_https(resolver, host).await {
            Ok(Some(hints)) => {
                tracing::debug!(target: "tunnel_endpoint::dns", "HTTPS record for {}: {:?}", host, hints);
                HintLookup::Found(hints)
            }
            Ok(None) => HintLookup::NoHints,
            Err(e) => {
                tracing::debug!(target: "tunnel_endpoint::dns", "HTTPS query for {} failed: {}", host, e);
                HintLookup::NoHints
            }
        }
    }

    async fn lookup_ip(&self, host: &str, port: u16) -> Result<Vec<IpAddr>> {
        let addresses: Vec<IpAddr> = tokio::net::lookup_host((host, port))
            .await
            .map_err(|e| Error::unknown_host(host, e.to_string()))?
            .map(|addr| addr.ip())
            .collect();

        if addresses.is_empty() {
            return Err(Error::unknown_host(host, "no addresses found"));
        }
        Ok(addresses)
    }

    async fn has_global_ipv6(&self) -> bool {
        // Interface enumeration is a blocking syscall.
        tokio::task::spawn_blocking(network_info::has_global_ipv6)
            .await
            .unwrap_or(false)
    }
}

/// Build a hickory configuration that talks only to the hint nameserver.
fn build_resolver_config(config: &ResolverConfig) -> (HickoryConfig, ResolverOpts) {
    let mut resolver_config = HickoryConfig::new();
    resolver_config.add_name_server(NameServerConfig::new(config.hint_nameserver, Protocol::Udp));
    resolver_config.add_name_server(NameServerConfig::new(config.hint_nameserver, Protocol::Tcp));

    let mut opts = ResolverOpts::default();
    opts.timeout = config.query_timeout;
    opts.attempts = config.attempts;
    // The endpoint resolver keeps its own cache keyed by endpoint.
    opts.cache_size = 0;

    (resolver_config, opts)
}

/// Send one HTTPS query and extract hints from the answer section.
async fn query_https(resolver: &TokioResolver, host: &str) -> Result<Option<HttpsHints>> {
    let fqdn = if host.ends_with('.') {
        host.to_string()
    } else {
        format!("{host}.")
    };

    let response = resolver.lookup(fqdn, RecordType::HTTPS).await?;
    Ok(HttpsHints::from_answers(response.iter()))
}
