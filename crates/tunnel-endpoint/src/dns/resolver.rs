//! Cached endpoint resolution.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;

use crate::dns::backend::{ResolverBackend, SystemBackend};
use crate::dns::config::ResolverConfig;
use crate::dns::hints::{HintLookup, prefer_ipv4};
use crate::endpoint::{EndpointHost, EndpointSpec, ResolvedEndpoint};
use crate::error::Result;
use crate::runtime;

/// Cached outcome of the last resolution attempt for one endpoint.
#[derive(Debug, Default)]
struct CacheEntry {
    /// When the last attempt finished, successful or not.
    last_attempt: Option<Instant>,
    /// `None` if never resolved or if the last attempt failed.
    resolved: Option<ResolvedEndpoint>,
}

impl CacheEntry {
    fn is_fresh(&self, window: Duration) -> bool {
        self.last_attempt.is_some_and(|at| at.elapsed() < window)
    }
}

/// Per-endpoint cache slot. The slot outlives invalidation so that every
/// attempt for one endpoint goes through the same lock.
#[derive(Debug, Default)]
struct CacheSlot {
    /// Set by `invalidate`; the next lock holder re-resolves.
    invalidated: AtomicBool,
    entry: AsyncMutex<CacheEntry>,
}

impl CacheSlot {
    /// Whether the slot still holds a usable result. Never waits.
    fn is_live(&self, window: Duration) -> bool {
        if self.invalidated.load(Ordering::Acquire) {
            return false;
        }
        self.entry
            .try_lock()
            .map_or(true, |entry| entry.is_fresh(window))
    }
}

/// Resolves endpoint specs to numeric endpoints and caches the results.
///
/// Each distinct spec (host and port) owns one cache entry behind its own
/// lock. Concurrent calls for the same spec run at most one DNS attempt; the
/// others wait and then read the fresh entry. Different specs never wait on
/// each other.
///
/// A result, including a failure, is reused for the configured freshness
/// window before DNS is asked again. Entries whose window has passed are
/// dropped once nobody is using them.
///
/// # Example
///
/// ```ignore
/// use tunnel_endpoint::{EndpointResolver, EndpointSpec};
///
/// let resolver = EndpointResolver::system()?;
/// let spec = EndpointSpec::parse("vpn.example.com:51820")?;
///
/// // From async code
/// if let Some(endpoint) = resolver.resolve(&spec).await {
///     println!("Connecting to {endpoint}");
/// }
///
/// // From a plain worker thread
/// let endpoint = resolver.resolve_blocking(&spec);
/// ```
pub struct EndpointResolver<B: ResolverBackend = SystemBackend> {
    backend: B,
    freshness_window: Duration,
    entries: Mutex<HashMap<EndpointSpec, Arc<CacheSlot>>>,
}

impl EndpointResolver<SystemBackend> {
    /// Create a resolver using the system backend.
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let backend = SystemBackend::new(&config)?;
        Ok(Self::with_backend(backend, &config))
    }

    /// Create a resolver with the default configuration.
    pub fn system() -> Result<Self> {
        Self::new(ResolverConfig::default())
    }
}

impl<B: ResolverBackend> EndpointResolver<B> {
    /// Create a resolver over a custom backend.
    pub fn with_backend(backend: B, config: &ResolverConfig) -> Self {
        Self {
            backend,
            freshness_window: config.freshness_window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The backend this resolver queries.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Resolve `spec` to a numeric endpoint.
    ///
    /// Literal specs resolve to themselves without I/O or locking. Host
    /// names are served from the cache while it is fresh, otherwise one
    /// resolution attempt runs. Returns `None` if the host could not be
    /// resolved.
    pub async fn resolve(&self, spec: &EndpointSpec) -> Option<ResolvedEndpoint> {
        let host = match spec.host() {
            EndpointHost::Address(ip) => {
                return Some(ResolvedEndpoint::new(SocketAddr::new(*ip, spec.port())));
            }
            EndpointHost::Domain(host) => host,
        };

        let slot = self.slot(spec);
        let mut entry = slot.entry.lock().await;
        let invalidated = slot.invalidated.swap(false, Ordering::AcqRel);

        if !invalidated && entry.is_fresh(self.freshness_window) {
            tracing::trace!(target: "tunnel_endpoint::resolver", "Cache hit for {}: {:?}", spec, entry.resolved);
            return entry.resolved;
        }

        let resolved = self.attempt(host, spec.port()).await;
        entry.last_attempt = Some(Instant::now());
        entry.resolved = resolved;
        resolved
    }

    /// Blocking version of [`resolve`](Self::resolve) for worker threads.
    ///
    /// Runs on the crate's shared runtime. Must not be called from within an
    /// async context.
    pub fn resolve_blocking(&self, spec: &EndpointSpec) -> Option<ResolvedEndpoint> {
        if let Some(addr) = spec.socket_addr() {
            return Some(ResolvedEndpoint::new(addr));
        }

        match runtime::block_on(self.resolve(spec)) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::error!(target: "tunnel_endpoint::resolver", "Cannot resolve {}: {}", spec, e);
                None
            }
        }
    }

    /// The current cached resolution for `spec`, without any I/O.
    ///
    /// Returns `None` if the spec was never resolved, the last attempt
    /// failed, or an attempt is in progress.
    pub fn cached(&self, spec: &EndpointSpec) -> Option<ResolvedEndpoint> {
        if let Some(addr) = spec.socket_addr() {
            return Some(ResolvedEndpoint::new(addr));
        }

        let slot = self.entries.lock().get(spec).cloned()?;
        if slot.invalidated.load(Ordering::Acquire) {
            return None;
        }
        let entry = slot.entry.try_lock().ok()?;
        entry.resolved
    }

    /// Forget the cached resolution for `spec`, so the next call queries DNS.
    ///
    /// An attempt already in progress finishes; the next call still waits for
    /// it and then resolves again.
    pub fn invalidate(&self, spec: &EndpointSpec) {
        if let Some(slot) = self.entries.lock().get(spec) {
            slot.invalidated.store(true, Ordering::Release);
        }
    }

    /// Forget all cached resolutions.
    pub fn clear_cache(&self) {
        let mut entries = self.entries.lock();
        for slot in entries.values() {
            slot.invalidated.store(true, Ordering::Release);
        }
        entries.retain(|_, slot| Arc::strong_count(slot) > 1);
    }

    /// Number of endpoints with a cache slot.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether no endpoint has a cache slot.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn slot(&self, spec: &EndpointSpec) -> Arc<CacheSlot> {
        let mut entries = self.entries.lock();
        // A slot referenced only by the map cannot be locked by anyone.
        entries.retain(|_, slot| Arc::strong_count(slot) > 1 || slot.is_live(self.freshness_window));
        Arc::clone(entries.entry(spec.clone()).or_default())
    }

    /// One resolution attempt: HTTPS record hints first, then a plain lookup.
    async fn attempt(&self, host: &str, port: u16) -> Option<ResolvedEndpoint> {
        let ipv6_capable = self.backend.has_global_ipv6().await;

        if let HintLookup::Found(hints) = self.backend.https_hints(host).await {
            if let Some(addr) = hints.select(ipv6_capable) {
                tracing::debug!(target: "tunnel_endpoint::resolver", "Resolved {} from HTTPS hints to {}", host, addr);
                return Some(ResolvedEndpoint::new(addr));
            }
        }

        match self.backend.lookup_ip(host, port).await {
            Ok(candidates) => {
                let resolved = prefer_ipv4(&candidates)
                    .map(|ip| ResolvedEndpoint::new(SocketAddr::new(ip, port)));
                tracing::debug!(target: "tunnel_endpoint::resolver", "Resolved {} to {:?}", host, resolved);
                resolved
            }
            Err(e) => {
                tracing::warn!(target: "tunnel_endpoint::resolver", "Failed to resolve {}: {}", host, e);
                None
            }
        }
    }
}
