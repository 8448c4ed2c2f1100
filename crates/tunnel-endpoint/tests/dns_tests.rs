//! System backend tests.
//!
//! These run against the real platform resolver and interfaces, so they only
//! assert on answers every machine can give.

use std::time::Duration;

use tunnel_endpoint::dns::{HintLookup, ResolverBackend, SystemBackend};
use tunnel_endpoint::{EndpointResolver, EndpointSpec, Error, ResolverConfig};

#[tokio::test]
async fn test_system_resolver_creation() {
    let resolver = EndpointResolver::system();
    assert!(resolver.is_ok(), "Failed to create system resolver");
}

#[tokio::test]
async fn test_custom_nameserver() {
    let config = ResolverConfig::with_nameserver("1.1.1.1:53".parse().unwrap())
        .query_timeout(Duration::from_secs(2))
        .attempts(1);
    assert!(EndpointResolver::new(config).is_ok());
}

#[tokio::test]
async fn test_zero_attempts_error() {
    let config = ResolverConfig::default().attempts(0);
    let result = SystemBackend::new(&config);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[tokio::test]
async fn test_lookup_localhost() {
    let backend = SystemBackend::new(&ResolverConfig::default().https_hints(false)).unwrap();

    let addresses = backend
        .lookup_ip("localhost", 51820)
        .await
        .expect("localhost should resolve");
    assert!(
        addresses.iter().any(|addr| addr.is_loopback()),
        "localhost should resolve to a loopback address"
    );
}

#[tokio::test]
async fn test_lookup_unknown_host() {
    let backend = SystemBackend::new(&ResolverConfig::default().https_hints(false)).unwrap();

    let result = backend.lookup_ip("nonexistent.invalid", 51820).await;
    assert!(matches!(result, Err(Error::UnknownHost { .. })));
}

#[tokio::test]
async fn test_hints_disabled() {
    let backend = SystemBackend::new(&ResolverConfig::default().https_hints(false)).unwrap();
    assert_eq!(backend.https_hints("example.com").await, HintLookup::NoHints);
}

#[tokio::test]
async fn test_resolve_localhost_without_hints() {
    let config = ResolverConfig::default().https_hints(false);
    let resolver = EndpointResolver::new(config).unwrap();
    let spec = EndpointSpec::parse("localhost:51820").unwrap();

    let resolved = resolver.resolve(&spec).await.expect("localhost should resolve");
    assert!(resolved.ip().is_loopback());
    assert_eq!(resolved.port(), 51820);
}

#[tokio::test]
async fn test_resolve_unknown_host_is_absent() {
    let config = ResolverConfig::default().https_hints(false);
    let resolver = EndpointResolver::new(config).unwrap();
    let spec = EndpointSpec::parse("nonexistent.invalid:51820").unwrap();

    assert_eq!(resolver.resolve(&spec).await, None);
}

#[tokio::test]
async fn test_https_query_unreachable_nameserver() {
    // TEST-NET-1 is never routed, so the query has to time out.
    let config = ResolverConfig::with_nameserver("192.0.2.1:53".parse().unwrap())
        .query_timeout(Duration::from_millis(200))
        .attempts(1);
    let backend = SystemBackend::new(&config).unwrap();

    assert_eq!(backend.https_hints("example.com").await, HintLookup::NoHints);
}

#[tokio::test]
async fn test_ipv6_capability_off_runtime_thread() {
    let backend = SystemBackend::new(&ResolverConfig::default().https_hints(false)).unwrap();

    let from_backend = backend.has_global_ipv6().await;
    let direct = tunnel_endpoint::network_info::has_global_ipv6();
    assert_eq!(from_backend, direct);
}
