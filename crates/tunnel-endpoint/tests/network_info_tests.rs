//! Network information tests.

use tunnel_endpoint::network_info::{NetworkInterface, has_global_ipv6};

#[test]
fn test_list_interfaces() {
    let interfaces = NetworkInterface::list();
    // Should have at least loopback interface on any system
    assert!(!interfaces.is_empty(), "Should have at least one network interface");

    let has_loopback = interfaces.iter().any(|iface| iface.is_loopback);
    assert!(has_loopback, "Should have a loopback interface");
}

#[test]
fn test_loopback_never_counts_as_global() {
    let interfaces = NetworkInterface::list();
    for iface in interfaces.iter().filter(|iface| iface.is_loopback) {
        assert!(!iface.has_global_ipv6());
    }
}

#[test]
fn test_global_ipv6_matches_interfaces() {
    let expected = NetworkInterface::list().iter().any(NetworkInterface::has_global_ipv6);
    assert_eq!(has_global_ipv6(), expected);
}
