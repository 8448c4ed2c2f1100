//! Network interface information.

use std::net::{Ipv4Addr, Ipv6Addr};

/// A network interface on the system.
#[derive(Debug, Clone)]
pub struct NetworkInterface {
    /// Interface name (e.g., "eth0", "en0", "Wi-Fi").
    pub name: String,
    /// IPv4 addresses assigned to this interface.
    pub ipv4_addresses: Vec<Ipv4Addr>,
    /// IPv6 addresses assigned to this interface.
    pub ipv6_addresses: Vec<Ipv6Addr>,
    /// Whether the interface is currently up.
    pub is_up: bool,
    /// Whether this is a loopback interface.
    pub is_loopback: bool,
    /// Interface index.
    pub index: u32,
}

impl NetworkInterface {
    /// Get all network interfaces on the system.
    ///
    /// Enumeration failures yield an empty list.
    pub fn list() -> Vec<NetworkInterface> {
        netdev::get_interfaces()
            .into_iter()
            .map(|iface| NetworkInterface {
                ipv4_addresses: iface.ipv4.iter().map(|net| net.addr()).collect(),
                ipv6_addresses: iface.ipv6.iter().map(|net| net.addr()).collect(),
                is_up: iface.is_up(),
                is_loopback: iface.is_loopback(),
                index: iface.index,
                name: iface.name,
            })
            .collect()
    }

    /// Whether this interface is up, not loopback, and carries a global
    /// IPv6 address.
    pub fn has_global_ipv6(&self) -> bool {
        self.is_up && !self.is_loopback && self.ipv6_addresses.iter().any(is_global_candidate)
    }
}

/// Whether an IPv6 address may carry internet traffic.
///
/// Rejects loopback, link-local (`fe80::/10`) and the deprecated site-local
/// range (`fec0::/10`).
pub fn is_global_candidate(addr: &Ipv6Addr) -> bool {
    let site_local = (addr.segments()[0] & 0xffc0) == 0xfec0;
    !addr.is_loopback() && !addr.is_unicast_link_local() && !site_local
}

/// Whether any active, non-loopback interface has a global IPv6 address.
pub fn has_global_ipv6() -> bool {
    let found = NetworkInterface::list().iter().any(NetworkInterface::has_global_ipv6);
    tracing::debug!(target: "tunnel_endpoint::network", "Global IPv6 available: {}", found);
    found
}
