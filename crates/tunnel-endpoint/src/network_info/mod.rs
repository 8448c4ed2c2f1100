//! Network interface enumeration.
//!
//! Resolution only needs one answer from this module: whether the host has
//! an IPv6 address that can reach the internet. IPv6 address hints are only
//! used when it does.
//!
//! # Example
//!
//! ```ignore
//! use tunnel_endpoint::network_info::{NetworkInterface, has_global_ipv6};
//!
//! for iface in NetworkInterface::list() {
//!     println!("{}: {:?}", iface.name, iface.ipv6_addresses);
//! }
//! println!("Global IPv6: {}", has_global_ipv6());
//! ```

mod interface;

pub use interface::{NetworkInterface, has_global_ipv6, is_global_candidate};
