//! Address and port hints carried by HTTPS (SVCB family) records.
//!
//! See RFC 9460, section 7 for the `port`, `ipv4hint` and `ipv6hint`
//! service parameters.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use hickory_resolver::proto::rr::RData;
use hickory_resolver::proto::rr::rdata::svcb::SvcParamValue;

/// Hints extracted from a single HTTPS record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpsHints {
    /// `ipv4hint` addresses, in record order.
    pub ipv4: Vec<Ipv4Addr>,
    /// `ipv6hint` addresses, in record order.
    pub ipv6: Vec<Ipv6Addr>,
    /// `port` parameter. A zero port is treated as absent.
    pub port: Option<u16>,
}

/// Outcome of an HTTPS record query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintLookup {
    /// The answer contained an HTTPS record.
    Found(HttpsHints),
    /// No HTTPS record, or the query failed. Resolution falls back to a
    /// plain address lookup.
    NoHints,
}

impl HttpsHints {
    /// Extract hints from the first HTTPS record in an answer section.
    ///
    /// Returns `None` if no HTTPS record is present. Parameters of the wrong
    /// shape are ignored rather than treated as errors.
    pub fn from_answers<'a>(answers: impl IntoIterator<Item = &'a RData>) -> Option<Self> {
        let https = answers.into_iter().find_map(|rdata| match rdata {
            RData::HTTPS(https) => Some(https),
            _ => None,
        })?;

        let mut hints = Self::default();
        for (_, value) in https.0.svc_params() {
            match value {
                SvcParamValue::Ipv4Hint(hint) => hints.ipv4.extend(hint.0.iter().map(|a| a.0)),
                SvcParamValue::Ipv6Hint(hint) => hints.ipv6.extend(hint.0.iter().map(|a| a.0)),
                SvcParamValue::Port(port) if *port != 0 => hints.port = Some(*port),
                _ => {}
            }
        }
        Some(hints)
    }

    /// Pick the endpoint the hints point at, if they are usable.
    ///
    /// A usable hint needs both an address and a port. IPv6 hints win when
    /// the host has global IPv6 connectivity, otherwise IPv4 hints are used.
    pub fn select(&self, ipv6_capable: bool) -> Option<SocketAddr> {
        let port = self.port?;
        let ipv6 = self.ipv6.first().filter(|_| ipv6_capable).map(|a| IpAddr::V6(*a));
        let ip = ipv6.or_else(|| self.ipv4.first().map(|a| IpAddr::V4(*a)))?;
        Some(SocketAddr::new(ip, port))
    }
}

/// Pick the address to use from a platform lookup.
///
/// The first IPv4 address wins, otherwise the first address of any family.
/// IPv4 is preferred to sidestep DNS64 and IPv6 NAT breakage.
pub fn prefer_ipv4(candidates: &[IpAddr]) -> Option<IpAddr> {
    candidates
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| candidates.first())
        .copied()
}
