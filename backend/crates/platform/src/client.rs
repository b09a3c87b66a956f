//! Client identification utilities
//!
//! Resolves the address a request came from, for throttling keys and logs.
//! `X-Forwarded-For` is client-controlled, so it is only read when the
//! direct peer is one of the configured reverse proxies.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Reverse proxies whose `X-Forwarded-For` entries are believed.
///
/// Empty by default: the peer address is used as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustedProxies(Vec<IpAddr>);

impl TrustedProxies {
    pub fn new(proxies: Vec<IpAddr>) -> Self {
        Self(proxies)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.0.contains(ip)
    }
}

/// Extract client IP address
///
/// When the direct peer is a trusted proxy, walks `X-Forwarded-For` from
/// the right and returns the first hop that is not itself a trusted proxy.
/// Entries further left were written by the client and are ignored.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Direct connection IP address
/// * `trusted` - Proxies allowed to report the client address
///
/// ## Returns
/// The client IP address, or None if not determinable
pub fn extract_client_ip(
    headers: &HeaderMap,
    direct_ip: Option<IpAddr>,
    trusted: &TrustedProxies,
) -> Option<IpAddr> {
    let peer = direct_ip?;
    if !trusted.contains(&peer) {
        return Some(peer);
    }

    let hops: Vec<IpAddr> = headers
        .get_all("x-forwarded-for")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|xff| xff.split(','))
        .filter_map(|hop| hop.trim().parse::<IpAddr>().ok())
        .collect();

    hops.into_iter()
        .rev()
        .find(|ip| !trusted.contains(ip))
        .or(Some(peer))
}

/// Stable key for per-client bookkeeping
pub fn client_key(
    headers: &HeaderMap,
    direct_ip: Option<IpAddr>,
    trusted: &TrustedProxies,
) -> String {
    extract_client_ip(headers, direct_ip, trusted)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
