//! Host facts module
//!
//! Hostname and resolved local IP of the machine running the server.

use std::net::IpAddr;

/// Fallback when the hostname cannot be resolved
const FALLBACK_SERVER_IP: &str = "127.0.0.1";

/// Hostname and local IP, discovered once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub hostname: String,
    pub server_ip: String,
}

impl HostInfo {
    pub fn new(hostname: impl Into<String>, server_ip: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            server_ip: server_ip.into(),
        }
    }

    /// Read the hostname and resolve it to an address
    ///
    /// An IPv4 result is preferred; resolution failures fall back to loopback.
    pub async fn discover() -> Self {
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "localhost".to_string());

        let server_ip = match tokio::net::lookup_host((hostname.as_str(), 0)).await {
            Ok(addrs) => pick_address(addrs.map(|a| a.ip()))
                .map_or_else(|| FALLBACK_SERVER_IP.to_string(), |ip| ip.to_string()),
            Err(_) => FALLBACK_SERVER_IP.to_string(),
        };

        Self::new(hostname, server_ip)
    }
}

/// First IPv4 address if any, otherwise the first address
fn pick_address(addrs: impl Iterator<Item = IpAddr>) -> Option<IpAddr> {
    let mut first = None;
    for ip in addrs {
        if ip.is_ipv4() {
            return Some(ip);
        }
        first.get_or_insert(ip);
    }
    first
}
