//! Per-request connection context
//!
//! Addressing facts gathered for one request and the local/remote
//! classification derived from them.

use std::net::SocketAddr;

/// Addresses treated as the machine itself
const LOOPBACK_ADDRESSES: [&str; 3] = ["127.0.0.1", "localhost", "::1"];

/// Prefixes treated as the private network
const PRIVATE_PREFIXES: [&str; 2] = ["192.168.", "10."];

/// Classify a client address as local (`true`) or remote (`false`)
///
/// This is a literal string test: exact loopback names plus the
/// `192.168.` and `10.` prefixes. `172.16.0.0/12` and IPv6 ranges other
/// than `::1` are deliberately reported as remote.
pub fn classify(client_address: &str) -> bool {
    LOOPBACK_ADDRESSES.contains(&client_address)
        || PRIVATE_PREFIXES
            .iter()
            .any(|prefix| client_address.starts_with(prefix))
}

/// Connection facts for a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionContext {
    pub client_address: String,
    pub server_address: String,
    pub server_port: u16,
    /// Path and query exactly as requested
    pub request_path: String,
    is_local: bool,
}

impl ConnectionContext {
    pub fn new(
        client_address: String,
        server_address: String,
        server_port: u16,
        request_path: String,
    ) -> Self {
        let is_local = classify(&client_address);
        Self {
            client_address,
            server_address,
            server_port,
            request_path,
            is_local,
        }
    }

    pub const fn is_local(&self) -> bool {
        self.is_local
    }
}

/// Client IP string for a peer address
///
/// IPv4-mapped IPv6 peers (`::ffff:a.b.c.d`) from dual-stack listeners are
/// reported in their IPv4 form.
pub fn client_ip(peer_addr: &SocketAddr) -> String {
    peer_addr.ip().to_canonical().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_is_local() {
        for addr in ["127.0.0.1", "localhost", "::1"] {
            assert!(classify(addr), "{addr} should be local");
        }
    }

    #[test]
    fn test_private_prefixes_are_local() {
        for addr in ["192.168.1.5", "192.168.0.1", "10.0.0.1", "10.255.3.7"] {
            assert!(classify(addr), "{addr} should be local");
        }
    }

    #[test]
    fn test_everything_else_is_remote() {
        for addr in [
            "8.8.8.8",
            "203.0.113.5",
            "fe80::1",
            "fd00::1",
            "172.16.0.1",
            "127.0.0.2",
            "110.0.0.1",
            "192.169.1.1",
            "10",
            "",
        ] {
            assert!(!classify(addr), "{addr} should be remote");
        }
    }

    #[test]
    fn test_prefix_test_is_literal() {
        // Not an IP at all, but the prefix rule still applies
        assert!(classify("10.not-an-ip"));
        assert!(!classify(" 10.0.0.1"));
    }

    #[test]
    fn test_context_derives_is_local() {
        let local = ConnectionContext::new(
            "192.168.1.5".to_string(),
            "10.0.0.2".to_string(),
            8080,
            "/json".to_string(),
        );
        assert!(local.is_local());

        let remote = ConnectionContext::new(
            "203.0.113.5".to_string(),
            "10.0.0.2".to_string(),
            8080,
            "/".to_string(),
        );
        assert!(!remote.is_local());
    }

    #[test]
    fn test_client_ip_unmaps_ipv4() {
        let mapped: SocketAddr = "[::ffff:192.168.1.5]:50000".parse().unwrap();
        assert_eq!(client_ip(&mapped), "192.168.1.5");

        let v6: SocketAddr = "[::1]:50000".parse().unwrap();
        assert_eq!(client_ip(&v6), "::1");

        let v4: SocketAddr = "203.0.113.5:443".parse().unwrap();
        assert_eq!(client_ip(&v4), "203.0.113.5");
    }
}
