//! Public IP lookup module
//!
//! Abstracts the outbound call to a public IP echo service so the
//! /network page can be rendered with a real client or a test double.

mod http;

pub use http::HttpPublicIpLookup;

use async_trait::async_trait;
use thiserror::Error;

use crate::logger;
use crate::logger::writer::LogWriter;

/// Rendered in place of the public IP when the lookup fails
pub const UNKNOWN_PUBLIC_IP: &str = "Unable to determine";

/// Public IP lookup error
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Client error: {0}")]
    Client(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Source of the server's public IP address
#[async_trait]
pub trait PublicIpLookup: Send + Sync {
    async fn public_ip(&self) -> Result<String, LookupError>;
}

/// Query the lookup once, substituting the sentinel on any failure
///
/// The failure is written to the error log and never reaches the client.
pub async fn resolve_public_ip(lookup: &dyn PublicIpLookup, log: &LogWriter) -> String {
    match lookup.public_ip().await {
        Ok(ip) => ip,
        Err(e) => {
            logger::log_warning(log, &format!("Public IP lookup failed: {e}"));
            UNKNOWN_PUBLIC_IP.to_string()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FailingLookup, FixedLookup};
    use super::*;

    #[tokio::test]
    async fn test_resolve_success() {
        let log = LogWriter::discard();
        let ip = resolve_public_ip(&FixedLookup("198.51.100.7"), &log).await;
        assert_eq!(ip, "198.51.100.7");
    }

    #[tokio::test]
    async fn test_resolve_failure_yields_sentinel() {
        let log = LogWriter::discard();
        let ip = resolve_public_ip(&FailingLookup, &log).await;
        assert_eq!(ip, UNKNOWN_PUBLIC_IP);
    }
}
