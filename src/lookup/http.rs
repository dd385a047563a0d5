//! HTTP public IP lookup
//!
//! Calls a plain-text IP echo service (`https://api.ipify.org` by default).

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{LookupError, PublicIpLookup};
use crate::config::LookupConfig;

/// Lookup backed by an HTTP(S) echo service
pub struct HttpPublicIpLookup {
    client: Client,
    url: String,
}

impl HttpPublicIpLookup {
    /// Build a client whose requests are bounded by `timeout_secs`
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LookupError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl PublicIpLookup for HttpPublicIpLookup {
    async fn public_ip(&self) -> Result<String, LookupError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        let text = String::from_utf8(body.to_vec())
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;

        let ip = text.trim();
        if ip.is_empty() {
            return Err(LookupError::InvalidResponse("empty body".to_string()));
        }
        Ok(ip.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response and return its URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}/")
    }

    fn lookup_for(url: String) -> HttpPublicIpLookup {
        HttpPublicIpLookup::new(&LookupConfig {
            url,
            timeout_secs: 2,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_success_trims_body() {
        let url = serve_once("200 OK", "198.51.100.7\n").await;
        let ip = lookup_for(url).public_ip().await.unwrap();
        assert_eq!(ip, "198.51.100.7");
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let url = serve_once("503 Service Unavailable", "busy").await;
        let err = lookup_for(url).public_ip().await.unwrap_err();
        assert!(matches!(err, LookupError::Status(503)));
    }

    #[tokio::test]
    async fn test_empty_body_is_invalid() {
        let url = serve_once("200 OK", "   ").await;
        let err = lookup_for(url).public_ip().await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = lookup_for(format!("http://{addr}/"))
            .public_ip()
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Transport(_)));
    }
}
