//! HTTP proxy gateway.
//!
//! Talks to a stats endpoint running next to the proxy:
//!
//! - `GET {base}/health` - any 2xx means the proxy is up
//! - `GET {base}/traffic` - JSON array of `{"tag": "...", "up": 0, "down": 0}`
//!   holding deltas since the previous call
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use xui_traffic::HttpGateway;
//!
//! let gateway = HttpGateway::new("http://127.0.0.1:62789")
//!     .unwrap()
//!     .with_probe_timeout(Duration::from_millis(500));
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::trace;
use xui_core::defaults;

use crate::error::GatewayError;
use crate::gateway::ProxyGateway;
use crate::sample::TrafficSample;

/// Gateway backed by the proxy's HTTP stats endpoint.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    health_url: String,
    traffic_url: String,
    probe_timeout: Duration,
}

impl HttpGateway {
    /// Create a gateway with the default query timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::DEFAULT_QUERY_TIMEOUT_SECS))
            .build()
            .map_err(|e| GatewayError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create with a custom reqwest [`Client`] (for timeouts, proxies, etc.).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        let base = base.trim_end_matches('/');
        Self {
            client,
            health_url: format!("{base}/health"),
            traffic_url: format!("{base}/traffic"),
            probe_timeout: Duration::from_millis(defaults::DEFAULT_PROBE_TIMEOUT_MS),
        }
    }

    /// Set the liveness probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}

#[async_trait]
impl ProxyGateway for HttpGateway {
    async fn is_running(&self) -> bool {
        match self
            .client
            .get(&self.health_url)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                trace!(url = %self.health_url, error = %e, "proxy liveness probe failed");
                false
            }
        }
    }

    async fn fetch_traffic(&self) -> Result<Vec<TrafficSample>, GatewayError> {
        let resp = self
            .client
            .get(&self.traffic_url)
            .send()
            .await
            .map_err(GatewayError::http)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        resp.json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serve canned responses keyed by request path until the test ends.
    async fn serve(routes: Vec<(&'static str, u16, String)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let routes = routes.clone();
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let mut read = 0;
                    while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut buf[read..]).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => read += n,
                        }
                    }
                    let request = String::from_utf8_lossy(&buf[..read]);
                    let path = request.split_whitespace().nth(1).unwrap_or("/");

                    let (status, body) = routes
                        .iter()
                        .find(|(p, _, _)| *p == path)
                        .map_or((404, String::new()), |(_, s, b)| (*s, b.clone()));
                    let response = format!(
                        "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn healthy_proxy_is_running() {
        let base = serve(vec![("/health", 200, "{}".to_string())]).await;
        let gateway = HttpGateway::new(format!("{base}/")).unwrap();
        assert!(gateway.is_running().await);
    }

    #[tokio::test]
    async fn unhealthy_status_is_not_running() {
        let base = serve(vec![("/health", 503, String::new())]).await;
        let gateway = HttpGateway::new(base).unwrap();
        assert!(!gateway.is_running().await);
    }

    #[tokio::test]
    async fn unreachable_proxy_is_not_running() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = HttpGateway::new(format!("http://{addr}"))
            .unwrap()
            .with_probe_timeout(Duration::from_millis(200));
        assert!(!gateway.is_running().await);
    }

    #[tokio::test]
    async fn fetch_decodes_samples() {
        let body = serde_json::json!([
            {"tag": "inbound-443", "up": 100, "down": 50},
            {"tag": "inbound-80", "up": 0, "down": 7},
        ]);
        let base = serve(vec![("/traffic", 200, body.to_string())]).await;
        let gateway = HttpGateway::new(base).unwrap();

        let samples = gateway.fetch_traffic().await.unwrap();
        assert_eq!(
            samples,
            vec![
                TrafficSample::new("inbound-443", 100, 50),
                TrafficSample::new("inbound-80", 0, 7),
            ]
        );
    }

    #[tokio::test]
    async fn fetch_maps_error_status() {
        let base = serve(vec![("/traffic", 500, String::new())]).await;
        let gateway = HttpGateway::new(base).unwrap();

        let err = gateway.fetch_traffic().await.unwrap_err();
        assert!(matches!(err, GatewayError::Status(500)));
    }

    #[tokio::test]
    async fn fetch_rejects_malformed_body() {
        let base = serve(vec![(
            "/traffic",
            200,
            serde_json::json!({"tag": "a"}).to_string(),
        )]).await;
        let gateway = HttpGateway::new(base).unwrap();

        let err = gateway.fetch_traffic().await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }
}
