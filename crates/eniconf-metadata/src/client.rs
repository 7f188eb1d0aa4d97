//! HTTP client for the instance metadata server
//!
//! Every lookup is a single `GET {endpoint}/latest/meta-data/{path}`. The
//! client does not retry; the configured timeout bounds each request.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::MetadataConfig;
use crate::error::{MetadataError, Result};
use crate::source::MetadataSource;

/// Metadata source backed by the metadata HTTP endpoint
#[derive(Debug, Clone)]
pub struct MetadataClient {
    client: Client,
    config: MetadataConfig,
}

impl MetadataClient {
    /// Create a client for the given configuration
    pub fn new(config: MetadataConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| MetadataError::Http {
                path: String::new(),
                source,
            })?;
        Ok(Self { client, config })
    }

    /// Get the configuration
    pub fn config(&self) -> &MetadataConfig {
        &self.config
    }
}

#[async_trait]
impl MetadataSource for MetadataClient {
    async fn fetch(&self, path: &str) -> Result<String> {
        let url = self.config.url_for(path);
        debug!(url = %url, "Querying metadata");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| MetadataError::Http {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(MetadataError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| MetadataError::Http {
            path: path.to_string(),
            source,
        })?;
        debug!(url = %url, bytes = body.len(), "Metadata response");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server;
    use crate::service::MetadataService;
    use crate::types::{InstanceMetadata, NetworkInterface};
    use std::net::{Ipv4Addr, SocketAddr};
    use std::time::Duration;

    async fn spawn_server(metadata: InstanceMetadata) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = server::router(MetadataService::new(metadata));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn client_for(addr: SocketAddr) -> MetadataClient {
        MetadataClient::new(
            MetadataConfig::new()
                .with_endpoint(format!("http://{addr}"))
                .with_timeout(Duration::from_secs(2)),
        )
        .unwrap()
    }

    fn test_metadata() -> InstanceMetadata {
        InstanceMetadata::new("i-123456")
            .with_mac("aa:bb:cc:dd:ee:01")
            .with_interface(
                NetworkInterface::new("aa:bb:cc:dd:ee:01")
                    .with_eni_id("eni-primary")
                    .with_primary_ip(Ipv4Addr::new(10, 0, 0, 5))
                    .with_gateway(Ipv4Addr::new(10, 0, 0, 1))
                    .with_vswitch("vsw-1", "10.0.0.0/24".parse().unwrap()),
            )
    }

    #[tokio::test]
    async fn test_fetch_values() {
        let addr = spawn_server(test_metadata()).await;
        let client = client_for(addr);

        assert_eq!(client.instance_id().await.unwrap(), "i-123456");
        assert_eq!(client.macs().await.unwrap(), vec!["aa:bb:cc:dd:ee:01"]);
        assert_eq!(
            client.primary_ip("aa:bb:cc:dd:ee:01").await.unwrap(),
            Ipv4Addr::new(10, 0, 0, 5)
        );
        assert_eq!(
            client.vswitch_cidr("aa:bb:cc:dd:ee:01").await.unwrap().to_string(),
            "10.0.0.0/24"
        );
        assert_eq!(
            client.private_ipv4s("aa:bb:cc:dd:ee:01").await.unwrap(),
            vec![Ipv4Addr::new(10, 0, 0, 5)]
        );
    }

    #[tokio::test]
    async fn test_missing_value_maps_to_not_found() {
        let addr = spawn_server(test_metadata()).await;
        let client = client_for(addr);

        let err = client.ipv6_gateway("aa:bb:cc:dd:ee:01").await.unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn test_invalid_path_maps_to_status() {
        let addr = spawn_server(test_metadata()).await;
        let client = client_for(addr);

        let err = client.fetch("bogus").await.unwrap_err();
        assert!(matches!(err, MetadataError::Status { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        // bind then drop so nothing listens on the port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(addr);
        let err = client.primary_mac().await.unwrap_err();
        assert!(matches!(err, MetadataError::Http { ref path, .. } if path == "mac"));
    }
}
