//! Metadata client configuration

use std::time::Duration;

/// Link-local address of the instance metadata server
pub const DEFAULT_ENDPOINT: &str = "http://100.100.100.200";

/// API version prefix
pub const API_VERSION: &str = "latest";

/// Per-request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Metadata client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataConfig {
    /// Base URL of the metadata server, without the version prefix
    pub endpoint: String,

    /// Timeout applied to every request
    pub timeout: Duration,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl MetadataConfig {
    /// Create a config with the default endpoint and timeout
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of a metadata path
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}/meta-data/{}",
            self.endpoint.trim_end_matches('/'),
            API_VERSION,
            path.trim_start_matches('/')
        )
    }
}
