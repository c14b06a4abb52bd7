//! Gateway configuration.

use std::time::Duration;

/// Where and how the gateway reaches the storefront API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Scheme + host (+ optional prefix) every path is appended to.
    pub api_domain: String,
    /// Path of the multipart upload endpoint.
    pub upload_path: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_domain: "http://localhost:3000".to_string(),
            upload_path: "/upload".to_string(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(3),
        }
    }
}

impl GatewayConfig {
    pub fn new(api_domain: impl Into<String>) -> Self {
        Self {
            api_domain: api_domain.into(),
            ..Self::default()
        }
    }

    /// Absolute URL for a path on the API domain.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_domain.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
