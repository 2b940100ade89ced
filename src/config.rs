//! Connection settings for the Ipregistry API

use std::time::Duration;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.ipregistry.co";

/// EU API endpoint; requests are served by nodes hosted in the European Union
pub const EU_BASE_URL: &str = "https://eu.api.ipregistry.co";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Immutable connection settings, fixed at client construction.
///
/// # Example
/// ```
/// use ipregistry::IpregistryConfig;
/// use std::time::Duration;
///
/// let config = IpregistryConfig::new("my-api-key")
///     .with_eu_base_url()
///     .with_timeout(Duration::from_secs(3));
/// ```
#[derive(Debug, Clone)]
pub struct IpregistryConfig {
    /// API key passed as the `key` query parameter on every request
    pub api_key: String,
    /// Endpoint all requests are sent to, without a trailing slash
    pub base_url: String,
    /// Timeout applied to each HTTP request
    pub timeout: Duration,
}

impl IpregistryConfig {
    /// Settings for `api.ipregistry.co` with the default timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Send requests to a custom endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Send requests to the EU endpoint.
    pub fn with_eu_base_url(self) -> Self {
        self.with_base_url(EU_BASE_URL)
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
