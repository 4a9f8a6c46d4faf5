//! Hetzner DNS client

mod error;
mod http;
mod provider;
/// Hetzner API-specific request/response envelopes.
pub(crate) mod types;

use std::fmt;
use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::utils::log_sanitizer::mask_token;

/// Hetzner DNS API base URL.
pub const HETZNER_API_BASE: &str = "https://dns.hetzner.com/api/v1";

/// Header carrying the API token.
pub(crate) const AUTH_HEADER: &str = "Auth-API-Token";

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Explicit client configuration.
///
/// Built through [`HetznerDnsClient::builder`]; nothing here is read from
/// the environment.
#[derive(Clone)]
pub struct ClientConfig {
    /// API token sent in the `Auth-API-Token` header.
    pub api_token: String,
    /// Base URL, without a trailing slash.
    pub base_url: String,
    /// Automatic retries for transient failures. `0` disables retrying.
    pub max_retries: u32,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub request_timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_token", &mask_token(&self.api_token))
            .field("base_url", &self.base_url)
            .field("max_retries", &self.max_retries)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Hetzner DNS API client.
///
/// # Construction
///
/// ```rust,no_run
/// use hetzner_dns_provider::HetznerDnsClient;
///
/// let client = HetznerDnsClient::builder("your-api-token")
///     .max_retries(2)
///     .build()?;
/// # Ok::<(), hetzner_dns_provider::ProviderError>(())
/// ```
#[derive(Debug)]
pub struct HetznerDnsClient {
    pub(crate) client: Client,
    pub(crate) config: ClientConfig,
}

/// Builder for [`HetznerDnsClient`].
pub struct HetznerDnsClientBuilder {
    config: ClientConfig,
}

impl HetznerDnsClientBuilder {
    fn new(api_token: String) -> Self {
        Self {
            config: ClientConfig {
                api_token,
                base_url: HETZNER_API_BASE.to_string(),
                max_retries: 0,
                connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
                request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            },
        }
    }

    /// Override the API base URL (e.g. for a mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the maximum number of automatic retries for transient errors (default: 0).
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the TCP connect timeout (default: 10s).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the whole-request timeout (default: 30s).
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Build the client.
    ///
    /// Fails with [`ProviderError::InvalidCredentials`] on an empty token and
    /// with [`ProviderError::NetworkError`] if the TLS backend cannot start.
    pub fn build(self) -> Result<HetznerDnsClient> {
        HetznerDnsClient::from_config(self.config)
    }
}

impl HetznerDnsClient {
    /// Returns a builder with default settings for the given token.
    pub fn builder(api_token: impl Into<String>) -> HetznerDnsClientBuilder {
        HetznerDnsClientBuilder::new(api_token.into())
    }

    /// Creates a client from a fully specified configuration.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        if config.api_token.trim().is_empty() {
            return Err(ProviderError::InvalidCredentials {
                raw_message: Some("API token is empty".to_string()),
            });
        }

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ProviderError::NetworkError {
                detail: format!("Failed to create HTTP client: {e}"),
            })?;

        log::debug!("Hetzner DNS client configured: {config:?}");
        Ok(Self { client, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let client = HetznerDnsClient::builder("token-123456789").build().unwrap();
        assert_eq!(client.config().base_url, HETZNER_API_BASE);
        assert_eq!(client.config().max_retries, 0);
        assert_eq!(client.config().request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn builder_strips_trailing_slash() {
        let client = HetznerDnsClient::builder("token-123456789")
            .base_url("http://127.0.0.1:8080/")
            .build()
            .unwrap();
        assert_eq!(client.config().base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn empty_token_is_rejected() {
        let result = HetznerDnsClient::builder("  ").build();
        assert!(matches!(
            result,
            Err(ProviderError::InvalidCredentials { .. })
        ));
    }

    #[test]
    fn debug_output_masks_token() {
        let client = HetznerDnsClient::builder("supersecrettoken").build().unwrap();
        let debug = format!("{:?}", client.config());
        assert!(!debug.contains("supersecrettoken"));
        assert!(debug.contains("supe****"));
    }
}
