//! # hetzner-dns-provider
//!
//! Typed async client for the [Hetzner DNS API](https://dns.hetzner.com/api-docs).
//!
//! The crate covers zones and records: listing (all pages), single-object
//! reads, create, update and delete. Each [`DnsApi`] method maps to one
//! logical API operation; there is no caching and no hidden state.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls instead.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hetzner_dns_provider::{DnsApi, HetznerDnsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HetznerDnsClient::builder("your-token").build()?;
//!
//!     for zone in client.list_zones(None).await? {
//!         println!("{} ({})", zone.name, zone.id);
//!         for record in client.list_records(Some(&zone.id)).await? {
//!             println!("  {} {} {}", record.name, record.record_type, record.value);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::InvalidCredentials`]: the token was rejected
//! - [`ProviderError::ZoneNotFound`] / [`ProviderError::RecordNotFound`]: 404 on a known target
//! - [`ProviderError::RateLimited`]: HTTP 429
//! - [`ProviderError::NetworkError`] / [`ProviderError::Timeout`]: transport failures
//!
//! Retries are off by default; see
//! [`HetznerDnsClientBuilder::max_retries`].

mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export the API trait (internal traits are not exported)
pub use traits::DnsApi;

// Re-export types
pub use types::{
    CreateZoneRequest, DEFAULT_PAGE_SIZE, Pagination, Record, RecordAttributes, RecordType,
    UpdateZoneRequest, Zone,
};

// Re-export utils
pub use utils::datetime;
pub use utils::log_sanitizer::mask_token;

// Re-export the client
pub use providers::{ClientConfig, HETZNER_API_BASE, HetznerDnsClient, HetznerDnsClientBuilder};
