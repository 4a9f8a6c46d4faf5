//! DNS API client implementations

mod hetzner;

pub use hetzner::{ClientConfig, HETZNER_API_BASE, HetznerDnsClient, HetznerDnsClientBuilder};
