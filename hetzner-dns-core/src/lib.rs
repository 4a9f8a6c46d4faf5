//! Hetzner DNS Core Library
//!
//! Business logic on top of the Hetzner DNS API binding:
//! - Entity resolution with multiplicity policies ([`resolver`])
//! - Zone management ([`ZoneService`])
//! - DNS record management, including cascading delete ([`RecordService`])
//!
//! Services take the API through [`ServiceContext`] as an `Arc<dyn DnsApi>`,
//! so any implementation (the HTTP client, or an in-memory one in tests) can
//! be injected. Nothing here reads the process environment.

pub mod error;
pub mod resolver;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use resolver::{MultiplicityPolicy, RecordFilter, Resolved, ZoneFilter};
pub use services::{RecordService, ServiceContext, ZoneService};
