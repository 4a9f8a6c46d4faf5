//! Hetzner 错误映射
//!
//! The API reports failures through the HTTP status; the body only adds a
//! human-readable message. Reference: <https://dns.hetzner.com/api-docs>

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::HetznerDnsClient;

impl ProviderErrorMapper for HetznerDnsClient {
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.status {
            401 => ProviderError::InvalidCredentials {
                raw_message: Some(raw.message),
            },

            403 => ProviderError::PermissionDenied {
                raw_message: Some(raw.message),
            },

            // A record id in context means the request targeted a record
            404 => match (context.record_id, context.zone) {
                (Some(record_id), _) => ProviderError::RecordNotFound {
                    record_id,
                    raw_message: Some(raw.message),
                },
                (None, Some(zone)) => ProviderError::ZoneNotFound {
                    zone,
                    raw_message: Some(raw.message),
                },
                (None, None) => self.unknown_error(raw),
            },

            409 => ProviderError::ZoneExists {
                zone: context.zone.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            400 | 406 | 422 => ProviderError::InvalidParameter {
                param: guess_param(&raw.message),
                detail: raw.message,
            },

            _ => self.unknown_error(raw),
        }
    }
}

/// Pulls the offending field name out of messages such as
/// `"invalid value for 'ttl'"` or `"ttl: must be positive"`.
fn guess_param(message: &str) -> Option<String> {
    const FIELDS: [&str; 5] = ["zone_id", "name", "type", "value", "ttl"];
    let lower = message.to_ascii_lowercase();
    FIELDS
        .iter()
        .find(|field| {
            lower.contains(&format!("'{field}'"))
                || lower.contains(&format!("\"{field}\""))
                || lower.starts_with(&format!("{field}:"))
        })
        .map(|field| (*field).to_string())
}
