//! Hetzner DNS API envelope types

use serde::Deserialize;

use crate::types::{Pagination, Record, Zone};

// ============ Response envelopes ============

/// `GET /zones`
#[derive(Debug, Deserialize)]
pub struct ListZonesResponse {
    #[serde(default)]
    pub zones: Vec<Zone>,
    pub meta: Option<ListMeta>,
}

/// `GET|POST|PUT /zones[/{id}]`
#[derive(Debug, Deserialize)]
pub struct ZoneResponse {
    pub zone: Zone,
}

/// `GET /records`
#[derive(Debug, Deserialize)]
pub struct ListRecordsResponse {
    #[serde(default)]
    pub records: Vec<Record>,
    pub meta: Option<ListMeta>,
}

/// `GET|POST|PUT /records[/{id}]`
#[derive(Debug, Deserialize)]
pub struct RecordResponse {
    pub record: Record,
}

/// List metadata wrapper.
#[derive(Debug, Deserialize)]
pub struct ListMeta {
    pub pagination: Option<Pagination>,
}

// ============ Error bodies ============

/// Error payload. The API uses either `{"error": {"message", "code"}}` or a
/// bare `{"message": ...}`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<ErrorDetail>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: String,
    /// Usually the HTTP status as a number; sometimes a string or `0`.
    #[serde(default)]
    pub code: serde_json::Value,
}

impl ErrorResponse {
    /// The body's error code when it names an HTTP error status.
    pub fn status_code(&self) -> Option<u16> {
        let code = &self.error.as_ref()?.code;
        code.as_u64()
            .or_else(|| code.as_str().and_then(|c| c.trim().parse().ok()))
            .and_then(|c| u16::try_from(c).ok())
            .filter(|c| (400..600).contains(c))
    }

    /// The most specific non-empty message in the body.
    pub fn into_message(self) -> Option<String> {
        self.error
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .or(self.message.filter(|m| !m.is_empty()))
    }
}
