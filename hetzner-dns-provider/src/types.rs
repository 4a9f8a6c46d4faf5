use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============ Pagination ============

/// Default number of items requested per page.
///
/// The Hetzner DNS API accepts at most 100.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Pagination metadata attached to list responses.
///
/// Pages are 1-indexed. A list response without metadata is treated as a
/// single, complete page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number.
    pub page: u32,
    /// Page size used for this request.
    pub per_page: u32,
    /// Number of the last available page.
    pub last_page: u32,
    /// Total number of items across all pages.
    pub total_entries: u32,
}

impl Pagination {
    /// Whether there are more pages after this one.
    pub fn has_more(&self) -> bool {
        self.page < self.last_page
    }
}

// ============ Zone Types ============

/// A DNS zone (domain) managed by the account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Zone {
    /// Zone identifier. Immutable.
    pub id: String,
    /// Domain name (e.g. `"example.com"`). Unique within the account.
    pub name: String,
    /// Default TTL in seconds for records without their own TTL.
    #[serde(default)]
    pub ttl: u32,
    /// Zone status as reported by the API (`"verified"`, `"failed"`, `"pending"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Number of records in this zone, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_count: Option<u32>,
    /// Authoritative name servers assigned to the zone.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ns: Vec<String>,
    /// Whether the zone is paused.
    #[serde(default)]
    pub paused: bool,
    /// Whether the zone is a secondary zone.
    #[serde(default)]
    pub is_secondary_dns: bool,
    /// When the zone was created, if known.
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<chrono::DateTime<chrono::Utc>>,
    /// When the zone was last modified, if known.
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<chrono::DateTime<chrono::Utc>>,
    /// When the zone's delegation was last verified, if ever.
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<chrono::DateTime<chrono::Utc>>,
}

/// Request to create a new zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateZoneRequest {
    /// Domain name of the new zone.
    pub name: String,
    /// Default TTL in seconds.
    pub ttl: u32,
}

/// Request to replace the mutable attributes of a zone.
///
/// The API requires both fields on update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateZoneRequest {
    /// New (or unchanged) domain name.
    pub name: String,
    /// New (or unchanged) default TTL in seconds.
    pub ttl: u32,
}

// ============ Record Types ============

/// DNS record type.
///
/// Serialized as the uppercase mnemonic (`"A"`, `"AAAA"`, ...). Types this
/// crate has no variant for are kept, uppercased, in [`Other`](Self::Other)
/// so a listing never fails on an unfamiliar record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record. Value format: `"<priority> <exchange>"`.
    Mx,
    /// Text record.
    Txt,
    /// Service locator record. Value format: `"<priority> <weight> <port> <target>"`.
    Srv,
    /// Name server record.
    Ns,
    /// Certificate Authority Authorization record.
    Caa,
    /// Start of authority record (managed by the API).
    Soa,
    /// Pointer record.
    Ptr,
    /// TLSA record.
    Tlsa,
    /// DS record.
    Ds,
    /// Any other type, uppercased.
    Other(String),
}

impl RecordType {
    /// Returns the uppercase mnemonic.
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Srv => "SRV",
            Self::Ns => "NS",
            Self::Caa => "CAA",
            Self::Soa => "SOA",
            Self::Ptr => "PTR",
            Self::Tlsa => "TLSA",
            Self::Ds => "DS",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for RecordType {
    fn from(s: String) -> Self {
        let upper = s.to_ascii_uppercase();
        match upper.as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "MX" => Self::Mx,
            "TXT" => Self::Txt,
            "SRV" => Self::Srv,
            "NS" => Self::Ns,
            "CAA" => Self::Caa,
            "SOA" => Self::Soa,
            "PTR" => Self::Ptr,
            "TLSA" => Self::Tlsa,
            "DS" => Self::Ds,
            _ => Self::Other(upper),
        }
    }
}

impl From<RecordType> for String {
    fn from(t: RecordType) -> Self {
        match t {
            RecordType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for RecordType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DNS record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Record identifier.
    pub id: String,
    /// Identifier of the owning zone.
    pub zone_id: String,
    /// Record name relative to the zone (`"www"`, or `"@"` for the apex).
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Record value.
    pub value: String,
    /// TTL in seconds. `None` means the zone default applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// When the record was created, if known.
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<chrono::DateTime<chrono::Utc>>,
    /// When the record was last modified, if known.
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// Record attributes sent on create and update.
///
/// `POST /records` and `PUT /records/{id}` take the same body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordAttributes {
    /// Identifier of the owning zone.
    pub zone_id: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Record name relative to the zone.
    pub name: String,
    /// Record value.
    pub value: String,
    /// TTL in seconds. Omitted from the body when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}
