//! Rendering of command results for stdout

use hetzner_dns_core::Resolved;
use hetzner_dns_core::types::{Record, Zone};
use serde_json::json;

/// A command's printable result.
#[derive(Debug)]
pub enum Output {
    Zone(Zone),
    Zones(Vec<Zone>),
    /// Result of a record lookup; `None` renders as `{}`.
    Records(Resolved<Record>),
    /// A plain list, always rendered as an array.
    RecordList(Vec<Record>),
    Ids(Resolved<String>),
    Ok,
}

impl Output {
    pub fn render(&self) -> serde_json::Result<String> {
        match self {
            Self::Zone(zone) => serde_json::to_string(&json!({ "zone": zone })),
            Self::Zones(zones) => serde_json::to_string(&json!({ "zones": zones })),
            Self::Records(Resolved::None) | Self::Ids(Resolved::None) => Ok("{}".to_string()),
            Self::Records(Resolved::One(record)) => {
                serde_json::to_string(&json!({ "record": record }))
            }
            Self::Records(Resolved::Many(records)) | Self::RecordList(records) => {
                serde_json::to_string(&json!({ "records": records }))
            }
            Self::Ids(Resolved::One(id)) => Ok(id.clone()),
            Self::Ids(Resolved::Many(ids)) => serde_json::to_string(ids),
            Self::Ok => Ok("OK".to_string()),
        }
    }
}
