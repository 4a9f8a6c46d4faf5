//! Core layer type definitions

mod record;
mod zone;

pub use record::{
    CreateRecordRequest, DEFAULT_RECORD_NAME, DeleteOutcome, DeleteTarget, RecordLookup,
    RecordScope, UpdateRecordRequest,
};
pub use zone::{CreateZoneRequest, DEFAULT_TTL, UpdateZoneRequest, ZoneSelector};

// Re-export library types
pub use hetzner_dns_provider::{Record, RecordType, Zone};
