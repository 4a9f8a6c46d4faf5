//! DNS 记录相关类型

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::resolver::{Criteria, MultiplicityPolicy, RecordFilter};

use super::{RecordType, ZoneSelector};

/// Record name used when a create request leaves it unset (the zone apex).
pub const DEFAULT_RECORD_NAME: &str = "@";

/// Which records a listing covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordScope {
    Zone(ZoneSelector),
    AllZones,
}

/// Addresses records either directly by id or through the resolver.
///
/// With `record_id` set every other field is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLookup {
    pub record_id: Option<String>,
    pub zone_id: Option<String>,
    pub zone_name: Option<String>,
    pub filter: RecordFilter,
    /// Search every zone in the account instead of one.
    pub search_all_zones: bool,
    pub policy: MultiplicityPolicy,
}

impl RecordLookup {
    /// Direct lookup by record id.
    pub fn by_id(record_id: impl Into<String>) -> Self {
        Self {
            record_id: Some(record_id.into()),
            ..Default::default()
        }
    }

    /// Indirect lookup within one zone.
    pub fn in_zone(zone: ZoneSelector, filter: RecordFilter) -> Self {
        let mut lookup = Self {
            filter,
            ..Default::default()
        };
        match zone {
            ZoneSelector::Id(id) => lookup.zone_id = Some(id),
            ZoneSelector::Name(name) => lookup.zone_name = Some(name),
        }
        lookup
    }

    #[must_use]
    pub fn with_policy(mut self, policy: MultiplicityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Whether a zone (or the all-zones override) bounds the search.
    pub fn is_scoped(&self) -> bool {
        self.zone_id.is_some() || self.zone_name.is_some() || self.search_all_zones
    }

    /// Checks the lookup can run, before any API call is made.
    pub fn validate(&self) -> CoreResult<()> {
        if self.record_id.is_some() || self.is_scoped() {
            return Ok(());
        }
        if self.filter.is_empty() {
            Err(CoreError::InsufficientCriteria)
        } else {
            Err(CoreError::ScopeRequired)
        }
    }
}

/// 创建 DNS 记录请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    pub zone: ZoneSelector,
    pub record_type: RecordType,
    /// Defaults to [`DEFAULT_RECORD_NAME`].
    pub name: Option<String>,
    /// MX: `"<priority> <exchange>"`, SRV: `"<priority> <weight> <port> <target>"`.
    pub value: String,
    /// Defaults to [`DEFAULT_TTL`](super::DEFAULT_TTL).
    pub ttl: Option<u32>,
}

/// 更新 DNS 记录请求
///
/// `target` must resolve to exactly one record. Unset fields keep that
/// record's current values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecordRequest {
    pub target: RecordLookup,
    /// Move the record to another zone.
    pub zone: Option<ZoneSelector>,
    pub record_type: Option<RecordType>,
    pub name: Option<String>,
    pub value: Option<String>,
    pub ttl: Option<u32>,
}

/// What a record delete acts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteTarget {
    Id(String),
    Ids(Vec<String>),
    Lookup(RecordLookup),
}

/// 删除结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    /// Ids removed, in deletion order.
    pub deleted: Vec<String>,
}
