//! Zone 相关类型

use std::fmt;

use serde::{Deserialize, Serialize};

/// TTL applied when a create request leaves it unset.
pub const DEFAULT_TTL: u32 = 86400;

/// How a single zone is addressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "camelCase")]
pub enum ZoneSelector {
    Id(String),
    Name(String),
}

impl fmt::Display for ZoneSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "zone id '{id}'"),
            Self::Name(name) => write!(f, "zone '{name}'"),
        }
    }
}

/// 创建 Zone 请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateZoneRequest {
    pub name: String,
    /// Defaults to [`DEFAULT_TTL`].
    pub ttl: Option<u32>,
}

/// 更新 Zone 请求
///
/// Unset fields keep the zone's current values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateZoneRequest {
    pub name: Option<String>,
    pub ttl: Option<u32>,
}

impl UpdateZoneRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.ttl.is_none()
    }
}
