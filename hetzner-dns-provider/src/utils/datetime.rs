//! 日期时间序列化/反序列化工具
//!
//! - 序列化: `DateTime`<Utc> -> RFC3339 字符串
//! - 反序列化: Hetzner 格式 (`2024-03-01 12:30:00.123 +0000 UTC`) 或 RFC3339 -> `DateTime`<Utc>
//!
//! Unparseable timestamps deserialize to `None` instead of failing the whole
//! zone/record payload.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Hetzner timestamp layout, with the trailing zone name stripped.
const HETZNER_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f %z";

/// 序列化 Option<`DateTime`<Utc>> 为 Option<RFC3339 字符串>
#[allow(clippy::ref_option)]
pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

/// 反序列化：空字符串、`null` 或无法识别的格式均为 `None`
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// 解析 Hetzner 时间戳，回退到 RFC3339
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let without_zone_name = trimmed.strip_suffix(" UTC").unwrap_or(trimmed);
    if let Ok(dt) = DateTime::parse_from_str(without_zone_name, HETZNER_FORMAT) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
