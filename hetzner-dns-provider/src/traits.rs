use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{CreateZoneRequest, Record, RecordAttributes, UpdateZoneRequest, Zone};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP 状态码
    pub status: u16,
    /// API 返回的错误消息（`error.message` 或顶层 `message`）
    pub message: String,
}

impl RawApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录 ID（用于 `RecordNotFound`）
    pub record_id: Option<String>,
    /// Zone id 或名称（用于 `ZoneNotFound`/`ZoneExists`）
    pub zone: Option<String>,
}

impl ErrorContext {
    pub fn zone(zone: impl Into<String>) -> Self {
        Self {
            zone: Some(zone.into()),
            ..Default::default()
        }
    }

    pub fn record(record_id: impl Into<String>) -> Self {
        Self {
            record_id: Some(record_id.into()),
            ..Default::default()
        }
    }
}

/// 错误映射 Trait（内部使用）
/// 将 HTTP 状态码与原始错误消息映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            status: Some(raw.status),
            raw_message: raw.message,
        }
    }
}

/// The remote operations the resolver and services are built on.
///
/// Every method is a single logical API call; list methods walk all pages
/// before returning. Implementations hold no state between calls.
#[async_trait]
pub trait DnsApi: Send + Sync {
    /// All zones in the account, optionally narrowed server-side by exact name.
    async fn list_zones(&self, name: Option<&str>) -> Result<Vec<Zone>>;

    /// A single zone by id.
    async fn get_zone(&self, zone_id: &str) -> Result<Zone>;

    /// Create a zone.
    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<Zone>;

    /// Replace a zone's name and TTL.
    async fn update_zone(&self, zone_id: &str, req: &UpdateZoneRequest) -> Result<Zone>;

    /// Delete a zone and all of its records.
    async fn delete_zone(&self, zone_id: &str) -> Result<()>;

    /// Records of one zone, or of every zone when `zone_id` is `None`.
    async fn list_records(&self, zone_id: Option<&str>) -> Result<Vec<Record>>;

    /// A single record by id.
    async fn get_record(&self, record_id: &str) -> Result<Record>;

    /// Create a record.
    async fn create_record(&self, attrs: &RecordAttributes) -> Result<Record>;

    /// Replace a record's attributes.
    async fn update_record(&self, record_id: &str, attrs: &RecordAttributes) -> Result<Record>;

    /// Delete a record by id.
    async fn delete_record(&self, record_id: &str) -> Result<()>;
}
