//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use hetzner_dns_provider::{
    CreateZoneRequest, DnsApi, ProviderError, Record, RecordAttributes, RecordType, Result,
    UpdateZoneRequest, Zone,
};
use tokio::sync::RwLock;

// ===== Factories =====

pub fn zone(id: &str, name: &str) -> Zone {
    Zone {
        id: id.to_string(),
        name: name.to_string(),
        ttl: 86400,
        status: Some("verified".to_string()),
        records_count: None,
        ns: Vec::new(),
        paused: false,
        is_secondary_dns: false,
        created: None,
        modified: None,
        verified: None,
    }
}

pub fn record(id: &str, zone_id: &str, name: &str, record_type: RecordType, value: &str) -> Record {
    Record {
        id: id.to_string(),
        zone_id: zone_id.to_string(),
        name: name.to_string(),
        record_type,
        value: value.to_string(),
        ttl: Some(300),
        created: None,
        modified: None,
    }
}

// ===== MockDnsApi =====

/// One recorded call against [`MockDnsApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListZones(Option<String>),
    GetZone(String),
    CreateZone(String),
    UpdateZone(String),
    DeleteZone(String),
    ListRecords(Option<String>),
    GetRecord(String),
    CreateRecord(String),
    UpdateRecord(String),
    DeleteRecord(String),
}

/// In-memory account that records every call made against it.
pub struct MockDnsApi {
    zones: RwLock<Vec<Zone>>,
    records: RwLock<Vec<Record>>,
    calls: RwLock<Vec<ApiCall>>,
    /// 如果 Some，删除该记录 id 时返回错误（用于测试中断路径）
    fail_delete: RwLock<Option<String>>,
    next_id: AtomicUsize,
}

impl MockDnsApi {
    pub fn new() -> Self {
        Self {
            zones: RwLock::new(Vec::new()),
            records: RwLock::new(Vec::new()),
            calls: RwLock::new(Vec::new()),
            fail_delete: RwLock::new(None),
            next_id: AtomicUsize::new(1),
        }
    }

    pub async fn add_zone(&self, zone: Zone) {
        self.zones.write().await.push(zone);
    }

    pub async fn add_record(&self, record: Record) {
        self.records.write().await.push(record);
    }

    pub async fn set_fail_delete(&self, record_id: Option<&str>) {
        *self.fail_delete.write().await = record_id.map(str::to_string);
    }

    pub async fn zones(&self) -> Vec<Zone> {
        self.zones.read().await.clone()
    }

    pub async fn records(&self) -> Vec<Record> {
        self.records.read().await.clone()
    }

    pub async fn calls(&self) -> Vec<ApiCall> {
        self.calls.read().await.clone()
    }

    async fn record_call(&self, call: ApiCall) {
        self.calls.write().await.push(call);
    }

    fn fresh_id(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn zone_not_found(zone: &str) -> ProviderError {
        ProviderError::ZoneNotFound {
            zone: zone.to_string(),
            raw_message: None,
        }
    }

    fn record_not_found(record_id: &str) -> ProviderError {
        ProviderError::RecordNotFound {
            record_id: record_id.to_string(),
            raw_message: None,
        }
    }
}

#[async_trait]
impl DnsApi for MockDnsApi {
    async fn list_zones(&self, name: Option<&str>) -> Result<Vec<Zone>> {
        self.record_call(ApiCall::ListZones(name.map(str::to_string)))
            .await;
        Ok(self
            .zones
            .read()
            .await
            .iter()
            .filter(|z| name.is_none_or(|n| z.name == n))
            .cloned()
            .collect())
    }

    async fn get_zone(&self, zone_id: &str) -> Result<Zone> {
        self.record_call(ApiCall::GetZone(zone_id.to_string())).await;
        self.zones
            .read()
            .await
            .iter()
            .find(|z| z.id == zone_id)
            .cloned()
            .ok_or_else(|| Self::zone_not_found(zone_id))
    }

    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<Zone> {
        self.record_call(ApiCall::CreateZone(req.name.clone())).await;
        let mut created = zone(&self.fresh_id("z"), &req.name);
        created.ttl = req.ttl;
        self.zones.write().await.push(created.clone());
        Ok(created)
    }

    async fn update_zone(&self, zone_id: &str, req: &UpdateZoneRequest) -> Result<Zone> {
        self.record_call(ApiCall::UpdateZone(zone_id.to_string()))
            .await;
        let mut zones = self.zones.write().await;
        let zone = zones
            .iter_mut()
            .find(|z| z.id == zone_id)
            .ok_or_else(|| Self::zone_not_found(zone_id))?;
        zone.name.clone_from(&req.name);
        zone.ttl = req.ttl;
        Ok(zone.clone())
    }

    async fn delete_zone(&self, zone_id: &str) -> Result<()> {
        self.record_call(ApiCall::DeleteZone(zone_id.to_string()))
            .await;
        let mut zones = self.zones.write().await;
        let before = zones.len();
        zones.retain(|z| z.id != zone_id);
        if zones.len() == before {
            return Err(Self::zone_not_found(zone_id));
        }
        self.records.write().await.retain(|r| r.zone_id != zone_id);
        Ok(())
    }

    async fn list_records(&self, zone_id: Option<&str>) -> Result<Vec<Record>> {
        self.record_call(ApiCall::ListRecords(zone_id.map(str::to_string)))
            .await;
        if let Some(id) = zone_id
            && !self.zones.read().await.iter().any(|z| z.id == id)
        {
            return Err(Self::zone_not_found(id));
        }
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| zone_id.is_none_or(|id| r.zone_id == id))
            .cloned()
            .collect())
    }

    async fn get_record(&self, record_id: &str) -> Result<Record> {
        self.record_call(ApiCall::GetRecord(record_id.to_string()))
            .await;
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
            .ok_or_else(|| Self::record_not_found(record_id))
    }

    async fn create_record(&self, attrs: &RecordAttributes) -> Result<Record> {
        self.record_call(ApiCall::CreateRecord(attrs.zone_id.clone()))
            .await;
        let mut created = record(
            &self.fresh_id("r"),
            &attrs.zone_id,
            &attrs.name,
            attrs.record_type.clone(),
            &attrs.value,
        );
        created.ttl = attrs.ttl;
        self.records.write().await.push(created.clone());
        Ok(created)
    }

    async fn update_record(&self, record_id: &str, attrs: &RecordAttributes) -> Result<Record> {
        self.record_call(ApiCall::UpdateRecord(record_id.to_string()))
            .await;
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| Self::record_not_found(record_id))?;
        record.zone_id.clone_from(&attrs.zone_id);
        record.record_type = attrs.record_type.clone();
        record.name.clone_from(&attrs.name);
        record.value.clone_from(&attrs.value);
        record.ttl = attrs.ttl;
        Ok(record.clone())
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        self.record_call(ApiCall::DeleteRecord(record_id.to_string()))
            .await;
        if self.fail_delete.read().await.as_deref() == Some(record_id) {
            return Err(ProviderError::Unknown {
                status: Some(500),
                raw_message: "internal server error".to_string(),
            });
        }
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != record_id);
        if records.len() == before {
            return Err(Self::record_not_found(record_id));
        }
        Ok(())
    }
}
