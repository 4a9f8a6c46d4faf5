//! Hetzner DnsApi trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::{DnsApi, ErrorContext};
use crate::types::{CreateZoneRequest, Record, RecordAttributes, UpdateZoneRequest, Zone};

use super::HetznerDnsClient;
use super::types::{ListRecordsResponse, ListZonesResponse, RecordResponse, ZoneResponse};

fn zone_path(zone_id: &str) -> String {
    format!("/zones/{}", urlencoding::encode(zone_id))
}

fn record_path(record_id: &str) -> String {
    format!("/records/{}", urlencoding::encode(record_id))
}

#[async_trait]
impl DnsApi for HetznerDnsClient {
    async fn list_zones(&self, name: Option<&str>) -> Result<Vec<Zone>> {
        let mut query = Vec::new();
        let mut ctx = ErrorContext::default();
        if let Some(name) = name {
            query.push(("name", name.to_string()));
            ctx = ErrorContext::zone(name);
        }

        let result = self
            .get_all_pages(
                "/zones",
                &query,
                ctx,
                |body: ListZonesResponse| (body.zones, body.meta.and_then(|m| m.pagination)),
            )
            .await;

        match result {
            // A name filter that matches nothing is reported as 404
            Err(ProviderError::ZoneNotFound { .. }) if name.is_some() => Ok(Vec::new()),
            other => other,
        }
    }

    async fn get_zone(&self, zone_id: &str) -> Result<Zone> {
        let body: ZoneResponse = self
            .get(&zone_path(zone_id), &[], ErrorContext::zone(zone_id))
            .await?;
        Ok(body.zone)
    }

    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<Zone> {
        let body: ZoneResponse = self
            .post("/zones", req, ErrorContext::zone(&req.name))
            .await?;
        log::info!("Created zone {} ({})", body.zone.name, body.zone.id);
        Ok(body.zone)
    }

    async fn update_zone(&self, zone_id: &str, req: &UpdateZoneRequest) -> Result<Zone> {
        let body: ZoneResponse = self
            .put(&zone_path(zone_id), req, ErrorContext::zone(zone_id))
            .await?;
        log::info!("Updated zone {zone_id}");
        Ok(body.zone)
    }

    async fn delete_zone(&self, zone_id: &str) -> Result<()> {
        self.delete(&zone_path(zone_id), ErrorContext::zone(zone_id))
            .await?;
        log::info!("Deleted zone {zone_id}");
        Ok(())
    }

    async fn list_records(&self, zone_id: Option<&str>) -> Result<Vec<Record>> {
        let mut query = Vec::new();
        let mut ctx = ErrorContext::default();
        if let Some(zone_id) = zone_id {
            query.push(("zone_id", zone_id.to_string()));
            ctx = ErrorContext::zone(zone_id);
        }

        self.get_all_pages(
            "/records",
            &query,
            ctx,
            |body: ListRecordsResponse| (body.records, body.meta.and_then(|m| m.pagination)),
        )
        .await
    }

    async fn get_record(&self, record_id: &str) -> Result<Record> {
        let body: RecordResponse = self
            .get(&record_path(record_id), &[], ErrorContext::record(record_id))
            .await?;
        Ok(body.record)
    }

    async fn create_record(&self, attrs: &RecordAttributes) -> Result<Record> {
        let body: RecordResponse = self
            .post("/records", attrs, ErrorContext::zone(&attrs.zone_id))
            .await?;
        log::info!(
            "Created {} record {} in zone {}",
            body.record.record_type,
            body.record.id,
            body.record.zone_id
        );
        Ok(body.record)
    }

    async fn update_record(&self, record_id: &str, attrs: &RecordAttributes) -> Result<Record> {
        let body: RecordResponse = self
            .put(&record_path(record_id), attrs, ErrorContext::record(record_id))
            .await?;
        log::info!("Updated record {record_id}");
        Ok(body.record)
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        self.delete(&record_path(record_id), ErrorContext::record(record_id))
            .await?;
        log::info!("Deleted record {record_id}");
        Ok(())
    }
}
