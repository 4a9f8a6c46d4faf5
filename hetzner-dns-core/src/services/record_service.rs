//! DNS 记录管理服务

use std::sync::Arc;

use hetzner_dns_provider::RecordAttributes;

use crate::error::{CoreError, CoreResult};
use crate::resolver::{self, Resolved};
use crate::services::{ServiceContext, ZoneService};
use crate::types::{
    CreateRecordRequest, DEFAULT_RECORD_NAME, DEFAULT_TTL, DeleteOutcome, DeleteTarget, Record,
    RecordLookup, RecordScope, UpdateRecordRequest, ZoneSelector,
};

/// DNS 记录管理服务
pub struct RecordService {
    ctx: Arc<ServiceContext>,
    zones: ZoneService,
}

impl RecordService {
    /// 创建 DNS 记录服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        let zones = ZoneService::new(Arc::clone(&ctx));
        Self { ctx, zones }
    }

    /// 列出记录（单个 Zone 或全部 Zone）
    pub async fn list_records(&self, scope: &RecordScope) -> CoreResult<Vec<Record>> {
        let zone_id = match scope {
            RecordScope::Zone(selector) => Some(self.zones.resolve_zone_id(selector).await?),
            RecordScope::AllZones => None,
        };
        Ok(self.ctx.api.list_records(zone_id.as_deref()).await?)
    }

    /// 获取记录
    ///
    /// Direct by id when `lookup.record_id` is set, otherwise the zone's
    /// records (or every record) are resolved against `lookup.filter`.
    pub async fn get_record(&self, lookup: &RecordLookup) -> CoreResult<Resolved<Record>> {
        lookup.validate()?;

        if let Some(record_id) = &lookup.record_id {
            let record = self.ctx.api.get_record(record_id).await?;
            return Ok(Resolved::One(record));
        }

        let zone_id = self
            .lookup_zone_id(lookup.zone_id.as_deref(), lookup.zone_name.as_deref())
            .await?;
        let candidates = self.ctx.api.list_records(zone_id.as_deref()).await?;
        log::debug!(
            "Resolving {} candidate record(s) with {:?} under {:?}",
            candidates.len(),
            lookup.filter,
            lookup.policy
        );
        resolver::resolve(candidates, &lookup.filter, true, lookup.policy)
    }

    /// 获取记录 id（id-only 投影）
    pub async fn get_record_ids(&self, lookup: &RecordLookup) -> CoreResult<Resolved<String>> {
        if let Some(record_id) = &lookup.record_id {
            // The id is the answer; confirm it exists
            self.ctx.api.get_record(record_id).await?;
            return Ok(Resolved::One(record_id.clone()));
        }
        Ok(self.get_record(lookup).await?.ids())
    }

    /// 创建 DNS 记录
    pub async fn create_record(&self, request: CreateRecordRequest) -> CoreResult<Record> {
        let zone_id = self.zones.resolve_zone_id(&request.zone).await?;
        let attrs = RecordAttributes {
            zone_id,
            record_type: request.record_type,
            name: request
                .name
                .unwrap_or_else(|| DEFAULT_RECORD_NAME.to_string()),
            value: request.value,
            ttl: Some(request.ttl.unwrap_or(DEFAULT_TTL)),
        };
        Ok(self.ctx.api.create_record(&attrs).await?)
    }

    /// 更新 DNS 记录
    pub async fn update_record(&self, request: UpdateRecordRequest) -> CoreResult<Record> {
        let current = self
            .get_record(&request.target)
            .await?
            .into_single(|| "record".to_string())?;

        let zone_id = match &request.zone {
            Some(selector) => self.zones.resolve_zone_id(selector).await?,
            None => current.zone_id,
        };
        let attrs = RecordAttributes {
            zone_id,
            record_type: request.record_type.unwrap_or(current.record_type),
            name: request.name.unwrap_or(current.name),
            value: request.value.unwrap_or(current.value),
            ttl: request.ttl.or(current.ttl),
        };

        Ok(self.ctx.api.update_record(&current.id, &attrs).await?)
    }

    /// 删除 DNS 记录
    ///
    /// Ids are deleted one at a time in order. The first failure stops the
    /// loop and is returned; records already deleted stay deleted.
    pub async fn delete_records(&self, target: DeleteTarget) -> CoreResult<DeleteOutcome> {
        let ids = match target {
            DeleteTarget::Id(id) => vec![id],
            DeleteTarget::Ids(ids) => ids,
            DeleteTarget::Lookup(lookup) => match self.get_record_ids(&lookup).await? {
                Resolved::None => return Err(CoreError::NotFound("record".to_string())),
                resolved => resolved.into_vec(),
            },
        };

        let mut outcome = DeleteOutcome::default();
        for id in ids {
            if let Err(e) = self.ctx.api.delete_record(&id).await {
                log::warn!(
                    "Record delete stopped at {id} after {} deletion(s): {e}",
                    outcome.deleted.len()
                );
                return Err(e.into());
            }
            outcome.deleted.push(id);
        }
        Ok(outcome)
    }

    /// Zone id bounding an indirect lookup, `None` for all zones.
    ///
    /// With both an id and a name, the name must resolve to the same id.
    async fn lookup_zone_id(
        &self,
        zone_id: Option<&str>,
        zone_name: Option<&str>,
    ) -> CoreResult<Option<String>> {
        match (zone_id, zone_name) {
            (Some(id), Some(name)) => {
                let resolved_id = self
                    .zones
                    .resolve_zone_id(&ZoneSelector::Name(name.to_string()))
                    .await?;
                if resolved_id != id {
                    return Err(CoreError::ZoneMismatch {
                        zone_id: id.to_string(),
                        zone_name: name.to_string(),
                        resolved_id,
                    });
                }
                Ok(Some(resolved_id))
            }
            (Some(id), None) => Ok(Some(id.to_string())),
            (None, Some(name)) => Ok(Some(
                self.zones
                    .resolve_zone_id(&ZoneSelector::Name(name.to_string()))
                    .await?,
            )),
            (None, None) => Ok(None),
        }
    }
}
