//! Zone 管理服务

use std::sync::Arc;

use hetzner_dns_provider as api;

use crate::error::{CoreError, CoreResult};
use crate::resolver::{self, MultiplicityPolicy, ZoneFilter};
use crate::services::ServiceContext;
use crate::types::{CreateZoneRequest, DEFAULT_TTL, UpdateZoneRequest, Zone, ZoneSelector};

/// Zone 管理服务
pub struct ZoneService {
    ctx: Arc<ServiceContext>,
}

impl ZoneService {
    /// 创建 Zone 服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 列出账号下的所有 Zone
    pub async fn list_zones(&self) -> CoreResult<Vec<Zone>> {
        Ok(self.ctx.api.list_zones(None).await?)
    }

    /// 获取单个 Zone
    ///
    /// By name, the account's zones are filtered server-side and then
    /// matched exactly; more than one match is an error.
    pub async fn get_zone(&self, selector: &ZoneSelector) -> CoreResult<Zone> {
        match selector {
            ZoneSelector::Id(id) => Ok(self.ctx.api.get_zone(id).await?),
            ZoneSelector::Name(name) => {
                let candidates = self.ctx.api.list_zones(Some(name)).await?;
                let filter = ZoneFilter {
                    name: Some(name.clone()),
                    ttl: None,
                };
                resolver::resolve(candidates, &filter, true, MultiplicityPolicy::Strict)?
                    .into_single(|| selector.to_string())
            }
        }
    }

    /// Zone id for `selector`. An id selector is returned as is.
    pub async fn resolve_zone_id(&self, selector: &ZoneSelector) -> CoreResult<String> {
        match selector {
            ZoneSelector::Id(id) => Ok(id.clone()),
            ZoneSelector::Name(_) => Ok(self.get_zone(selector).await?.id),
        }
    }

    /// 创建 Zone
    pub async fn create_zone(&self, request: CreateZoneRequest) -> CoreResult<Zone> {
        let body = api::CreateZoneRequest {
            name: request.name,
            ttl: request.ttl.unwrap_or(DEFAULT_TTL),
        };
        Ok(self.ctx.api.create_zone(&body).await?)
    }

    /// 更新 Zone
    ///
    /// The API replaces name and TTL together, so unset fields are filled
    /// from the current zone. A fully specified update by id skips that read.
    pub async fn update_zone(
        &self,
        selector: &ZoneSelector,
        request: UpdateZoneRequest,
    ) -> CoreResult<Zone> {
        if request.is_empty() {
            return Err(CoreError::InsufficientCriteria);
        }

        let (zone_id, body) = match (selector, request.name, request.ttl) {
            (ZoneSelector::Id(id), Some(name), Some(ttl)) => {
                (id.clone(), api::UpdateZoneRequest { name, ttl })
            }
            (_, name, ttl) => {
                let current = self.get_zone(selector).await?;
                let body = api::UpdateZoneRequest {
                    name: name.unwrap_or(current.name),
                    ttl: ttl.unwrap_or(current.ttl),
                };
                (current.id, body)
            }
        };

        log::debug!("Updating zone {zone_id}: name={}, ttl={}", body.name, body.ttl);
        Ok(self.ctx.api.update_zone(&zone_id, &body).await?)
    }

    /// 删除 Zone，返回被删除的 Zone id
    pub async fn delete_zone(&self, selector: &ZoneSelector) -> CoreResult<String> {
        let zone_id = self.resolve_zone_id(selector).await?;
        self.ctx.api.delete_zone(&zone_id).await?;
        Ok(zone_id)
    }
}
