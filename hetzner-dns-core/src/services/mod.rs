//! 业务逻辑服务层

mod record_service;
mod zone_service;

pub use record_service::RecordService;
pub use zone_service::ZoneService;

use std::sync::Arc;

use hetzner_dns_provider::DnsApi;

/// 服务上下文 - 持有所有依赖
///
/// The front end builds the API client and injects it here; services never
/// construct their own.
pub struct ServiceContext {
    /// Hetzner DNS API 客户端
    pub api: Arc<dyn DnsApi>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(api: Arc<dyn DnsApi>) -> Self {
        Self { api }
    }
}
