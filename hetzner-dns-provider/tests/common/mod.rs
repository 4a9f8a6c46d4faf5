//! 共享测试工具和辅助函数

#![allow(dead_code)]

use hetzner_dns_provider::HetznerDnsClient;
use serde_json::{Value, json};
use wiremock::MockServer;

/// Token every mock expects in the `Auth-API-Token` header.
pub const TEST_TOKEN: &str = "test-token-abcdef";

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Client pointed at the mock server.
pub fn client_for(server: &MockServer) -> HetznerDnsClient {
    match HetznerDnsClient::builder(TEST_TOKEN)
        .base_url(server.uri())
        .build()
    {
        Ok(client) => client,
        Err(e) => panic!("failed to build test client: {e}"),
    }
}

pub fn zone_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "ttl": 86400,
        "status": "verified",
        "records_count": 2,
        "ns": ["hydrogen.ns.hetzner.com", "oxygen.ns.hetzner.com"],
        "paused": false,
        "is_secondary_dns": false,
        "created": "2024-01-15 10:00:00.000 +0000 UTC",
        "modified": "2024-01-16 11:30:00.000 +0000 UTC"
    })
}

pub fn record_json(id: &str, zone_id: &str, name: &str, record_type: &str, value: &str) -> Value {
    json!({
        "id": id,
        "zone_id": zone_id,
        "name": name,
        "type": record_type,
        "value": value,
        "ttl": 300,
        "created": "2024-01-15 10:00:00.000 +0000 UTC",
        "modified": "2024-01-15 10:00:00.000 +0000 UTC"
    })
}

pub fn pagination(page: u32, last_page: u32, total_entries: u32) -> Value {
    json!({
        "pagination": {
            "page": page,
            "per_page": 100,
            "last_page": last_page,
            "total_entries": total_entries
        }
    })
}
