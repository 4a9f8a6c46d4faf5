//! Hetzner HTTP 请求方法

use std::fmt::Write;

use reqwest::{Method, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::http_client::{self, RetryPolicy};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::types::{DEFAULT_PAGE_SIZE, Pagination};

use super::types::ErrorResponse;
use super::{AUTH_HEADER, HetznerDnsClient};

/// Upper bound on pages walked by one list call.
const MAX_PAGES: u32 = 1000;

impl HetznerDnsClient {
    // ==================== 辅助方法 ====================

    fn url(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}{path}", self.config.base_url);
        for (i, (key, value)) in query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            let _ = write!(url, "{sep}{key}={}", urlencoding::encode(value));
        }
        url
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(AUTH_HEADER, &self.config.api_token)
    }

    /// 统一处理响应错误
    ///
    /// Non-2xx statuses are always errors. A 2xx body carrying an `error`
    /// object or a top-level `message` is treated as an error too, mapped by
    /// the body's error code when it has one.
    fn handle_response_error(
        &self,
        status: u16,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<()> {
        let body = serde_json::from_str::<ErrorResponse>(response_text).ok();
        let body_status = body.as_ref().and_then(ErrorResponse::status_code);
        let message = body.and_then(ErrorResponse::into_message);

        if (200..300).contains(&status) {
            return match message {
                Some(msg) => {
                    let status = body_status.unwrap_or(status);
                    log::warn!("API reported an error ({status}) in a success response: {msg}");
                    Err(self.map_error(RawApiError::new(status, msg), ctx))
                }
                None => Ok(()),
            };
        }

        let raw = RawApiError::new(
            status,
            message.unwrap_or_else(|| response_text.trim().to_string()),
        );
        let err = self.map_error(raw, ctx);
        if err.is_expected() {
            log::warn!("API error: {err}");
        } else {
            log::error!("API error: {err}");
        }
        Err(err)
    }

    async fn send(
        &self,
        request: RequestBuilder,
        method: &str,
        url: &str,
        ctx: ErrorContext,
    ) -> Result<String> {
        let label = format!("{method} {url}");
        let response =
            http_client::send(request, &label, RetryPolicy::new(self.config.max_retries)).await?;
        self.handle_response_error(response.status, &response.body, ctx)?;
        Ok(response.body)
    }

    /// 执行带 body 的请求（POST/PUT）
    async fn request_with_body<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
        B: Serialize,
    {
        let payload =
            serde_json::to_string(body).map_err(|e| ProviderError::SerializationError {
                detail: e.to_string(),
            })?;
        log::debug!("Request Body: {payload}");

        let url = self.url(path, &[]);
        let request = self
            .authorized(self.client.request(method.clone(), &url))
            .header("Content-Type", "application/json; charset=utf-8")
            .body(payload);

        let response_text = self.send(request, method.as_str(), &url, ctx).await?;
        http_client::decode(&response_text)
    }

    // ==================== 请求方法 ====================

    /// 执行 GET 请求
    pub(crate) async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, String)],
        ctx: ErrorContext,
    ) -> Result<T> {
        let url = self.url(path, query);
        let request = self.authorized(self.client.get(&url));
        let response_text = self.send(request, "GET", &url, ctx).await?;
        http_client::decode(&response_text)
    }

    /// 执行 GET 请求并遍历所有分页
    ///
    /// `split` separates one page's body into its items and pagination
    /// metadata. A page without metadata ends the walk.
    pub(crate) async fn get_all_pages<R, T, F>(
        &self,
        path: &str,
        query: &[(&str, String)],
        ctx: ErrorContext,
        split: F,
    ) -> Result<Vec<T>>
    where
        R: for<'de> Deserialize<'de>,
        F: Fn(R) -> (Vec<T>, Option<Pagination>),
    {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let mut page_query = query.to_vec();
            page_query.push(("page", page.to_string()));
            page_query.push(("per_page", DEFAULT_PAGE_SIZE.to_string()));

            let body: R = self.get(path, &page_query, ctx.clone()).await?;
            let (mut batch, pagination) = split(body);
            let fetched = batch.len();
            items.append(&mut batch);

            match pagination {
                Some(p) if p.has_more() && fetched > 0 && page < MAX_PAGES => page += 1,
                _ => break,
            }
        }

        log::debug!("GET {path}: {} item(s) across {page} page(s)", items.len());
        Ok(items)
    }

    /// 执行 POST 请求
    pub(crate) async fn post<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        self.request_with_body(Method::POST, path, body, ctx).await
    }

    /// 执行 PUT 请求
    pub(crate) async fn put<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        self.request_with_body(Method::PUT, path, body, ctx).await
    }

    /// 执行 DELETE 请求（响应体为空或忽略）
    pub(crate) async fn delete(&self, path: &str, ctx: ErrorContext) -> Result<()> {
        let url = self.url(path, &[]);
        let request = self.authorized(self.client.delete(&url));
        self.send(request, "DELETE", &url, ctx).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HetznerDnsClient {
        HetznerDnsClient::builder("test-token-0000")
            .base_url("http://localhost:1234/api/v1")
            .build()
            .unwrap()
    }

    #[test]
    fn url_encodes_query() {
        let url = client().url(
            "/zones",
            &[("name", "ex ample.com".to_string()), ("page", "2".to_string())],
        );
        assert_eq!(
            url,
            "http://localhost:1234/api/v1/zones?name=ex%20ample.com&page=2"
        );
    }

    #[test]
    fn success_with_error_body_maps_by_error_code() {
        let result = client().handle_response_error(
            200,
            r#"{"error":{"message":"zone not found","code":404}}"#,
            ErrorContext::zone("z1"),
        );
        assert!(
            matches!(&result, Err(ProviderError::ZoneNotFound { zone, .. }) if zone == "z1"),
            "unexpected result: {result:?}"
        );

        let result = client().handle_response_error(
            200,
            r#"{"error":{"message":"record not found","code":404}}"#,
            ErrorContext::record("r1"),
        );
        assert!(
            matches!(&result, Err(ProviderError::RecordNotFound { record_id, .. }) if record_id == "r1"),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn success_with_uncoded_error_body_keeps_status() {
        let result = client().handle_response_error(
            200,
            r#"{"message":"something went wrong"}"#,
            ErrorContext::default(),
        );
        assert!(
            matches!(&result, Err(ProviderError::Unknown { status: Some(200), .. })),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn success_with_payload_passes() {
        let result = client().handle_response_error(
            200,
            r#"{"zone":{"id":"z1","name":"example.com","ttl":86400}}"#,
            ErrorContext::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn non_json_error_body_is_kept() {
        let result = client().handle_response_error(500, "upstream exploded", ErrorContext::default());
        assert!(
            matches!(&result, Err(ProviderError::Unknown { raw_message, .. }) if raw_message == "upstream exploded"),
            "unexpected result: {result:?}"
        );
    }
}
