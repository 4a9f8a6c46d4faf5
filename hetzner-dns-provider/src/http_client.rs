//! Request execution with opt-in retries
//!
//! [`send`] performs one logical request: it classifies transport failures,
//! HTTP 429 and gateway statuses (502-504) as [`ProviderError`]s and hands
//! every other status back with its body. Mapping API rejections to typed
//! errors is the client's job, not this module's.

use std::time::Duration;

use reqwest::RequestBuilder;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// Status and body of a response that got past transport classification.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// When and how long to wait before repeating a failed request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    pub max_retries: u32,
}

impl RetryPolicy {
    const BASE_DELAY_MS: u64 = 100;
    const MAX_BACKOFF_MS: u64 = 10_000;
    const MAX_RETRY_AFTER_SECS: u64 = 30;

    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// `attempt` is zero-based: the first request is attempt 0.
    pub fn should_retry(self, attempt: u32, error: &ProviderError) -> bool {
        attempt < self.max_retries && error.is_retryable()
    }

    /// A server-sent `Retry-After` wins over the exponential schedule.
    pub fn delay(self, attempt: u32, error: &ProviderError) -> Duration {
        match error {
            ProviderError::RateLimited {
                retry_after: Some(secs),
                ..
            } => Duration::from_secs((*secs).min(Self::MAX_RETRY_AFTER_SECS)),
            _ => Self::backoff(attempt),
        }
    }

    /// 100ms doubling per attempt, capped at 10s.
    fn backoff(attempt: u32) -> Duration {
        let factor = 1_u64 << attempt.min(20);
        Duration::from_millis(
            Self::BASE_DELAY_MS
                .saturating_mul(factor)
                .min(Self::MAX_BACKOFF_MS),
        )
    }
}

/// Sends `request`, repeating it on transient failures as `policy` allows.
pub(crate) async fn send(
    request: RequestBuilder,
    label: &str,
    policy: RetryPolicy,
) -> Result<RawResponse> {
    let mut attempt = 0;
    loop {
        // Streaming bodies cannot be replayed
        let Some(this_try) = request.try_clone() else {
            return send_once(request, label).await;
        };

        match send_once(this_try, label).await {
            Err(e) if policy.should_retry(attempt, &e) => {
                let delay = policy.delay(attempt, &e);
                log::warn!(
                    "{label} failed (attempt {}/{}), retrying in {:.1}s: {e}",
                    attempt + 1,
                    policy.max_retries + 1,
                    delay.as_secs_f32(),
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}

async fn send_once(request: RequestBuilder, label: &str) -> Result<RawResponse> {
    log::debug!("{label}");

    let response = request.send().await.map_err(transport_error)?;
    let status = response.status().as_u16();
    let retry_after = retry_after_secs(response.headers());
    let body = response.text().await.map_err(transport_error)?;
    log::debug!("{label} -> HTTP {status}: {}", truncate_for_log(&body));

    let raw_message = || Some(body.clone()).filter(|b| !b.trim().is_empty());
    match status {
        429 => {
            log::warn!("Rate limited, retry_after={retry_after:?}");
            Err(ProviderError::RateLimited {
                retry_after,
                raw_message: raw_message(),
            })
        }
        502..=504 => {
            log::warn!("Gateway unavailable (HTTP {status})");
            Err(ProviderError::ServiceUnavailable {
                status,
                raw_message: raw_message(),
            })
        }
        _ => Ok(RawResponse { status, body }),
    }
}

fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout {
            detail: e.to_string(),
        }
    } else {
        ProviderError::NetworkError {
            detail: e.to_string(),
        }
    }
}

fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Decodes a response body, logging the raw text when it does not fit `T`.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        log::error!("Unexpected response body ({e}): {}", truncate_for_log(body));
        ProviderError::ParseError {
            detail: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(status: u16) -> ProviderError {
        ProviderError::ServiceUnavailable {
            status,
            raw_message: None,
        }
    }

    #[test]
    fn retries_only_transient_failures() {
        let policy = RetryPolicy::new(2);
        assert!(policy.should_retry(0, &gateway(503)));
        assert!(policy.should_retry(
            1,
            &ProviderError::Timeout {
                detail: "slow".into()
            }
        ));
        assert!(!policy.should_retry(
            0,
            &ProviderError::RecordNotFound {
                record_id: "r1".into(),
                raw_message: None,
            }
        ));
    }

    #[test]
    fn stops_after_max_retries() {
        let policy = RetryPolicy::new(2);
        assert!(!policy.should_retry(2, &gateway(502)));
        assert!(!RetryPolicy::default().should_retry(0, &gateway(502)));
    }

    #[test]
    fn backoff_doubles_up_to_cap() {
        let policy = RetryPolicy::new(10);
        let delays: Vec<_> = [0, 1, 3, 7]
            .iter()
            .map(|&a| policy.delay(a, &gateway(503)).as_millis())
            .collect();
        assert_eq!(delays, vec![100, 200, 800, 10_000]);
    }

    #[test]
    fn retry_after_overrides_backoff_within_limit() {
        let policy = RetryPolicy::new(1);
        let limited = |secs| ProviderError::RateLimited {
            retry_after: Some(secs),
            raw_message: None,
        };
        assert_eq!(policy.delay(0, &limited(3)), Duration::from_secs(3));
        assert_eq!(policy.delay(0, &limited(120)), Duration::from_secs(30));
    }

    #[test]
    fn decode_reports_parse_error() {
        let result: Result<Vec<u32>> = decode("not json");
        assert!(
            matches!(&result, Err(ProviderError::ParseError { .. })),
            "unexpected decode result: {result:?}"
        );
    }
}
