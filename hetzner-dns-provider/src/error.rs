use serde::{Deserialize, Serialize};

/// Unified error type for all Hetzner DNS API operations.
///
/// Every variant carries enough context to be reported on its own. All
/// variants are serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): API rate limit exceeded
/// - [`ServiceUnavailable`](Self::ServiceUnavailable): HTTP 502/503/504 from a gateway
///
/// The HTTP client retries these only when the client was built with
/// `max_retries > 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The API token is missing, invalid or expired (HTTP 401).
    InvalidCredentials {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The token lacks permission for the requested operation (HTTP 403).
    PermissionDenied {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The specified zone was not found.
    ZoneNotFound {
        /// Zone id or name that was not found.
        zone: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The specified record was not found.
    RecordNotFound {
        /// ID of the record that was not found.
        record_id: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A zone with the same name already exists (HTTP 409).
    ZoneExists {
        /// Name of the conflicting zone.
        zone: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter was rejected (HTTP 400/406/422), e.g. a malformed value.
    InvalidParameter {
        /// Name of the invalid parameter, if the API said which one.
        param: Option<String>,
        /// Description of what's wrong.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A gateway in front of the API answered 502, 503 or 504.
    ServiceUnavailable {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        raw_message: Option<String>,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the API.
    Unknown {
        /// HTTP status code, if the request got that far.
        status: Option<u16>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::ZoneNotFound { .. }
                | Self::RecordNotFound { .. }
                | Self::ZoneExists { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Whether repeating the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. }
                | Self::Timeout { .. }
                | Self::RateLimited { .. }
                | Self::ServiceUnavailable { .. }
        )
    }

    /// Whether the failure happened below the HTTP layer (connect, read, timeout).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::Timeout { .. })
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::InvalidCredentials { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Invalid credentials: {msg}")
                } else {
                    write!(f, "Invalid credentials")
                }
            }
            Self::PermissionDenied { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Permission denied: {msg}")
                } else {
                    write!(f, "Permission denied")
                }
            }
            Self::ZoneNotFound { zone, raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Zone '{zone}' not found: {msg}")
                } else {
                    write!(f, "Zone '{zone}' not found")
                }
            }
            Self::RecordNotFound { record_id, .. } => {
                write!(f, "Record '{record_id}' not found")
            }
            Self::ZoneExists { zone, .. } => write!(f, "Zone '{zone}' already exists"),
            Self::InvalidParameter { param, detail } => match param {
                Some(param) => write!(f, "Invalid parameter '{param}': {detail}"),
                None => write!(f, "Invalid parameter: {detail}"),
            },
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "Rate limited")
                }
            }
            Self::ServiceUnavailable { status, .. } => {
                write!(f, "Service unavailable (HTTP {status})")
            }
            Self::ParseError { detail } => write!(f, "Parse error: {detail}"),
            Self::SerializationError { detail } => write!(f, "Serialization error: {detail}"),
            Self::Unknown {
                status,
                raw_message,
            } => match status {
                Some(status) => write!(f, "HTTP {status}: {raw_message}"),
                None => write!(f, "{raw_message}"),
            },
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
