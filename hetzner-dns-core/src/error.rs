//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use hetzner_dns_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Filters were given but no zone and no all-zones override
    #[error("A zone is required: pass a zone id or zone name, or search all zones")]
    ScopeRequired,

    /// Nothing at all to search by
    #[error("Not enough criteria: pass a record id, a zone, or at least one filter")]
    InsufficientCriteria,

    /// Strict resolution matched more than one entity
    #[error("Lookup is ambiguous: {0} entities matched")]
    AmbiguousResult(usize),

    /// Lookup matched nothing where one result is required
    #[error("Not found: {0}")]
    NotFound(String),

    /// First-only and allow-multiple were both requested
    #[error("First-only and allow-multiple cannot be combined")]
    InvalidPolicyCombination,

    /// Zone id and zone name point at different zones
    #[error("Zone '{zone_name}' resolves to '{resolved_id}', not '{zone_id}'")]
    ZoneMismatch {
        zone_id: String,
        zone_name: String,
        resolved_id: String,
    },

    /// The API rejected the request
    #[error("{0}")]
    Upstream(ProviderError),

    /// The API could not be reached
    #[error("{0}")]
    Transport(ProviderError),
}

impl From<ProviderError> for CoreError {
    fn from(e: ProviderError) -> Self {
        if e.is_transport() {
            Self::Transport(e)
        } else {
            Self::Upstream(e)
        }
    }
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ScopeRequired
            | Self::InsufficientCriteria
            | Self::AmbiguousResult(_)
            | Self::NotFound(_)
            | Self::InvalidPolicyCombination
            | Self::ZoneMismatch { .. } => true,
            Self::Upstream(e) => e.is_expected(),
            Self::Transport(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
