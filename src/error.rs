//! Errors surfaced by the worklist core.

use thiserror::Error;

use crate::types::RateLimitInfo;

/// Coarse classification of a [`WorklistError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UpstreamAuth,
    UpstreamRateLimit,
    UpstreamUnavailable,
    MalformedResponse,
    InvalidFilters,
    Configuration,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorklistError {
    /// GitHub rejected the credential (401/403).
    #[error("GitHub rejected the token: {message}")]
    UpstreamAuth { message: String },

    /// GitHub is throttling this credential. Never retried internally.
    #[error("GitHub API rate limit exceeded: {message}")]
    UpstreamRateLimit {
        message: String,
        rate_limit: Option<RateLimitInfo>,
    },

    /// Transport failure, timeout, or a non-2xx response other than the above.
    #[error("GitHub is unavailable: {message}")]
    UpstreamUnavailable { message: String },

    /// A 2xx response whose body did not have the expected shape.
    #[error("unexpected response from GitHub: {message}")]
    MalformedResponse { message: String },

    #[error("invalid filters: {message}")]
    InvalidFilters { message: String },

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl WorklistError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UpstreamAuth { .. } => ErrorKind::UpstreamAuth,
            Self::UpstreamRateLimit { .. } => ErrorKind::UpstreamRateLimit,
            Self::UpstreamUnavailable { .. } => ErrorKind::UpstreamUnavailable,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::InvalidFilters { .. } => ErrorKind::InvalidFilters,
            Self::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// Whether the caller may reasonably try again later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::UpstreamRateLimit | ErrorKind::UpstreamUnavailable
        )
    }
}
