use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Common supporting types
// ---------------------------------------------------------------------------

/// A GitHub account: login plus profile URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub login: String,
    #[serde(default)]
    pub url: String,
}

impl Actor {
    pub fn new(login: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            url: url.into(),
        }
    }
}

/// Rate limit state reported by the `x-ratelimit-*` response headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: Option<DateTime<Utc>>,
}

impl RateLimitInfo {
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}
