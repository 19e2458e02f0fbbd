use std::time::Duration;

use serde::Deserialize;

use crate::github::client::DEFAULT_API_BASE;
use crate::types::{DEFAULT_PAGE_SIZE, Filters, KindFilter, RoleFilter, StatusFilter};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub github: GitHubSettings,
    pub defaults: Defaults,
}

// ---------------------------------------------------------------------------
// [github]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    /// REST root: `https://api.github.com`, or `https://<host>/api/v3` for
    /// GitHub Enterprise.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_owned(),
            request_timeout_secs: 30,
        }
    }
}

impl GitHubSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// ---------------------------------------------------------------------------
// [defaults]
// ---------------------------------------------------------------------------

/// Filter values used when the caller does not set them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub status: StatusFilter,
    pub role: RoleFilter,
    pub kind: KindFilter,
    pub page_size: u8,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            role: RoleFilter::All,
            kind: KindFilter::All,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Defaults {
    /// Page-one filters seeded from these defaults.
    pub fn filters(&self) -> Filters {
        Filters {
            status: self.status,
            role: self.role,
            kind: self.kind,
            page_size: self.page_size,
            ..Filters::default()
        }
    }
}
