//! Wire shapes returned by the REST endpoints.
//!
//! Every field is optional: GitHub omits or nulls fields depending on the
//! endpoint, token scopes and item age, and the normalizer supplies defaults
//! rather than rejecting the page.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Shared item fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUser {
    pub login: Option<String>,
    pub html_url: Option<String>,
}

/// GitHub returns label objects, but older payloads (and some proxies) send
/// bare names.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawLabel {
    Name(String),
    Object { name: Option<String> },
}

/// Fields common to list and search items.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItemFields {
    pub title: Option<String>,
    pub state: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub html_url: Option<String>,
    /// `https://api.github.com/repos/<owner>/<repo>`.
    pub repository_url: Option<String>,
    pub user: Option<RawUser>,
    pub assignee: Option<RawUser>,
    #[serde(default)]
    pub assignees: Option<Vec<RawUser>>,
    #[serde(default)]
    pub labels: Option<Vec<Option<RawLabel>>>,
    /// Present (non-null) only on pull requests.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Endpoint shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRepositoryOwner {
    pub login: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRepository {
    pub name: Option<String>,
    pub owner: Option<RawRepositoryOwner>,
}

/// An element of `GET /issues`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListItem {
    #[serde(flatten)]
    pub fields: RawItemFields,
    pub repository: Option<RawRepository>,
}

/// An element of `GET /search/issues` → `items`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchItem {
    #[serde(flatten)]
    pub fields: RawItemFields,
}

/// Body of `GET /search/issues`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchBody {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<RawSearchItem>,
}

/// Body of `GET /user`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawViewer {
    pub login: String,
}

/// An element of `GET /user/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepositorySummary {
    pub name: String,
}

/// One upstream page, resolved by endpoint at the adapter boundary.
#[derive(Debug, Clone)]
pub enum RawResponse {
    List {
        items: Vec<RawListItem>,
        link: Option<String>,
    },
    Search {
        items: Vec<RawSearchItem>,
        total_count: u64,
        incomplete_results: bool,
        link: Option<String>,
    },
}

impl RawResponse {
    /// The `Link` header that came with the page, if any.
    pub fn link(&self) -> Option<&str> {
        match self {
            Self::List { link, .. } | Self::Search { link, .. } => link.as_deref(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::List { items, .. } => items.len(),
            Self::Search { items, .. } => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
