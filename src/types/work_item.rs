use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::common::Actor;

// ---------------------------------------------------------------------------
// Work item enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemKind {
    Issue,
    PullRequest,
}

impl WorkItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::PullRequest => "pull_request",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Open,
    Closed,
    #[serde(other)]
    Unknown,
}

impl ItemStatus {
    /// Map an upstream `state` value; anything unrecognised becomes `Unknown`.
    pub fn from_upstream(state: Option<&str>) -> Self {
        match state {
            Some(s) if s.eq_ignore_ascii_case("open") => Self::Open,
            Some(s) if s.eq_ignore_ascii_case("closed") => Self::Closed,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Unknown => "unknown",
        }
    }
}

// ---------------------------------------------------------------------------
// Work item
// ---------------------------------------------------------------------------

/// Canonical issue / pull request, whichever endpoint it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub owner: String,
    pub repository: String,
    pub title: String,
    #[serde(default)]
    pub labels: IndexSet<String>,
    pub status: ItemStatus,
    /// RFC 3339, or empty when upstream omitted it.
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    pub kind: WorkItemKind,
    #[serde(default)]
    pub url: String,
    pub author: Actor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Actor>,
}

impl WorkItem {
    /// `"owner/repository"`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repository)
    }

    pub fn is_pull_request(&self) -> bool {
        self.kind == WorkItemKind::PullRequest
    }
}
