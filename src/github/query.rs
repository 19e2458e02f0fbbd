//! Filter → upstream request translation.
//!
//! Two endpoints can answer "my issues and pull requests":
//! - `GET /issues` (list for the authenticated user) understands a role
//!   (`filter`) and a `state`, nothing else.
//! - `GET /search/issues` understands anything expressible as qualifiers, but
//!   needs an explicit scope (`user:` or `repo:`), hence the viewer login.

use crate::types::{Filters, KindFilter, RoleFilter, StatusFilter};

/// Which endpoint a set of filters needs, decided before any I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanKind {
    List,
    Search,
}

/// Free text or a specific repository can only be expressed through search.
pub fn plan_kind(filters: &Filters) -> PlanKind {
    if filters.search_term().is_some() || filters.repository.selected().is_some() {
        PlanKind::Search
    } else {
        PlanKind::List
    }
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// Parameters for `GET /issues`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPlan {
    /// Relationship filter: `created`, `assigned` or `all`.
    pub filter: &'static str,
    /// `open`, `closed` or `all`.
    pub state: &'static str,
}

impl ListPlan {
    pub fn new(filters: &Filters) -> Self {
        let filter = match filters.role {
            RoleFilter::Created => "created",
            RoleFilter::Assigned => "assigned",
            RoleFilter::All => "all",
        };
        let state = match filters.status {
            StatusFilter::Open => "open",
            StatusFilter::Closed => "closed",
            StatusFilter::All => "all",
        };
        Self { filter, state }
    }
}

/// A fully qualified `q` for `GET /search/issues`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPlan {
    pub query: String,
    /// Repository name the query was scoped to, if any.
    pub pinned_repository: Option<String>,
}

impl SearchPlan {
    /// Qualifier order: term, role, type, state, scope.
    pub fn new(filters: &Filters, viewer: &str) -> Self {
        let mut parts: Vec<String> = Vec::with_capacity(5);

        if let Some(term) = filters.search_term() {
            parts.push(term.to_owned());
        }
        match filters.role {
            RoleFilter::Created => parts.push("author:@me".to_owned()),
            RoleFilter::Assigned => parts.push("assignee:@me".to_owned()),
            RoleFilter::All => {}
        }
        match filters.kind {
            KindFilter::PullRequest => parts.push("is:pr".to_owned()),
            KindFilter::Issue => parts.push("is:issue".to_owned()),
            KindFilter::All => {}
        }
        match filters.status {
            StatusFilter::Open => parts.push("is:open".to_owned()),
            StatusFilter::Closed => parts.push("is:closed".to_owned()),
            StatusFilter::All => {}
        }

        let pinned_repository = match filters.repository.selected() {
            Some(selected) => {
                // An explicit owner wins over the viewer.
                let owner = filters.repository.owner().unwrap_or(viewer);
                let name = filters.repository.name().unwrap_or(selected);
                parts.push(format!("repo:{owner}/{name}"));
                Some(name.to_owned())
            }
            None => {
                parts.push(format!("user:{viewer}"));
                None
            }
        };

        Self {
            query: parts.join(" "),
            pinned_repository,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    List(ListPlan),
    Search(SearchPlan),
}

impl QueryPlan {
    pub fn list(filters: &Filters) -> Self {
        Self::List(ListPlan::new(filters))
    }

    pub fn search(filters: &Filters, viewer: &str) -> Self {
        Self::Search(SearchPlan::new(filters, viewer))
    }

    pub fn kind(&self) -> PlanKind {
        match self {
            Self::List(_) => PlanKind::List,
            Self::Search(_) => PlanKind::Search,
        }
    }

    pub fn pinned_repository(&self) -> Option<&str> {
        match self {
            Self::List(_) => None,
            Self::Search(plan) => plan.pinned_repository.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
