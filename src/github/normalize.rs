//! Raw list/search items → [`WorkItem`].
//!
//! The two endpoints describe the same issue differently: list items carry a
//! nested `repository` object, search items only a `repository_url`. Missing
//! fields degrade to fixed defaults instead of failing the page.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexSet;
use url::Url;

use crate::github::query::QueryPlan;
use crate::github::raw::{RawItemFields, RawLabel, RawListItem, RawResponse, RawSearchItem, RawUser};
use crate::types::{Actor, Filters, ItemStatus, WorkItem, WorkItemKind};

const NO_TITLE: &str = "No title";
const UNKNOWN: &str = "unknown";

/// Normalize one upstream page and apply the kind post-filter.
///
/// The post-filter runs even when the query already asked for one kind: the
/// list endpoint cannot express it, and search results are not guaranteed to
/// honour it.
pub fn normalize(
    raw: &RawResponse,
    plan: &QueryPlan,
    viewer: Option<&str>,
    filters: &Filters,
) -> Vec<WorkItem> {
    let normalizer = Normalizer {
        pinned_repository: plan.pinned_repository(),
        viewer,
    };

    let items: Vec<WorkItem> = match raw {
        RawResponse::List { items, .. } => items.iter().map(|i| normalizer.list_item(i)).collect(),
        RawResponse::Search { items, .. } => {
            items.iter().map(|i| normalizer.search_item(i)).collect()
        }
    };

    items
        .into_iter()
        .filter(|item| filters.kind.accepts(item.kind))
        .collect()
}

struct Normalizer<'a> {
    pinned_repository: Option<&'a str>,
    viewer: Option<&'a str>,
}

impl Normalizer<'_> {
    fn list_item(&self, item: &RawListItem) -> WorkItem {
        let url_path = item
            .fields
            .repository_url
            .as_deref()
            .and_then(repository_path);
        let nested = item.repository.as_ref();

        let repository = nested
            .and_then(|r| r.name.clone())
            .or_else(|| url_path.as_ref().map(|(_, name)| name.clone()))
            .unwrap_or_else(|| UNKNOWN.to_owned());
        let owner = url_path
            .map(|(owner, _)| owner)
            .or_else(|| nested.and_then(|r| r.owner.as_ref()?.login.clone()))
            .unwrap_or_else(|| self.viewer_or_unknown());

        build(&item.fields, owner, repository)
    }

    fn search_item(&self, item: &RawSearchItem) -> WorkItem {
        let url_path = item
            .fields
            .repository_url
            .as_deref()
            .and_then(repository_path);

        let repository = match self.pinned_repository {
            Some(pinned) => pinned.to_owned(),
            None => url_path
                .as_ref()
                .map_or_else(|| UNKNOWN.to_owned(), |(_, name)| name.clone()),
        };
        let owner = url_path
            .map(|(owner, _)| owner)
            .unwrap_or_else(|| self.viewer_or_unknown());

        build(&item.fields, owner, repository)
    }

    fn viewer_or_unknown(&self) -> String {
        self.viewer.unwrap_or(UNKNOWN).to_owned()
    }
}

fn build(fields: &RawItemFields, owner: String, repository: String) -> WorkItem {
    let kind = if fields.pull_request.is_some() {
        WorkItemKind::PullRequest
    } else {
        WorkItemKind::Issue
    };

    let assignee = fields
        .assignees
        .as_ref()
        .and_then(|all| all.first())
        .or(fields.assignee.as_ref())
        .map(actor);

    WorkItem {
        owner,
        repository,
        title: fields.title.clone().unwrap_or_else(|| NO_TITLE.to_owned()),
        labels: labels(fields.labels.as_deref()),
        status: ItemStatus::from_upstream(fields.state.as_deref()),
        created_at: timestamp(fields.created_at.as_deref()),
        updated_at: timestamp(fields.updated_at.as_deref()),
        kind,
        url: fields.html_url.clone().unwrap_or_default(),
        author: fields
            .user
            .as_ref()
            .map_or_else(|| Actor::new(UNKNOWN, ""), actor),
        assignee,
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn actor(user: &RawUser) -> Actor {
    Actor::new(
        user.login.as_deref().unwrap_or(UNKNOWN),
        user.html_url.as_deref().unwrap_or_default(),
    )
}

fn labels(raw: Option<&[Option<RawLabel>]>) -> IndexSet<String> {
    raw.unwrap_or_default()
        .iter()
        .flatten()
        .map(|label| match label {
            RawLabel::Name(name) => name.clone(),
            RawLabel::Object { name } => name.clone().unwrap_or_else(|| UNKNOWN.to_owned()),
        })
        .collect()
}

/// Canonical UTC RFC 3339; unparseable values are passed through untouched.
fn timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    DateTime::parse_from_rfc3339(raw).map_or_else(
        |_| raw.to_owned(),
        |dt| dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::AutoSi, true),
    )
}

/// `(owner, name)` from the last two path segments of a repository URL.
fn repository_path(url: &str) -> Option<(String, String)> {
    let parsed = Url::parse(url).ok()?;
    let segments: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [.., owner, name] => Some(((*owner).to_owned(), (*name).to_owned())),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
