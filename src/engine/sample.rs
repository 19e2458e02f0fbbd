use indexmap::IndexSet;

use crate::error::WorklistError;
use crate::types::{
    Actor, Filters, IssuePage, ItemStatus, PageCursor, RoleFilter, StatusFilter, WorkItem,
    WorkItemKind,
};

use super::interface::Engine;

/// Login the sample data is seen from.
pub const SAMPLE_VIEWER: &str = "octocat";

/// A sample engine that serves a fixed dataset without any network calls.
///
/// Backs demo mode and lets tests exercise filtering without a token.
#[derive(Debug, Clone)]
pub struct SampleEngine {
    viewer: String,
    items: Vec<WorkItem>,
    repositories: Vec<String>,
}

impl Default for SampleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleEngine {
    /// The built-in demo dataset.
    pub fn new() -> Self {
        Self {
            viewer: SAMPLE_VIEWER.to_owned(),
            items: sample_items(),
            repositories: ["widgets", "dotfiles", "api-server"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }

    /// A custom dataset, filtered as if `viewer` were signed in.
    pub fn with_items(
        viewer: impl Into<String>,
        items: Vec<WorkItem>,
        repositories: Vec<String>,
    ) -> Self {
        Self {
            viewer: viewer.into(),
            items,
            repositories,
        }
    }

    pub fn viewer(&self) -> &str {
        &self.viewer
    }

    fn matches(&self, item: &WorkItem, filters: &Filters) -> bool {
        let status_ok = match filters.status {
            StatusFilter::All => true,
            StatusFilter::Open => item.status == ItemStatus::Open,
            StatusFilter::Closed => item.status == ItemStatus::Closed,
        };
        let role_ok = match filters.role {
            RoleFilter::All => true,
            RoleFilter::Created => item.author.login == self.viewer,
            RoleFilter::Assigned => item
                .assignee
                .as_ref()
                .is_some_and(|a| a.login == self.viewer),
        };
        let repository_ok = filters
            .repository
            .name()
            .is_none_or(|name| item.repository == name)
            && filters
                .repository
                .owner()
                .is_none_or(|owner| item.owner == owner);
        let search_ok = filters.search_term().is_none_or(|term| {
            item.title
                .to_lowercase()
                .contains(&term.to_lowercase())
        });

        status_ok && role_ok && repository_ok && filters.kind.accepts(item.kind) && search_ok
    }
}

impl Engine for SampleEngine {
    async fn fetch_issues(&self, filters: &Filters) -> Result<IssuePage, WorklistError> {
        let page = usize::try_from(filters.page.max(1)).unwrap_or(usize::MAX);
        let page_size = usize::from(filters.page_size);
        let skip = (page - 1).saturating_mul(page_size);

        let items: Vec<WorkItem> = self
            .items
            .iter()
            .filter(|item| self.matches(item, filters))
            .skip(skip)
            .take(page_size)
            .cloned()
            .collect();
        tracing::debug!("sample engine: serving {} items for page {page}", items.len());

        Ok(IssuePage {
            items,
            cursor: PageCursor::empty(),
        })
    }

    async fn fetch_repositories(&self) -> Result<Vec<String>, WorklistError> {
        Ok(self.repositories.clone())
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

fn user(login: &str) -> Actor {
    Actor::new(login, format!("https://github.com/{login}"))
}

#[allow(clippy::too_many_arguments)]
fn item(
    owner: &str,
    repository: &str,
    number: u32,
    kind: WorkItemKind,
    title: &str,
    status: ItemStatus,
    author: &str,
    assignee: Option<&str>,
    labels: &[&str],
    created_at: &str,
    updated_at: &str,
) -> WorkItem {
    let path = match kind {
        WorkItemKind::Issue => "issues",
        WorkItemKind::PullRequest => "pull",
    };
    WorkItem {
        owner: owner.to_owned(),
        repository: repository.to_owned(),
        title: title.to_owned(),
        labels: labels.iter().map(|l| (*l).to_owned()).collect::<IndexSet<_>>(),
        status,
        created_at: created_at.to_owned(),
        updated_at: updated_at.to_owned(),
        kind,
        url: format!("https://github.com/{owner}/{repository}/{path}/{number}"),
        author: user(author),
        assignee: assignee.map(user),
    }
}

/// The four demo items, newest first.
pub fn sample_items() -> Vec<WorkItem> {
    vec![
        item(
            "acme",
            "widgets",
            42,
            WorkItemKind::Issue,
            "Widget picker crashes on empty selection",
            ItemStatus::Open,
            "octocat",
            Some("octocat"),
            &["bug", "ui"],
            "2024-05-02T09:15:00Z",
            "2024-05-06T14:30:00Z",
        ),
        item(
            "acme",
            "widgets",
            57,
            WorkItemKind::PullRequest,
            "Add keyboard navigation to the widget grid",
            ItemStatus::Open,
            "octocat",
            None,
            &["enhancement"],
            "2024-05-04T11:00:00Z",
            "2024-05-05T16:45:00Z",
        ),
        item(
            "octocat",
            "dotfiles",
            7,
            WorkItemKind::Issue,
            "Document the bootstrap script",
            ItemStatus::Closed,
            "hubot",
            Some("octocat"),
            &["documentation"],
            "2024-04-18T08:20:00Z",
            "2024-04-22T10:05:00Z",
        ),
        item(
            "octo-org",
            "api-server",
            311,
            WorkItemKind::PullRequest,
            "Bump serde from 1.0.197 to 1.0.200",
            ItemStatus::Open,
            "monalisa",
            None,
            &["dependencies"],
            "2024-04-30T06:00:00Z",
            "2024-04-30T06:00:00Z",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{KindFilter, RepositoryFilter};

    fn titles(page: &IssuePage) -> Vec<&str> {
        page.items.iter().map(|i| i.title.as_str()).collect()
    }

    #[tokio::test]
    async fn created_role_keeps_viewer_authored_items() {
        let engine = SampleEngine::new();
        let filters = Filters {
            role: RoleFilter::Created,
            ..Filters::default()
        };
        let page = engine.fetch_issues(&filters).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.items.iter().all(|i| i.author.login == "octocat"));
    }

    #[tokio::test]
    async fn assigned_role_checks_assignee() {
        let engine = SampleEngine::new();
        let filters = Filters {
            role: RoleFilter::Assigned,
            ..Filters::default()
        };
        let page = engine.fetch_issues(&filters).await.unwrap();
        assert_eq!(
            titles(&page),
            ["Widget picker crashes on empty selection", "Document the bootstrap script"]
        );
    }

    #[tokio::test]
    async fn repository_matches_bare_or_qualified_name() {
        let engine = SampleEngine::new();
        for repo in ["widgets", "acme/widgets"] {
            let filters = Filters {
                repository: RepositoryFilter::parse(repo),
                ..Filters::default()
            };
            let page = engine.fetch_issues(&filters).await.unwrap();
            assert_eq!(page.items.len(), 2, "repo filter {repo}");
        }

        let filters = Filters {
            repository: RepositoryFilter::parse("someone-else/widgets"),
            ..Filters::default()
        };
        assert!(engine.fetch_issues(&filters).await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn search_is_case_insensitive_on_title() {
        let engine = SampleEngine::new();
        let filters = Filters {
            search: Some("  WIDGET ".to_owned()),
            kind: KindFilter::PullRequest,
            ..Filters::default()
        };
        let page = engine.fetch_issues(&filters).await.unwrap();
        assert_eq!(titles(&page), ["Add keyboard navigation to the widget grid"]);
    }

    #[tokio::test]
    async fn pages_are_sliced_and_cursor_stays_empty() {
        let engine = SampleEngine::new();
        let filters = Filters {
            page: 2,
            page_size: 3,
            ..Filters::default()
        };
        let page = engine.fetch_issues(&filters).await.unwrap();
        assert_eq!(titles(&page), ["Bump serde from 1.0.197 to 1.0.200"]);
        assert_eq!(page.cursor, PageCursor::empty());

        let beyond = Filters {
            page: 5,
            ..filters
        };
        assert!(engine.fetch_issues(&beyond).await.unwrap().items.is_empty());
    }
}
