use crate::error::WorklistError;
use crate::github::auth::AccessToken;
use crate::github::client::GitHubClient;
use crate::github::query::{PlanKind, QueryPlan, plan_kind};
use crate::github::{link, normalize};
use crate::types::{Filters, IssuePage};

use super::interface::Engine;

/// The real GitHub backend engine.
pub struct GitHubEngine {
    client: GitHubClient,
}

impl GitHubEngine {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    pub fn connect(token: &AccessToken, api_base: &str) -> Result<Self, WorklistError> {
        GitHubClient::new(token, api_base).map(Self::new)
    }
}

impl Engine for GitHubEngine {
    async fn fetch_issues(&self, filters: &Filters) -> Result<IssuePage, WorklistError> {
        // A search has to be scoped to the viewer, so their login is looked
        // up first. The list endpoint is implicitly scoped and skips it.
        let (plan, viewer) = match plan_kind(filters) {
            PlanKind::List => (QueryPlan::list(filters), None),
            PlanKind::Search => {
                let viewer = self.client.viewer_login().await?;
                (QueryPlan::search(filters, &viewer), Some(viewer))
            }
        };
        tracing::debug!("engine: {plan:?} page={} per_page={}", filters.page, filters.page_size);

        let raw = self
            .client
            .execute(&plan, filters.page, filters.page_size)
            .await?;

        let items = normalize::normalize(&raw, &plan, viewer.as_deref(), filters);
        let cursor = link::decode(raw.link());
        tracing::debug!(
            "engine: normalized {} of {} items, next={:?} prev={:?}",
            items.len(),
            raw.len(),
            cursor.next_page_number(),
            cursor.prev_page_number()
        );

        Ok(IssuePage { items, cursor })
    }

    async fn fetch_repositories(&self) -> Result<Vec<String>, WorklistError> {
        let repositories = self.client.list_repositories().await?;
        tracing::debug!("engine: fetched {} repositories", repositories.len());
        Ok(repositories)
    }
}
