use std::future::Future;
use std::time::Duration;

use crate::config::types::GitHubSettings;
use crate::engine::{Engine, GitHubEngine, SampleEngine};
use crate::error::WorklistError;
use crate::github::auth::Credential;
use crate::types::{Filters, IssuePage};

/// Entry point for callers: picks the sample or live engine per request.
///
/// Holds only settings. Every call builds what it needs and drops it again,
/// so a `Worklist` can be shared freely between tasks.
#[derive(Debug, Clone)]
pub struct Worklist {
    api_base: String,
    timeout: Duration,
}

impl Worklist {
    pub fn new(settings: &GitHubSettings) -> Self {
        Self {
            api_base: settings.api_base_url.clone(),
            timeout: settings.request_timeout(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// One page of issues and pull requests for `credential`.
    pub async fn fetch_issues(
        &self,
        credential: &Credential,
        filters: &Filters,
    ) -> Result<IssuePage, WorklistError> {
        self.fetch_issues_with_deadline(credential, filters, self.timeout)
            .await
    }

    /// Like [`fetch_issues`](Self::fetch_issues) with a caller-chosen deadline
    /// for the live path.
    pub async fn fetch_issues_with_deadline(
        &self,
        credential: &Credential,
        filters: &Filters,
        deadline: Duration,
    ) -> Result<IssuePage, WorklistError> {
        filters.validate()?;

        match credential {
            Credential::Demo => {
                tracing::debug!("worklist: demo mode, serving sample issues");
                SampleEngine::new().fetch_issues(filters).await
            }
            Credential::Token(token) => {
                let engine = GitHubEngine::connect(token, &self.api_base)?;
                with_deadline(deadline, engine.fetch_issues(filters)).await
            }
        }
    }

    /// Repository names for populating a repository picker.
    pub async fn fetch_repositories(
        &self,
        credential: &Credential,
    ) -> Result<Vec<String>, WorklistError> {
        match credential {
            Credential::Demo => {
                tracing::debug!("worklist: demo mode, serving sample repositories");
                SampleEngine::new().fetch_repositories().await
            }
            Credential::Token(token) => {
                let engine = GitHubEngine::connect(token, &self.api_base)?;
                with_deadline(self.timeout, engine.fetch_repositories()).await
            }
        }
    }
}

async fn with_deadline<T>(
    deadline: Duration,
    work: impl Future<Output = Result<T, WorklistError>>,
) -> Result<T, WorklistError> {
    tokio::time::timeout(deadline, work).await.map_err(|_| {
        tracing::warn!("worklist: GitHub did not answer within {deadline:?}");
        WorklistError::UpstreamUnavailable {
            message: format!("no response within {}s", deadline.as_secs_f64()),
        }
    })?
}
