use std::future::Future;

use crate::error::WorklistError;
use crate::types::{Filters, IssuePage};

/// Trait implemented by both `GitHubEngine` and `SampleEngine`.
///
/// An engine answers one request at a time and keeps no state between calls.
pub trait Engine {
    /// One page of work items matching `filters`.
    fn fetch_issues(
        &self,
        filters: &Filters,
    ) -> impl Future<Output = Result<IssuePage, WorklistError>> + Send;

    /// Repository names to offer as filter choices.
    fn fetch_repositories(
        &self,
    ) -> impl Future<Output = Result<Vec<String>, WorklistError>> + Send;
}
