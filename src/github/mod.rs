// github module: REST adapter and response normalization

pub mod auth;
pub mod client;
pub mod link;
pub mod normalize;
pub mod query;
pub(crate) mod rate_limit;
pub mod raw;

pub use auth::{AccessToken, Credential};
pub use client::GitHubClient;
pub use query::{ListPlan, PlanKind, QueryPlan, SearchPlan, plan_kind};
