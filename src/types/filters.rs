use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::WorklistError;
use crate::types::work_item::WorkItemKind;

/// Default `per_page` when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u8 = 30;
/// GitHub refuses `per_page` above this.
pub const MAX_PAGE_SIZE: u8 = 100;

#[derive(Debug, Error)]
#[error("invalid value for {field}: \"{value}\" (expected one of: {expected})")]
pub struct FilterParseError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static str,
}

// ---------------------------------------------------------------------------
// Categorical filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleFilter {
    #[default]
    All,
    Created,
    Assigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindFilter {
    #[default]
    All,
    Issue,
    PullRequest,
}

impl KindFilter {
    /// Whether an item of `kind` passes this filter.
    pub fn accepts(self, kind: WorkItemKind) -> bool {
        match self {
            Self::All => true,
            Self::Issue => kind == WorkItemKind::Issue,
            Self::PullRequest => kind == WorkItemKind::PullRequest,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(FilterParseError {
                field: "status",
                value: s.to_owned(),
                expected: "all, open, closed",
            }),
        }
    }
}

impl FromStr for RoleFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "created" => Ok(Self::Created),
            "assigned" => Ok(Self::Assigned),
            _ => Err(FilterParseError {
                field: "role",
                value: s.to_owned(),
                expected: "all, created, assigned",
            }),
        }
    }
}

impl FromStr for KindFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "issue" | "issues" => Ok(Self::Issue),
            "pull_request" | "pr" | "prs" => Ok(Self::PullRequest),
            _ => Err(FilterParseError {
                field: "type",
                value: s.to_owned(),
                expected: "all, issue, pull_request",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Repository filter
// ---------------------------------------------------------------------------

/// Either no restriction, or one repository (`name` or `owner/name`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RepositoryFilter {
    #[default]
    All,
    Named(String),
}

impl RepositoryFilter {
    /// Empty and `all` both mean "no restriction".
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(trimmed.to_owned())
        }
    }

    /// The selected repository, if any, exactly as given.
    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Named(name) => Some(name),
        }
    }

    /// The bare repository name (the part after `owner/` when qualified).
    pub fn name(&self) -> Option<&str> {
        self.selected()
            .map(|s| s.rsplit_once('/').map_or(s, |(_, name)| name))
    }

    /// The owner, when the filter was given as `owner/name`.
    pub fn owner(&self) -> Option<&str> {
        self.selected()
            .and_then(|s| s.split_once('/'))
            .map(|(owner, _)| owner)
    }

    /// A named repository must be `name` or `owner/name` with both parts
    /// non-empty.
    fn check(&self) -> Result<(), WorklistError> {
        let Some(selected) = self.selected() else {
            return Ok(());
        };
        let well_formed = match selected.split_once('/') {
            None => true,
            Some((owner, name)) => !owner.is_empty() && !name.is_empty() && !name.contains('/'),
        };
        if well_formed {
            Ok(())
        } else {
            Err(WorklistError::InvalidFilters {
                message: format!("repository must be `name` or `owner/name`, got {selected:?}"),
            })
        }
    }
}

impl fmt::Display for RepositoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selected().unwrap_or("all"))
    }
}

impl FromStr for RepositoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for RepositoryFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.selected().unwrap_or("all"))
    }
}

impl<'de> Deserialize<'de> for RepositoryFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Everything a caller can narrow an issue listing by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Filters {
    pub status: StatusFilter,
    pub role: RoleFilter,
    pub repository: RepositoryFilter,
    pub kind: KindFilter,
    pub search: Option<String>,
    /// 1-based.
    pub page: u32,
    pub page_size: u8,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            role: RoleFilter::All,
            repository: RepositoryFilter::All,
            kind: KindFilter::All,
            search: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Filters {
    /// The free-text term, trimmed; `None` when absent or blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Reject page numbers, sizes and repository names GitHub would not accept.
    pub fn validate(&self) -> Result<(), WorklistError> {
        self.repository.check()?;
        if self.page == 0 {
            return Err(WorklistError::InvalidFilters {
                message: "page must be at least 1".to_owned(),
            });
        }
        if self.page_size == 0 {
            return Err(WorklistError::InvalidFilters {
                message: "page size must be at least 1".to_owned(),
            });
        }
        if self.page_size > MAX_PAGE_SIZE {
            return Err(WorklistError::InvalidFilters {
                message: format!("page size must not exceed {MAX_PAGE_SIZE}"),
            });
        }
        Ok(())
    }

    /// Build filters from HTTP-style query parameters.
    ///
    /// Accepted keys: `status`, `role`, `repo` / `repository`, `type` / `kind`,
    /// `search` / `q`, `page`, `pageSize` / `per_page`. Unrecognised values of
    /// categorical filters fall back to `all`; unknown keys are ignored.
    /// Non-numeric `page` / `pageSize` values are an error.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Result<Self, WorklistError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filters = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "status" => filters.status = value.parse().unwrap_or_else(|e| lenient(&e)),
                "role" => filters.role = value.parse().unwrap_or_else(|e| lenient(&e)),
                "type" | "kind" => filters.kind = value.parse().unwrap_or_else(|e| lenient(&e)),
                "repo" | "repository" => filters.repository = RepositoryFilter::parse(value),
                "search" | "q" => {
                    filters.search = Some(value.to_owned()).filter(|s| !s.trim().is_empty());
                }
                "page" => {
                    filters.page = value.trim().parse().map_err(|_| WorklistError::InvalidFilters {
                        message: format!("page must be a positive integer, got {value:?}"),
                    })?;
                }
                "pageSize" | "page_size" | "per_page" => {
                    filters.page_size =
                        value.trim().parse().map_err(|_| WorklistError::InvalidFilters {
                            message: format!("page size must be an integer, got {value:?}"),
                        })?;
                }
                other => tracing::debug!("ignoring unknown filter parameter {other:?}"),
            }
        }
        Ok(filters)
    }
}

fn lenient<T: Default>(err: &FilterParseError) -> T {
    tracing::debug!("{err}; treating as \"all\"");
    T::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_all_repository_mean_no_restriction() {
        assert_eq!(RepositoryFilter::parse(""), RepositoryFilter::All);
        assert_eq!(RepositoryFilter::parse("  ALL "), RepositoryFilter::All);
        assert_eq!(
            RepositoryFilter::parse("widgets"),
            RepositoryFilter::Named("widgets".to_owned())
        );
    }

    #[test]
    fn qualified_repository_splits_into_owner_and_name() {
        let repo = RepositoryFilter::parse("acme/widgets");
        assert_eq!(repo.owner(), Some("acme"));
        assert_eq!(repo.name(), Some("widgets"));

        let bare = RepositoryFilter::parse("widgets");
        assert_eq!(bare.owner(), None);
        assert_eq!(bare.name(), Some("widgets"));
    }

    #[test]
    fn validate_rejects_repository_with_empty_half() {
        for repo in ["acme/", "/widgets", "acme/widgets/extra", "/"] {
            let filters = Filters {
                repository: RepositoryFilter::parse(repo),
                ..Filters::default()
            };
            assert!(
                matches!(filters.validate(), Err(WorklistError::InvalidFilters { .. })),
                "{repo:?} should be rejected"
            );
        }
        for repo in ["widgets", "acme/widgets", "all"] {
            let filters = Filters {
                repository: RepositoryFilter::parse(repo),
                ..Filters::default()
            };
            assert!(filters.validate().is_ok(), "{repo:?} should be accepted");
        }
    }

    #[test]
    fn blank_search_is_no_search() {
        let filters = Filters {
            search: Some("   ".to_owned()),
            ..Filters::default()
        };
        assert_eq!(filters.search_term(), None);
    }

    #[test]
    fn validate_rejects_zero_page_and_oversized_page_size() {
        let zero_page = Filters {
            page: 0,
            ..Filters::default()
        };
        assert!(matches!(
            zero_page.validate(),
            Err(WorklistError::InvalidFilters { .. })
        ));

        let too_big = Filters {
            page_size: 101,
            ..Filters::default()
        };
        assert!(too_big.validate().is_err());
        assert!(Filters::default().validate().is_ok());
    }

    #[test]
    fn strict_parsing_reports_the_field() {
        let err = "maybe".parse::<StatusFilter>().unwrap_err();
        assert_eq!(err.field, "status");
        assert_eq!("pr".parse::<KindFilter>().unwrap(), KindFilter::PullRequest);
    }

    #[test]
    fn query_pairs_use_route_parameter_names() {
        let filters = Filters::from_query_pairs([
            ("status", "closed"),
            ("role", "assigned"),
            ("repo", "widgets"),
            ("type", "pull_request"),
            ("page", "3"),
            ("pageSize", "50"),
        ])
        .unwrap();
        assert_eq!(filters.status, StatusFilter::Closed);
        assert_eq!(filters.role, RoleFilter::Assigned);
        assert_eq!(filters.repository.selected(), Some("widgets"));
        assert_eq!(filters.kind, KindFilter::PullRequest);
        assert_eq!(filters.page, 3);
        assert_eq!(filters.page_size, 50);
    }

    #[test]
    fn query_pairs_degrade_unknown_values_to_all() {
        let filters =
            Filters::from_query_pairs([("status", "weird"), ("role", "reviewer")]).unwrap();
        assert_eq!(filters.status, StatusFilter::All);
        assert_eq!(filters.role, RoleFilter::All);
    }

    #[test]
    fn query_pairs_reject_non_numeric_page() {
        assert!(Filters::from_query_pairs([("page", "two")]).is_err());
    }
}
