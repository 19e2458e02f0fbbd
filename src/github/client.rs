use std::sync::Once;

use http::header::LINK;
use http::{HeaderMap, StatusCode};
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::error::WorklistError;
use crate::github::auth::AccessToken;
use crate::github::query::QueryPlan;
use crate::github::rate_limit::{format_rate_limit_message, is_rate_limited, rate_limit_info};
use crate::github::raw::{RawListItem, RawRepositorySummary, RawResponse, RawSearchBody, RawViewer};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repositories fetched for filter population; anything beyond is dropped.
const REPOSITORY_LIMIT: &str = "100";

static CRYPTO_PROVIDER: Once = Once::new();

/// Install the rustls `CryptoProvider` before any TLS client is constructed.
/// rustls 0.23 no longer picks one automatically.
fn install_crypto_provider() {
    CRYPTO_PROVIDER.call_once(|| {
        // Err means another component already installed one, which is fine.
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    });
}

/// One authenticated connection to the GitHub REST API.
///
/// Every method issues exactly one HTTP request and never retries.
pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    /// Build a client for `api_base` (`https://api.github.com`, a GitHub
    /// Enterprise `https://<host>/api/v3`, or a test server).
    pub fn new(token: &AccessToken, api_base: &str) -> Result<Self, WorklistError> {
        install_crypto_provider();

        // One request per call: a throttled or failing response goes straight
        // back to the caller instead of through octocrab's retry layer.
        let builder = Octocrab::builder()
            .personal_token(token.expose().to_owned())
            .add_retry_config(RetryConfig::None);
        let builder = if api_base.trim_end_matches('/') == DEFAULT_API_BASE {
            builder
        } else {
            builder
                .base_uri(api_base)
                .map_err(|e| WorklistError::Configuration {
                    message: format!("invalid GitHub API base URL {api_base:?}: {e}"),
                })?
        };

        let octocrab = builder.build().map_err(|e| WorklistError::Configuration {
            message: format!("building GitHub client failed: {e}"),
        })?;
        Ok(Self { octocrab })
    }

    /// Login of the account the token belongs to (`GET /user`).
    pub async fn viewer_login(&self) -> Result<String, WorklistError> {
        let (viewer, _) = self
            .get_json::<RawViewer>("resolve viewer", "/user".to_owned())
            .await?;
        Ok(viewer.login)
    }

    /// Run `plan` for one page. `page` and `page_size` become `page` and
    /// `per_page` unchanged.
    pub async fn execute(
        &self,
        plan: &QueryPlan,
        page: u32,
        page_size: u8,
    ) -> Result<RawResponse, WorklistError> {
        let page = page.to_string();
        let per_page = page_size.to_string();

        match plan {
            QueryPlan::List(list) => {
                let route = route(
                    "/issues",
                    &[
                        ("filter", list.filter),
                        ("state", list.state),
                        ("per_page", per_page.as_str()),
                        ("page", page.as_str()),
                    ],
                );
                let (items, link) = self
                    .get_json::<Vec<RawListItem>>("list issues", route)
                    .await?;
                Ok(RawResponse::List { items, link })
            }
            QueryPlan::Search(search) => {
                let route = route(
                    "/search/issues",
                    &[
                        ("q", search.query.as_str()),
                        ("per_page", per_page.as_str()),
                        ("page", page.as_str()),
                    ],
                );
                let (body, link) = self
                    .get_json::<RawSearchBody>("search issues", route)
                    .await?;
                if body.incomplete_results {
                    tracing::warn!("search for {:?} returned incomplete results", search.query);
                }
                Ok(RawResponse::Search {
                    items: body.items,
                    total_count: body.total_count,
                    incomplete_results: body.incomplete_results,
                    link,
                })
            }
        }
    }

    /// Names of up to 100 repositories, most recently updated first.
    pub async fn list_repositories(&self) -> Result<Vec<String>, WorklistError> {
        let route = route(
            "/user/repos",
            &[
                ("per_page", REPOSITORY_LIMIT),
                ("sort", "updated"),
                ("direction", "desc"),
            ],
        );
        let (repos, _) = self
            .get_json::<Vec<RawRepositorySummary>>("list repositories", route)
            .await?;
        Ok(repos.into_iter().map(|r| r.name).collect())
    }

    // -----------------------------------------------------------------------
    // Transport
    // -----------------------------------------------------------------------

    /// GET `route`, map failures, and decode a 2xx body as `T`. Also returns
    /// the raw `Link` header.
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        route: String,
    ) -> Result<(T, Option<String>), WorklistError> {
        tracing::debug!("github: {operation}: GET {route}");

        let response = self
            .octocrab
            ._get(route)
            .await
            .map_err(|e| map_transport_error(operation, &e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = self
            .octocrab
            .body_to_string(response)
            .await
            .map_err(|e| map_transport_error(operation, &e))?;

        if !status.is_success() {
            let err = map_status(operation, status, &headers, &body);
            tracing::debug!("github: {operation} failed: {err}");
            return Err(err);
        }

        let value = serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::warn!("github: {operation} returned an unexpected body: {e}");
            WorklistError::MalformedResponse {
                message: format!("{operation}: {e}"),
            }
        })?;

        let link = headers
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        Ok((value, link))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn route(path: &str, params: &[(&str, &str)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{path}?{query}")
}

fn map_transport_error(operation: &str, error: &octocrab::Error) -> WorklistError {
    WorklistError::UpstreamUnavailable {
        message: format!("{operation} failed: {error}"),
    }
}

fn map_status(
    operation: &str,
    status: StatusCode,
    headers: &HeaderMap,
    body: &str,
) -> WorklistError {
    let message = extract_github_message(body)
        .or_else(|| status.canonical_reason().map(str::to_owned))
        .unwrap_or_else(|| "unknown error".to_owned());

    if is_rate_limited(status, headers, &message) {
        let info = rate_limit_info(headers);
        return WorklistError::UpstreamRateLimit {
            message: format_rate_limit_message(&message, info.as_ref()),
            rate_limit: info,
        };
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => WorklistError::UpstreamAuth {
            message: format!("{operation} failed: GitHub returned {status} {message}"),
        },
        _ => WorklistError::UpstreamUnavailable {
            message: format!("{operation} failed with status {status}: {message}"),
        },
    }
}

fn extract_github_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn route_encodes_search_qualifiers() {
        let r = route("/search/issues", &[("q", "bug author:@me"), ("page", "2")]);
        assert_eq!(r, "/search/issues?q=bug+author%3A%40me&page=2");
    }

    #[test]
    fn unauthorized_maps_to_auth_error() {
        let err = map_status(
            "list issues",
            StatusCode::UNAUTHORIZED,
            &HeaderMap::new(),
            r#"{"message":"Bad credentials"}"#,
        );
        assert!(matches!(
            err,
            WorklistError::UpstreamAuth { ref message } if message.contains("Bad credentials")
        ));
    }

    #[test]
    fn forbidden_with_rate_limit_message_maps_to_rate_limit() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("60"));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        let err = map_status(
            "search issues",
            StatusCode::FORBIDDEN,
            &headers,
            r#"{"message":"API rate limit exceeded for 1.2.3.4."}"#,
        );
        let WorklistError::UpstreamRateLimit { rate_limit, .. } = err else {
            panic!("expected rate limit error, got {err:?}");
        };
        assert_eq!(rate_limit.map(|r| r.remaining), Some(0));
    }

    #[test]
    fn not_found_and_server_errors_are_unavailable() {
        for status in [
            StatusCode::NOT_FOUND,
            StatusCode::BAD_GATEWAY,
            StatusCode::UNPROCESSABLE_ENTITY,
        ] {
            let err = map_status("list issues", status, &HeaderMap::new(), "<html>");
            assert!(
                matches!(err, WorklistError::UpstreamUnavailable { .. }),
                "{status} should be unavailable"
            );
        }
    }

    #[test]
    fn message_falls_back_to_reason_phrase() {
        let err = map_status("list issues", StatusCode::BAD_GATEWAY, &HeaderMap::new(), "");
        assert_eq!(
            err.to_string(),
            "GitHub is unavailable: list issues failed with status 502 Bad Gateway: Bad Gateway"
        );
    }
}
