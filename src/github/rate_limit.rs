//! Rate-limit detection utilities for GitHub API responses.
//!
//! GitHub signals rate limits through:
//! - HTTP 403 with "API rate limit exceeded" in the body
//! - HTTP 429 (secondary rate limit)
//! - `x-ratelimit-remaining: 0` on an otherwise failed response

use chrono::{DateTime, Utc};
use http::{HeaderMap, StatusCode};

use crate::types::RateLimitInfo;

/// Check whether a failed response indicates a GitHub rate limit.
pub(crate) fn is_rate_limited(status: StatusCode, headers: &HeaderMap, message: &str) -> bool {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return true;
    }
    if status != StatusCode::FORBIDDEN {
        return false;
    }
    let msg = message.to_lowercase();
    msg.contains("rate limit")
        || rate_limit_info(headers).is_some_and(|info| info.is_exhausted())
}

/// Parse the `x-ratelimit-*` headers; `None` unless both limit and remaining
/// are present.
pub(crate) fn rate_limit_info(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let limit = header_u64(headers, "x-ratelimit-limit")?;
    let remaining = header_u64(headers, "x-ratelimit-remaining")?;
    let reset_at = header_u64(headers, "x-ratelimit-reset")
        .and_then(|secs| i64::try_from(secs).ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
    Some(RateLimitInfo {
        limit: u32::try_from(limit).unwrap_or(u32::MAX),
        remaining: u32::try_from(remaining).unwrap_or(u32::MAX),
        reset_at,
    })
}

/// Format a user-friendly message for a rate-limit error.
pub(crate) fn format_rate_limit_message(message: &str, info: Option<&RateLimitInfo>) -> String {
    let base = if message.to_lowercase().contains("secondary rate limit") {
        "secondary rate limit hit, wait a moment before retrying".to_owned()
    } else if message.is_empty() {
        "API rate limit exceeded".to_owned()
    } else {
        message.to_owned()
    };
    match info.and_then(|i| i.reset_at) {
        Some(reset) => format!("{base} (resets at {})", reset.to_rfc3339()),
        None => base,
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(remaining: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert("x-ratelimit-limit", HeaderValue::from_static("5000"));
        map.insert(
            "x-ratelimit-remaining",
            HeaderValue::from_str(remaining).unwrap(),
        );
        map.insert("x-ratelimit-reset", HeaderValue::from_static("1700000000"));
        map
    }

    #[test]
    fn detects_rate_limit_exceeded_message() {
        assert!(is_rate_limited(
            StatusCode::FORBIDDEN,
            &HeaderMap::new(),
            "API rate limit exceeded for user ID 1."
        ));
    }

    #[test]
    fn detects_429_status() {
        assert!(is_rate_limited(
            StatusCode::TOO_MANY_REQUESTS,
            &HeaderMap::new(),
            ""
        ));
    }

    #[test]
    fn detects_exhausted_quota_header() {
        assert!(is_rate_limited(StatusCode::FORBIDDEN, &headers("0"), "Forbidden"));
    }

    #[test]
    fn plain_forbidden_is_not_rate_limited() {
        assert!(!is_rate_limited(
            StatusCode::FORBIDDEN,
            &headers("4999"),
            "Resource not accessible by integration"
        ));
    }

    #[test]
    fn unauthorized_is_not_rate_limited() {
        assert!(!is_rate_limited(
            StatusCode::UNAUTHORIZED,
            &headers("0"),
            "Bad credentials"
        ));
    }

    #[test]
    fn parses_rate_limit_headers() {
        let info = rate_limit_info(&headers("12")).unwrap();
        assert_eq!(info.limit, 5000);
        assert_eq!(info.remaining, 12);
        assert_eq!(info.reset_at.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn missing_headers_yield_none() {
        assert!(rate_limit_info(&HeaderMap::new()).is_none());
    }

    #[test]
    fn format_secondary_rate_limit() {
        let msg = format_rate_limit_message("You have exceeded a secondary rate limit", None);
        assert!(msg.contains("secondary rate limit"));
    }

    #[test]
    fn format_includes_reset_time() {
        let info = rate_limit_info(&headers("0")).unwrap();
        let msg = format_rate_limit_message("API rate limit exceeded", Some(&info));
        assert!(msg.starts_with("API rate limit exceeded (resets at 2023-11-14T22:13:20"));
    }
}
