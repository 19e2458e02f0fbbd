use std::fmt;
use std::process::Command;

use anyhow::{Context, Result, bail};

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// A GitHub bearer token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// `None` for an empty or all-whitespace token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_owned();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(****)")
    }
}

/// Who the caller is acting as.
///
/// Demo mode is its own variant: it is chosen by the caller, never guessed
/// from what a token looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Token(AccessToken),
    Demo,
}

impl Credential {
    /// An absent or blank token means demo mode.
    pub fn from_optional(token: Option<String>) -> Self {
        token
            .and_then(AccessToken::new)
            .map_or(Self::Demo, Self::Token)
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo)
    }
}

// ---------------------------------------------------------------------------
// Token discovery
// ---------------------------------------------------------------------------

/// Resolve a GitHub auth token for the given host.
///
/// Priority:
/// 1. `gh auth token --hostname {host}` (gh CLI)
/// 2. `GH_TOKEN` environment variable
/// 3. `GITHUB_TOKEN` environment variable
pub fn resolve_token(host: &str) -> Result<AccessToken> {
    // Try gh CLI first.
    if let Ok(token) = token_from_gh_cli(host) {
        return Ok(token);
    }

    // Fall back to environment variables.
    for var in ["GH_TOKEN", "GITHUB_TOKEN"] {
        if let Some(token) = std::env::var(var).ok().and_then(AccessToken::new) {
            return Ok(token);
        }
    }

    bail!(
        "no GitHub token found for host \"{host}\". \
         Run `gh auth login` or set GH_TOKEN / GITHUB_TOKEN."
    )
}

/// The host `gh` knows an API base URL by: `api.github.com` is `github.com`,
/// Enterprise instances are addressed by their own host.
pub fn host_for_api_base(api_base: &str) -> String {
    let host = url::Url::parse(api_base)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| "github.com".to_owned());
    match host.strip_prefix("api.") {
        Some(rest) if rest == "github.com" => rest.to_owned(),
        _ => host,
    }
}

fn token_from_gh_cli(host: &str) -> Result<AccessToken> {
    let output = Command::new("gh")
        .args(["auth", "token", "--hostname", host])
        .output()
        .context("failed to run `gh auth token`")?;

    if !output.status.success() {
        bail!("gh auth token exited with non-zero status");
    }

    let token =
        String::from_utf8(output.stdout).context("gh auth token produced non-UTF-8 output")?;

    AccessToken::new(token).context("gh auth token returned empty string")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_or_absent_token_is_demo() {
        assert_eq!(Credential::from_optional(None), Credential::Demo);
        assert_eq!(Credential::from_optional(Some("  ".to_owned())), Credential::Demo);
    }

    #[test]
    fn any_non_blank_token_is_live() {
        // Even a value that looks like a placeholder is treated as a real token.
        let credential = Credential::from_optional(Some("demo".to_owned()));
        assert!(!credential.is_demo());
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = AccessToken::new("ghp_secret").unwrap();
        assert_eq!(format!("{token:?}"), "AccessToken(****)");
        assert_eq!(token.expose(), "ghp_secret");
    }

    #[test]
    fn api_base_maps_to_gh_host() {
        assert_eq!(host_for_api_base("https://api.github.com"), "github.com");
        assert_eq!(
            host_for_api_base("https://ghe.example.com/api/v3"),
            "ghe.example.com"
        );
        assert_eq!(host_for_api_base("not a url"), "github.com");
    }
}
