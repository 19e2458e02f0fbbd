use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};

use crate::config::types::AppConfig;
use crate::types::MAX_PAGE_SIZE;

/// Discover and load the app config.
///
/// Priority:
/// 1. `--config` flag (explicit path)
/// 2. `$GH_WORKLIST_CONFIG` environment variable
/// 3. `$XDG_CONFIG_HOME/gh-worklist/config.toml`
/// 4. `~/.config/gh-worklist/config.toml`
///
/// With none of these present the built-in defaults apply.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config(),
    };

    let Some(path) = path else {
        tracing::debug!("config: no config file found, using defaults");
        return Ok(AppConfig::default());
    };

    tracing::debug!("config: loading {}", path.display());
    let contents =
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("loading config from {}", path.display()))
}

/// Parse and check a config document.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).context("parsing TOML")?;

    let page_size = config.defaults.page_size;
    ensure!(
        (1..=MAX_PAGE_SIZE).contains(&page_size),
        "defaults.page_size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
    );
    ensure!(
        config.github.request_timeout_secs > 0,
        "github.request_timeout_secs must be greater than zero"
    );
    url::Url::parse(&config.github.api_base_url).with_context(|| {
        format!(
            "github.api_base_url is not a valid URL: {:?}",
            config.github.api_base_url
        )
    })?;

    Ok(config)
}

fn find_config() -> Option<PathBuf> {
    // $GH_WORKLIST_CONFIG
    if let Ok(path) = std::env::var("GH_WORKLIST_CONFIG") {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }

    // $XDG_CONFIG_HOME/gh-worklist/config.toml
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let p = PathBuf::from(xdg).join("gh-worklist/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    // ~/.config/gh-worklist/config.toml
    if let Some(home) = home_dir() {
        let p = home.join(".config/gh-worklist/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    None
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
