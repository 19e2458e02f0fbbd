use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gh_worklist::config::loader;
use gh_worklist::github::auth::{self, Credential};
use gh_worklist::types::{
    Filters, IssuePage, KindFilter, RepositoryFilter, RoleFilter, StatusFilter, WorkItem,
};
use gh_worklist::worklist::Worklist;

#[derive(Parser)]
#[command(
    name = "gh-worklist",
    version,
    about = "Your GitHub issues and pull requests, in one list"
)]
struct Cli {
    /// Path to config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging to stderr.
    #[arg(long, global = true)]
    debug: bool,

    /// Serve the built-in sample data instead of calling GitHub.
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List issues and pull requests.
    Issues {
        /// all, open, closed
        #[arg(long)]
        status: Option<StatusFilter>,
        /// all, created, assigned
        #[arg(long)]
        role: Option<RoleFilter>,
        /// Repository name or owner/name.
        #[arg(long)]
        repo: Option<String>,
        /// all, issue, pull_request
        #[arg(long = "type")]
        kind: Option<KindFilter>,
        /// Free-text search term.
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        page_size: Option<u8>,
        /// Print the page as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List repository names usable with `--repo`.
    Repos {
        /// Print the names as a JSON array.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable.
    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = loader::load_config(cli.config.as_deref())?;
    let worklist = Worklist::new(&config.github);
    let credential = resolve_credential(cli.demo, worklist.api_base());

    match cli.command {
        Commands::Issues {
            status,
            role,
            repo,
            kind,
            search,
            page,
            page_size,
            json,
        } => {
            let defaults = config.defaults.filters();
            let filters = Filters {
                status: status.unwrap_or(defaults.status),
                role: role.unwrap_or(defaults.role),
                repository: repo
                    .as_deref()
                    .map_or(RepositoryFilter::All, RepositoryFilter::parse),
                kind: kind.unwrap_or(defaults.kind),
                search,
                page,
                page_size: page_size.unwrap_or(defaults.page_size),
            };

            let page = worklist
                .fetch_issues(&credential, &filters)
                .await
                .context("fetching issues")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print_page(&page, filters.page);
            }
        }
        Commands::Repos { json } => {
            let repos = worklist
                .fetch_repositories(&credential)
                .await
                .context("fetching repositories")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&repos)?);
            } else {
                for name in repos {
                    println!("{name}");
                }
            }
        }
    }

    Ok(())
}

fn resolve_credential(demo: bool, api_base: &str) -> Credential {
    if demo {
        return Credential::Demo;
    }
    let host = auth::host_for_api_base(api_base);
    match auth::resolve_token(&host) {
        Ok(token) => Credential::Token(token),
        Err(e) => {
            tracing::warn!("{e:#}");
            eprintln!("warning: no GitHub token found, showing sample data");
            Credential::Demo
        }
    }
}

fn print_page(page: &IssuePage, number: u32) {
    if page.items.is_empty() {
        println!("no matching issues or pull requests");
    }
    for item in &page.items {
        println!("{}", format_item(item));
    }

    let mut nav = Vec::new();
    if let Some(prev) = page.cursor.prev_page_number() {
        nav.push(format!("prev: --page {prev}"));
    }
    if let Some(next) = page.cursor.next_page_number() {
        nav.push(format!("next: --page {next}"));
    }
    if !nav.is_empty() {
        println!("-- page {number} ({})", nav.join(", "));
    }
}

fn format_item(item: &WorkItem) -> String {
    let mut line = format!(
        "{:<12} {:<7} {:<30} {} (@{})",
        item.kind.as_str(),
        item.status.as_str(),
        item.full_name(),
        item.title,
        item.author.login
    );
    if !item.labels.is_empty() {
        let labels: Vec<&str> = item.labels.iter().map(String::as_str).collect();
        line.push_str(&format!(" [{}]", labels.join(", ")));
    }
    line
}
