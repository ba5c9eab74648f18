mod analysis;
mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod narrative;
mod output;
mod services;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, DraftOptions, StoredConfig};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::git::GitCli;

#[derive(Parser)]
#[command(
    name = "git2linkedin",
    author,
    version,
    about = "Draft a LinkedIn Experience entry from git history"
)]
struct Cli {
    /// Repository to read commits from.
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Role title for the experience entry.
    #[arg(long)]
    role: String,

    /// Company name for the experience entry.
    #[arg(long)]
    company: String,

    /// First day to include (YYYY-MM-DD).
    #[arg(long)]
    since: Option<String>,

    /// Last day to include (YYYY-MM-DD).
    #[arg(long)]
    until: Option<String>,

    /// Author filter; defaults to the configured git user.
    #[arg(long, env = "GIT2LINKEDIN_AUTHOR")]
    author: Option<String>,

    /// Also write a markdown draft to this path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Maximum number of commits to inspect [default: 400].
    #[arg(long, env = "GIT2LINKEDIN_MAX_COMMITS")]
    max_commits: Option<usize>,

    /// Extra subject regex treated as noise (repeatable).
    #[arg(long = "noise-pattern", value_name = "REGEX")]
    noise_patterns: Vec<String>,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(error) = run(cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> AppResult<()> {
    let stored = StoredConfig::load()?;
    let mut config = AppConfig::load(
        DraftOptions {
            repo: cli.repo,
            role: cli.role,
            company: cli.company,
            since: cli.since,
            until: cli.until,
            author: cli.author,
            out: cli.out,
            max_commits: cli.max_commits,
            noise_patterns: cli.noise_patterns,
        },
        stored,
    )?;

    let git = GitCli::open(&config.repo_root).await?;
    config.repo_root = git.repo_root().to_path_buf();
    config.resolve_author(&git).await?;
    debug!(repo = %config.repo_root.display(), author = ?config.author, "resolved configuration");

    let context = AppContext::new(config, Arc::new(git));
    cmd::draft::run(&context).await?;

    Ok(())
}
