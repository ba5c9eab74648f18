use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::Classifier;
use crate::domain::range::TimeRange;
use crate::error::{AppError, AppResult};
use crate::services::{CommitQuery, CommitSource};

pub const DEFAULT_MAX_COMMITS: usize = 400;
const CONFIG_ENV: &str = "GIT2LINKEDIN_CONFIG";
const CONFIG_DIR_NAME: &str = "git2linkedin";
const CONFIG_FILE_NAME: &str = "config.json";

/// Optional settings file; every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredConfig {
    pub noise_patterns: Vec<String>,
    pub max_commits: Option<usize>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        match config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!(path = %path.display(), "loaded config file");
                serde_json::from_str(&contents).map_err(|err| {
                    AppError::Configuration(format!(
                        "invalid config file {}: {err}",
                        path.display()
                    ))
                })
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Configuration(format!(
                "cannot read config file {}: {err}",
                path.display()
            ))),
        }
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Raw command-line values before validation.
#[derive(Debug, Clone, Default)]
pub struct DraftOptions {
    pub repo: PathBuf,
    pub role: String,
    pub company: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub author: Option<String>,
    pub out: Option<PathBuf>,
    pub max_commits: Option<usize>,
    pub noise_patterns: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub repo_root: PathBuf,
    pub role: String,
    pub company: String,
    pub author: Option<String>,
    pub range: TimeRange,
    pub max_commits: usize,
    pub out: Option<PathBuf>,
    pub classifier: Classifier,
}

impl AppConfig {
    /// Validates options; command-line values win over stored ones.
    pub fn load(options: DraftOptions, stored: StoredConfig) -> AppResult<Self> {
        let role = required(&options.role, "role")?;
        let company = required(&options.company, "company")?;
        let range = TimeRange::parse(options.since.as_deref(), options.until.as_deref())?;

        let max_commits = options
            .max_commits
            .or(stored.max_commits)
            .unwrap_or(DEFAULT_MAX_COMMITS);
        if max_commits == 0 {
            return Err(AppError::InvalidArgument(
                "--max-commits must be greater than 0".to_string(),
            ));
        }

        let mut patterns = stored.noise_patterns;
        patterns.extend(options.noise_patterns);
        let classifier = Classifier::with_extra_patterns(&patterns)?;

        let author = options
            .author
            .map(|author| author.trim().to_string())
            .filter(|author| !author.is_empty());

        Ok(Self {
            repo_root: options.repo,
            role,
            company,
            author,
            range,
            max_commits,
            out: options.out,
            classifier,
        })
    }

    /// Falls back to the identity configured in the repository.
    pub async fn resolve_author(&mut self, source: &dyn CommitSource) -> AppResult<()> {
        if self.author.is_some() {
            return Ok(());
        }
        let detected = source.current_user().await?.ok_or_else(|| {
            AppError::InvalidArgument(
                "could not detect current git user; provide --author explicitly".to_string(),
            )
        })?;
        debug!(author = %detected, "using configured git user as author");
        self.author = Some(detected);
        Ok(())
    }

    pub fn commit_query(&self) -> AppResult<CommitQuery> {
        let author = self
            .author
            .clone()
            .ok_or_else(|| AppError::InvalidArgument("author is not resolved".to_string()))?;
        Ok(CommitQuery {
            author,
            range: self.range,
            max_commits: self.max_commits,
        })
    }
}

fn required(value: &str, field: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidArgument(format!("--{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}
