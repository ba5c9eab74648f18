use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::commit::{CommitRecord, FileChange};
use crate::error::{AppError, AppResult};
use crate::services::{CommitQuery, CommitSource};

const COMMIT_MARKER: &str = "__COMMIT__";
const FIELD_SEPARATOR: char = '\x1f';
const PRETTY_FORMAT: &str = "--pretty=format:__COMMIT__%x1f%H%x1f%an%x1f%ae%x1f%ad%x1f%s";

pub struct GitCli {
    repo_root: PathBuf,
}

impl GitCli {
    /// Resolves `path` and checks that it lies inside a git work tree.
    pub async fn open(path: &Path) -> AppResult<Self> {
        let repo_root = path.canonicalize().map_err(|_| {
            AppError::Repository(format!(
                "repository path does not exist: {}",
                path.display()
            ))
        })?;

        let cli = Self { repo_root };
        let output = cli.git(&["rev-parse", "--is-inside-work-tree"]).await?;
        if !output.status.success() || String::from_utf8_lossy(&output.stdout).trim() != "true" {
            return Err(AppError::Repository(format!(
                "not a git repository: {}",
                cli.repo_root.display()
            )));
        }
        Ok(cli)
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    async fn git<S: AsRef<str>>(&self, args: &[S]) -> AppResult<std::process::Output> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        debug!(repo = %self.repo_root.display(), ?args, "running git");
        Command::new("git")
            .arg("-C")
            .arg(&self.repo_root)
            .args(&args)
            .output()
            .await
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => {
                    AppError::Repository("git executable not found on PATH".to_string())
                }
                _ => AppError::Repository(format!("failed to run git: {err}")),
            })
    }

    async fn config_value(&self, key: &str) -> AppResult<Option<String>> {
        let output = self.git(&["config", "--get", key]).await?;
        if !output.status.success() {
            return Ok(None);
        }
        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!value.is_empty()).then_some(value))
    }
}

#[async_trait]
impl CommitSource for GitCli {
    async fn fetch_commits(&self, query: &CommitQuery) -> AppResult<Vec<CommitRecord>> {
        let mut args = query.log_args();
        args.push(PRETTY_FORMAT.to_string());

        let output = self.git(&args).await?;
        if !output.status.success() {
            return Err(AppError::Repository(format!(
                "git log failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let commits = parse_log(&String::from_utf8_lossy(&output.stdout));
        debug!(count = commits.len(), "parsed commit log");
        Ok(commits)
    }

    async fn current_user(&self) -> AppResult<Option<String>> {
        for key in ["user.name", "user.email"] {
            if let Some(value) = self.config_value(key).await? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

/// Parses `git log --numstat` output produced with [`PRETTY_FORMAT`].
pub fn parse_log(raw: &str) -> Vec<CommitRecord> {
    let mut commits = Vec::new();
    let mut current: Option<CommitRecord> = None;

    for line in raw.lines() {
        if let Some(header) = line.strip_prefix(COMMIT_MARKER) {
            if let Some(done) = current.take() {
                commits.push(done);
            }
            current = parse_header(header);
            if current.is_none() {
                warn!("skipping malformed commit header");
            }
            continue;
        }

        let Some(commit) = current.as_mut() else {
            continue;
        };
        if line.trim().is_empty() {
            continue;
        }
        if let Some(change) = parse_numstat(line) {
            commit.files.push(change);
        }
    }

    if let Some(done) = current {
        commits.push(done);
    }
    commits
}

fn parse_header(header: &str) -> Option<CommitRecord> {
    let mut fields = header
        .strip_prefix(FIELD_SEPARATOR)?
        .splitn(5, FIELD_SEPARATOR);
    let hash = fields.next()?.trim().to_string();
    let author_name = fields.next()?.trim().to_string();
    let author_email = fields.next()?.trim().to_string();
    let date = NaiveDate::parse_from_str(fields.next()?.trim(), "%Y-%m-%d").ok()?;
    let subject = normalize_space(fields.next()?);
    if hash.is_empty() {
        return None;
    }

    Some(CommitRecord {
        hash,
        author_name,
        author_email,
        date,
        subject,
        files: Vec::new(),
    })
}

fn parse_numstat(line: &str) -> Option<FileChange> {
    let mut columns = line.splitn(3, '\t');
    let added = columns.next()?;
    let deleted = columns.next()?;
    let path = resolve_rename(&unquote_path(columns.next()?.trim()));
    if path.is_empty() {
        return None;
    }
    // Binary files report "-" for both counts.
    Some(FileChange::new(
        path,
        added.parse().unwrap_or(0),
        deleted.parse().unwrap_or(0),
    ))
}

/// Undoes git's C-style quoting, e.g. `"caf\303\251.ts"` becomes `café.ts`.
fn unquote_path(path: &str) -> String {
    let Some(inner) = path
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return path.to_string();
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut input = inner.bytes().peekable();
    while let Some(byte) = input.next() {
        if byte != b'\\' {
            bytes.push(byte);
            continue;
        }
        match input.next() {
            Some(digit @ b'0'..=b'7') => {
                let mut value = u16::from(digit - b'0');
                for _ in 0..2 {
                    match input.peek() {
                        Some(&next @ b'0'..=b'7') => {
                            value = value * 8 + u16::from(next - b'0');
                            input.next();
                        }
                        _ => break,
                    }
                }
                bytes.push(value as u8);
            }
            Some(b'n') => bytes.push(b'\n'),
            Some(b't') => bytes.push(b'\t'),
            Some(b'r') => bytes.push(b'\r'),
            Some(other) => bytes.push(other),
            None => bytes.push(b'\\'),
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Resolves numstat rename notation to the destination path.
fn resolve_rename(path: &str) -> String {
    if let (Some(open), Some(close)) = (path.find('{'), path.find('}')) {
        if open < close {
            if let Some((_, new)) = path[open + 1..close].split_once(" => ") {
                let joined = format!("{}{}{}", &path[..open], new, &path[close + 1..]);
                return joined.replace("//", "/");
            }
        }
    }
    match path.split_once(" => ") {
        Some((_, new)) => new.to_string(),
        None => path.to_string(),
    }
}

fn normalize_space(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
