use async_trait::async_trait;

use crate::domain::commit::CommitRecord;
use crate::domain::range::TimeRange;
use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct CommitQuery {
    pub author: String,
    pub range: TimeRange,
    pub max_commits: usize,
}

impl CommitQuery {
    /// Arguments for `git log`; non-ASCII paths are emitted verbatim.
    pub fn log_args(&self) -> Vec<String> {
        let mut args = vec![
            "-c".to_string(),
            "core.quotepath=off".to_string(),
            "log".to_string(),
            "--date=short".to_string(),
            "--numstat".to_string(),
            format!("--max-count={}", self.max_commits),
            format!("--author={}", self.author),
        ];
        if let Some(since) = self.range.since_arg() {
            args.push(format!("--since={since}"));
        }
        if let Some(until) = self.range.until_arg() {
            args.push(format!("--until={until}"));
        }
        args
    }
}

/// Source of commit records, newest first.
#[async_trait]
pub trait CommitSource: Send + Sync {
    async fn fetch_commits(&self, query: &CommitQuery) -> AppResult<Vec<CommitRecord>>;
    async fn current_user(&self) -> AppResult<Option<String>>;
}
