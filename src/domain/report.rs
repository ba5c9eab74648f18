use serde::Serialize;

use crate::domain::range::TimeRange;

pub const SOURCE_MODE: &str = "git-log-heuristic";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRangeDescriptor {
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
}

impl From<&TimeRange> for TimeRangeDescriptor {
    fn from(range: &TimeRange) -> Self {
        Self {
            mode: range.mode().as_str(),
            since: range.since().map(|date| date.to_string()),
            until: range.until().map(|date| date.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub raw_commits: usize,
    pub meaningful_commits: usize,
    pub unique_files_touched: usize,
    pub areas_touched: usize,
    pub insertions: usize,
    pub deletions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaEntry {
    pub name: String,
    pub commits: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechEntry {
    pub name: String,
    pub files: usize,
}

/// Narrative block produced from aggregates only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Narrative {
    pub summary: String,
    pub feature_highlights: Vec<String>,
    pub end_user_outcomes: Vec<String>,
    pub business_relevance: Vec<String>,
    pub guidance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub role: String,
    pub company: String,
    pub time_range: TimeRangeDescriptor,
    pub stats: RunStats,
    pub summary: String,
    pub feature_highlights: Vec<String>,
    pub end_user_outcomes: Vec<String>,
    pub business_relevance: Vec<String>,
    pub areas: Vec<AreaEntry>,
    pub tech_signals: Vec<TechEntry>,
    pub source_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
}
