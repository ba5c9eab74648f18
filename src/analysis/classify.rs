//! Rule-based commit classification.
//!
//! A commit is meaningful unless its subject matches a noise rule or it
//! touches no substantive file. Everything here is a pure function of the
//! commit record.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::commit::{ClassifiedCommit, CommitCategory, CommitRecord};
use crate::error::{AppError, AppResult};

const DEFAULT_NOISE_RULES: &[(&str, &str)] = &[
    ("merge", r"^merged?\b"),
    ("bump", r"^bump(ed|s)?\b"),
    ("bump", r"^(chore|build)\(deps(-dev)?\)"),
    ("bump", r"\bbump(ed|s)?\b.*\bfrom\b.*\bto\b"),
    ("format", r"^(format|fmt|style)(\(|:|\b)"),
    ("format", r"^((apply|run|fix)\s+)?(code\s+)?formatting\b"),
    ("typo", r"^typos?(\(|:|\b)"),
    ("typo", r"^fix(es|ed)?\s+(a\s+|some\s+)?typos?\b"),
    ("lint", r"^lint(\(|:|\b)"),
    ("wip", r"^wip(\(|:|\b)"),
    ("chore", r"^chore(\(|:|\b)"),
    ("docs", r"^docs?(\(|:|\b)"),
    ("release", r"^release(\(|:|\b)"),
    ("version", r"^v?\d+(\.\d+)+(-[\w.]+)?$"),
    ("version", r"^(bump|update|set) version\b"),
];

const LOCKFILE_NAMES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Cargo.lock",
    "Gemfile.lock",
    "poetry.lock",
    "go.sum",
    "composer.lock",
    "Pipfile.lock",
    "bun.lockb",
    "bun.lock",
    "flake.lock",
    "uv.lock",
];

static CONVENTIONAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+)(\([^)]*\))?!?:").expect("conventional prefix regex is valid")
});

const KEYWORD_CATEGORIES: &[(&str, CommitCategory)] = &[
    ("add", CommitCategory::Feature),
    ("adds", CommitCategory::Feature),
    ("added", CommitCategory::Feature),
    ("implement", CommitCategory::Feature),
    ("implements", CommitCategory::Feature),
    ("introduce", CommitCategory::Feature),
    ("support", CommitCategory::Feature),
    ("create", CommitCategory::Feature),
    ("fix", CommitCategory::Fix),
    ("fixes", CommitCategory::Fix),
    ("fixed", CommitCategory::Fix),
    ("resolve", CommitCategory::Fix),
    ("correct", CommitCategory::Fix),
    ("patch", CommitCategory::Fix),
    ("optimize", CommitCategory::Performance),
    ("speed", CommitCategory::Performance),
    ("cache", CommitCategory::Performance),
    ("refactor", CommitCategory::Refactor),
    ("cleanup", CommitCategory::Refactor),
    ("clean", CommitCategory::Refactor),
    ("simplify", CommitCategory::Refactor),
    ("restructure", CommitCategory::Refactor),
    ("test", CommitCategory::Test),
    ("tests", CommitCategory::Test),
];

#[derive(Debug, Clone)]
pub struct NoiseRule {
    pub name: String,
    pattern: Regex,
}

impl NoiseRule {
    fn compile(name: &str, pattern: &str) -> AppResult<Self> {
        let pattern = Regex::new(&format!("(?i){pattern}")).map_err(|err| {
            AppError::InvalidArgument(format!("invalid noise pattern '{pattern}': {err}"))
        })?;
        Ok(Self {
            name: name.to_string(),
            pattern,
        })
    }

    pub fn matches(&self, subject: &str) -> bool {
        self.pattern.is_match(subject)
    }
}

#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<NoiseRule>,
}

impl Classifier {
    pub fn with_defaults() -> Self {
        let rules = DEFAULT_NOISE_RULES
            .iter()
            .map(|(name, pattern)| NoiseRule::compile(name, pattern))
            .collect::<AppResult<Vec<_>>>()
            .expect("default noise rules are valid");
        Self { rules }
    }

    /// Default rules followed by user-supplied patterns.
    pub fn with_extra_patterns(extra: &[String]) -> AppResult<Self> {
        let mut classifier = Self::with_defaults();
        for pattern in extra {
            classifier.rules.push(NoiseRule::compile("custom", pattern)?);
        }
        Ok(classifier)
    }

    pub fn noise_rule(&self, subject: &str) -> Option<&NoiseRule> {
        let subject = subject.trim();
        self.rules.iter().find(|rule| rule.matches(subject))
    }

    pub fn classify(&self, record: &CommitRecord) -> ClassifiedCommit {
        let subject = record.subject.trim();
        let category = categorize(subject);
        let meaningful = if subject.is_empty() {
            debug!(category = category.as_str(), "filtered commit with empty subject");
            false
        } else if let Some(rule) = self.noise_rule(subject) {
            debug!(rule = %rule.name, category = category.as_str(), "filtered noise commit");
            false
        } else if !record.files.iter().any(|file| is_substantive(&file.path)) {
            debug!(category = category.as_str(), "filtered commit without substantive files");
            false
        } else {
            true
        };

        ClassifiedCommit {
            record: record.clone(),
            meaningful,
            category,
        }
    }

    pub fn classify_all(&self, records: &[CommitRecord]) -> Vec<ClassifiedCommit> {
        records.iter().map(|record| self.classify(record)).collect()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

pub fn categorize(subject: &str) -> CommitCategory {
    if let Some(category) = CONVENTIONAL_PREFIX
        .captures(subject)
        .and_then(|caps| caps.get(1))
        .and_then(|kind| CommitCategory::from_conventional_type(kind.as_str()))
    {
        return category;
    }

    let first_word = subject
        .split(|c: char| !c.is_ascii_alphanumeric())
        .find(|word| !word.is_empty())
        .unwrap_or("")
        .to_lowercase();
    KEYWORD_CATEGORIES
        .iter()
        .find(|(keyword, _)| *keyword == first_word)
        .map(|(_, category)| *category)
        .unwrap_or(CommitCategory::Other)
}

pub fn is_substantive(path: &str) -> bool {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return false;
    }
    let filename = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    !LOCKFILE_NAMES.contains(&filename)
}
