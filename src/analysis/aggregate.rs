//! Aggregate statistics over the meaningful commit set.

use std::collections::{HashMap, HashSet};

use crate::analysis::classify::is_substantive;
use crate::analysis::tech::tech_for_path;
use crate::domain::commit::{ClassifiedCommit, CommitCategory};

pub const ROOT_AREA: &str = "root";

/// Counter that ranks by count, breaking ties by first insertion.
#[derive(Debug, Clone)]
pub struct Tally<K> {
    entries: Vec<(K, usize)>,
    index: HashMap<K, usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + std::hash::Hash> Tally<K> {
    pub fn add(&mut self, key: K, amount: usize) {
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 += amount,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, amount));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn ranked(&self) -> Vec<(K, usize)> {
        let mut ranked = self.entries.clone();
        // Stable sort keeps first-seen order among equal counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    pub fn top(&self, limit: usize) -> Vec<(K, usize)> {
        let mut ranked = self.ranked();
        ranked.truncate(limit);
        ranked
    }
}

#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub raw_commits: usize,
    pub meaningful_commits: usize,
    pub unique_files: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub areas: Tally<String>,
    pub techs: Tally<String>,
    pub categories: Tally<CommitCategory>,
}

impl Aggregates {
    /// Highest-ranked area, skipping files at the repository root.
    pub fn focus_area(&self) -> Option<String> {
        self.areas
            .ranked()
            .into_iter()
            .map(|(name, _)| name)
            .find(|name| name != ROOT_AREA)
    }

    pub fn top_tech(&self) -> Option<String> {
        self.techs.top(1).into_iter().next().map(|(name, _)| name)
    }
}

/// Expects `commits` newest first, as returned by the commit source.
pub fn aggregate(commits: &[ClassifiedCommit]) -> Aggregates {
    let mut aggregates = Aggregates {
        raw_commits: commits.len(),
        ..Aggregates::default()
    };
    let mut files: HashSet<&str> = HashSet::new();

    for commit in commits.iter().filter(|commit| commit.meaningful) {
        aggregates.meaningful_commits += 1;
        aggregates.insertions += commit.record.insertions();
        aggregates.deletions += commit.record.deletions();
        aggregates.categories.add(commit.category, 1);

        let mut commit_areas: Vec<String> = Vec::new();
        for file in commit
            .record
            .files
            .iter()
            .filter(|file| is_substantive(&file.path))
        {
            files.insert(file.path.as_str());
            let area = area_for_path(&file.path);
            if !commit_areas.contains(&area) {
                commit_areas.push(area);
            }
            if let Some(tech) = tech_for_path(&file.path) {
                aggregates.techs.add(tech.to_string(), 1);
            }
        }
        for area in commit_areas {
            aggregates.areas.add(area, 1);
        }
    }

    aggregates.unique_files = files.len();
    aggregates
}

pub fn area_for_path(path: &str) -> String {
    let normalized = path.trim().replace('\\', "/");
    let normalized = normalized.trim_start_matches("./").trim_start_matches('/');
    match normalized.split_once('/') {
        Some((top, _)) if !top.is_empty() && top != "." => top.to_string(),
        _ => ROOT_AREA.to_string(),
    }
}
