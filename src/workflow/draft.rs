use tracing::{debug, info};

use crate::analysis::aggregate;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::commit::CommitRecord;
use crate::domain::report::{AreaEntry, RunResult, RunStats, SOURCE_MODE, TechEntry};
use crate::error::AppResult;
use crate::narrative::{self, Profile};

const MAX_TALLY_ENTRIES: usize = 10;

pub async fn draft_experience(ctx: &AppContext) -> AppResult<RunResult> {
    let query = ctx.config.commit_query()?;
    let records = ctx.commit_source.fetch_commits(&query).await?;
    info!(commits = records.len(), "fetched commit history");
    Ok(summarize(&ctx.config, &records))
}

/// Classifies, aggregates and narrates `records` (newest first).
pub fn summarize(config: &AppConfig, records: &[CommitRecord]) -> RunResult {
    let classified = config.classifier.classify_all(records);
    let aggregates = aggregate(&classified);
    debug!(
        raw = aggregates.raw_commits,
        meaningful = aggregates.meaningful_commits,
        areas = aggregates.areas.len(),
        "aggregated commits"
    );

    let profile = Profile {
        role: &config.role,
        company: &config.company,
    };
    let narrative = narrative::compose(&profile, &config.range, &aggregates);

    RunResult {
        role: config.role.clone(),
        company: config.company.clone(),
        time_range: (&config.range).into(),
        stats: RunStats {
            raw_commits: aggregates.raw_commits,
            meaningful_commits: aggregates.meaningful_commits,
            unique_files_touched: aggregates.unique_files,
            areas_touched: aggregates.areas.len(),
            insertions: aggregates.insertions,
            deletions: aggregates.deletions,
        },
        summary: narrative.summary,
        feature_highlights: narrative.feature_highlights,
        end_user_outcomes: narrative.end_user_outcomes,
        business_relevance: narrative.business_relevance,
        areas: aggregates
            .areas
            .top(MAX_TALLY_ENTRIES)
            .into_iter()
            .map(|(name, commits)| AreaEntry { name, commits })
            .collect(),
        tech_signals: aggregates
            .techs
            .top(MAX_TALLY_ENTRIES)
            .into_iter()
            .map(|(name, files)| TechEntry { name, files })
            .collect(),
        source_mode: SOURCE_MODE,
        guidance: narrative.guidance,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use similar_asserts::assert_eq;

    use super::*;
    use crate::config::{DraftOptions, StoredConfig};
    use crate::domain::commit::FileChange;
    use crate::error::AppError;
    use crate::narrative::{MAX_HIGHLIGHTS, MIN_HIGHLIGHTS};
    use crate::output::to_json;
    use crate::services::{CommitQuery, CommitSource};

    struct CannedSource {
        commits: Vec<CommitRecord>,
        user: Option<String>,
        queries: Mutex<Vec<CommitQuery>>,
    }

    impl CannedSource {
        fn new(commits: Vec<CommitRecord>) -> Self {
            Self {
                commits,
                user: Some("Jane Dev".to_string()),
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CommitSource for CannedSource {
        async fn fetch_commits(&self, query: &CommitQuery) -> AppResult<Vec<CommitRecord>> {
            self.queries.lock().unwrap().push(query.clone());
            Ok(self.commits.clone())
        }

        async fn current_user(&self) -> AppResult<Option<String>> {
            Ok(self.user.clone())
        }
    }

    fn commit(index: usize, subject: &str, files: &[&str]) -> CommitRecord {
        CommitRecord {
            hash: format!("{index:02}c0ffee{index:02}deadbeef0123456789abcdef0123456"),
            author_name: "Jane Dev".to_string(),
            author_email: "jane@example.com".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap() - chrono::Days::new(index as u64 * 7),
            subject: subject.to_string(),
            files: files
                .iter()
                .map(|path| FileChange::new(*path, 20, 5))
                .collect(),
        }
    }

    fn synthetic_history() -> Vec<CommitRecord> {
        let entries: &[(&str, &[&str])] = &[
            ("feat: add dashboard filters", &["frontend/src/filters.tsx", "frontend/src/api.ts"]),
            ("Merge branch 'main' into checkout", &[]),
            ("feat: implement checkout flow", &["frontend/src/checkout.tsx", "backend/orders/service.rs"]),
            ("Bump react from 18.2.0 to 18.3.1", &["frontend/package-lock.json"]),
            ("feat(api): expose order history", &["backend/orders/history.rs"]),
            ("fix: prevent double submit", &["frontend/src/checkout.tsx"]),
            ("chore(deps): update serde", &["Cargo.lock"]),
            ("feat: support dark mode", &["frontend/src/theme.css"]),
            ("Fix typo in footer", &["frontend/src/footer.tsx"]),
            ("feat: add audit logging", &["backend/audit/log.rs", "infra/terraform/logging.tf"]),
            ("fix: handle expired sessions", &["backend/auth/session.rs"]),
            ("Formatting", &["backend/auth/session.rs"]),
            ("fix(ui): align mobile layout", &["frontend/src/layout.css"]),
            ("style: rustfmt", &["backend/orders/service.rs"]),
            ("fix: retry deploy healthcheck", &["infra/docker/Dockerfile"]),
            ("wip: spike on caching", &["backend/cache/mod.rs"]),
            ("Improve search relevance", &["backend/search/rank.rs"]),
            ("docs: update README", &["README.md"]),
            ("Polish onboarding copy", &["frontend/src/onboarding.tsx"]),
            ("lint: fix warnings", &["frontend/src/table.tsx"]),
            ("Streamline settings page", &["frontend/src/settings.tsx"]),
            ("v1.2.0", &["package.json"]),
            ("Tune table rendering", &["frontend/src/table.tsx"]),
            ("Merge pull request #42 from acme/feature", &[]),
        ];
        entries
            .iter()
            .enumerate()
            .map(|(index, (subject, files))| commit(index, subject, files))
            .collect()
    }

    fn config(since: Option<&str>, until: Option<&str>) -> AppConfig {
        let mut config = AppConfig::load(
            DraftOptions {
                repo: PathBuf::from("."),
                role: "Software Engineer".to_string(),
                company: "Acme".to_string(),
                since: since.map(str::to_string),
                until: until.map(str::to_string),
                ..DraftOptions::default()
            },
            StoredConfig::default(),
        )
        .unwrap();
        config.author = Some("Jane Dev".to_string());
        config
    }

    fn narrative_lines(result: &RunResult) -> impl Iterator<Item = &str> {
        std::iter::once(result.summary.as_str())
            .chain(result.feature_highlights.iter().map(String::as_str))
            .chain(result.end_user_outcomes.iter().map(String::as_str))
            .chain(result.business_relevance.iter().map(String::as_str))
    }

    fn assert_redacted(result: &RunResult, records: &[CommitRecord]) {
        for line in narrative_lines(result) {
            assert!(!line.contains('/') && !line.contains('\\'), "path separator in: {line}");
            for record in records {
                assert!(!line.contains(&record.hash[..7]), "hash in: {line}");
                let body = record
                    .subject
                    .split_once(": ")
                    .map(|(_, rest)| rest)
                    .unwrap_or(&record.subject);
                if body.split_whitespace().count() > 2 {
                    assert!(!line.contains(body), "subject leaked into: {line}");
                }
            }
        }
    }

    #[tokio::test]
    async fn synthetic_history_end_to_end() {
        let source = Arc::new(CannedSource::new(synthetic_history()));
        let ctx = AppContext::new(
            config(Some("2025-06-01"), Some("2025-12-31")),
            source.clone(),
        );

        let result = draft_experience(&ctx).await.unwrap();

        assert_eq!(result.stats.raw_commits, 24);
        assert_eq!(result.stats.meaningful_commits, 13);
        assert_eq!(result.areas[0], AreaEntry { name: "frontend".to_string(), commits: 8 });
        assert_eq!(result.areas[1], AreaEntry { name: "backend".to_string(), commits: 5 });
        assert_eq!(result.areas[2], AreaEntry { name: "infra".to_string(), commits: 2 });
        assert!(!result.summary.is_empty());
        assert!(result.summary.contains("frontend"));
        assert!(result.feature_highlights.len() >= MIN_HIGHLIGHTS);
        assert!(result.feature_highlights.len() <= MAX_HIGHLIGHTS);
        assert!(result.guidance.is_none());
        assert_eq!(result.time_range.mode, "bounded");
        assert_redacted(&result, &synthetic_history());

        let queries = source.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].author, "Jane Dev");
        assert_eq!(queries[0].max_commits, 400);
    }

    #[tokio::test]
    async fn empty_history_reports_guidance() {
        let ctx = AppContext::new(config(None, None), Arc::new(CannedSource::new(Vec::new())));
        let result = draft_experience(&ctx).await.unwrap();

        assert_eq!(result.stats.raw_commits, 0);
        assert!(result.feature_highlights.is_empty());
        assert!(result.summary.is_empty());
        assert!(!result.guidance.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn unresolved_author_is_rejected() {
        let mut config = config(None, None);
        config.author = None;
        let ctx = AppContext::new(config, Arc::new(CannedSource::new(synthetic_history())));
        assert!(matches!(
            draft_experience(&ctx).await,
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn resolves_author_from_source() {
        let mut config = config(None, None);
        config.author = None;
        let source = CannedSource::new(Vec::new());
        config.resolve_author(&source).await.unwrap();
        assert_eq!(config.author.as_deref(), Some("Jane Dev"));

        let mut config = self::config(None, None);
        config.author = None;
        let anonymous = CannedSource {
            user: None,
            ..CannedSource::new(Vec::new())
        };
        assert!(matches!(
            config.resolve_author(&anonymous).await,
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn all_noise_history_reports_filtered_guidance() {
        let records = vec![
            commit(0, "Merge branch 'main'", &[]),
            commit(1, "Fix typo", &["web/a.ts"]),
        ];
        let result = summarize(&config(None, None), &records);
        assert_eq!(result.stats.raw_commits, 2);
        assert_eq!(result.stats.meaningful_commits, 0);
        assert!(result.guidance.unwrap().contains("filtered as low-signal"));
    }

    #[test]
    fn output_is_deterministic() {
        let config = config(Some("2025-06-01"), Some("2025-12-31"));
        let first = to_json(&summarize(&config, &synthetic_history())).unwrap();
        let second = to_json(&summarize(&config, &synthetic_history())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn equal_count_ties_follow_recency() {
        let records = vec![
            commit(0, "feat: add billing export", &["billing/export.go"]),
            commit(1, "feat: add report scheduler", &["reports/scheduler.py"]),
        ];
        let result = summarize(&config(None, None), &records);
        assert_eq!(result.areas[0].name, "billing");
        assert_eq!(result.tech_signals[0].name, "Go");
    }

    const SUBJECTS: &[&str] = &[
        "feat: add invoice export pipeline",
        "fix: repair token refresh race",
        "Refactor payment gateway adapter",
        "Improve onboarding wizard layout",
        "Merge branch 'develop'",
        "Bump axios from 1.0.0 to 1.1.0",
        "fix typo in banner",
        "formatting",
        "",
    ];

    const PATHS: &[&str] = &[
        "frontend/src/app.tsx",
        "backend/api/routes.rs",
        "infra/main.tf",
        "scripts/deploy.sh",
        "README.md",
        "Cargo.lock",
        "assets/logo.png",
    ];

    fn record_strategy() -> impl Strategy<Value = CommitRecord> {
        (
            any::<u32>(),
            0..SUBJECTS.len(),
            proptest::collection::vec(0..PATHS.len(), 0..4),
        )
            .prop_map(|(seed, subject, files)| CommitRecord {
                hash: format!("{seed:08x}abcdef0123456789abcdef0123456789"),
                author_name: "Dev".to_string(),
                author_email: "dev@example.com".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                subject: SUBJECTS[subject].to_string(),
                files: files
                    .into_iter()
                    .map(|path| FileChange::new(PATHS[path], 3, 1))
                    .collect(),
            })
    }

    proptest! {
        #[test]
        fn narrative_invariants_hold(records in proptest::collection::vec(record_strategy(), 0..30)) {
            let result = summarize(&config(None, None), &records);

            prop_assert!(result.stats.meaningful_commits <= result.stats.raw_commits);
            if result.stats.meaningful_commits == 0 {
                prop_assert!(result.guidance.as_deref().is_some_and(|text| !text.is_empty()));
                prop_assert!(result.feature_highlights.is_empty());
            } else {
                prop_assert!(result.guidance.is_none());
                prop_assert!(result.feature_highlights.len() >= MIN_HIGHLIGHTS);
                prop_assert!(result.feature_highlights.len() <= MAX_HIGHLIGHTS);
            }
            assert_redacted(&result, &records);
        }
    }
}
