use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::report::RunResult;
use crate::error::{AppError, AppResult};

pub fn to_json(result: &RunResult) -> AppResult<String> {
    serde_json::to_string_pretty(result)
        .map_err(|err| AppError::OutputWrite(format!("failed to serialize result: {err}")))
}

pub fn render_markdown(result: &RunResult) -> String {
    let mut lines = vec![
        "# LinkedIn Experience Draft".to_string(),
        String::new(),
        format!("## {} at {}", result.role, result.company),
        String::new(),
        format!("- Role: {}", result.role),
        format!("- Company: {}", result.company),
        format!("- Time mode: {}", result.time_range.mode),
    ];
    if let Some(since) = &result.time_range.since {
        lines.push(format!("- Since: {since}"));
    }
    if let Some(until) = &result.time_range.until {
        lines.push(format!("- Until: {until}"));
    }

    lines.extend(["".to_string(), "## Summary".to_string(), String::new()]);
    if result.summary.is_empty() {
        lines.push("_No summary available._".to_string());
    } else {
        lines.push(result.summary.clone());
    }

    lines.extend(["".to_string(), "## Highlights".to_string(), String::new()]);
    if result.feature_highlights.is_empty() {
        lines.push("- No meaningful commit highlights were detected.".to_string());
    } else {
        lines.extend(result.feature_highlights.iter().map(|item| format!("- {item}")));
    }

    push_section(&mut lines, "End-user outcomes", &result.end_user_outcomes);
    push_section(&mut lines, "Business relevance", &result.business_relevance);

    if let Some(guidance) = &result.guidance {
        lines.extend(["".to_string(), "## Guidance".to_string(), String::new()]);
        lines.push(guidance.clone());
    }

    let mut document = lines.join("\n");
    document.push('\n');
    document
}

fn push_section(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.extend([String::new(), format!("## {title}"), String::new()]);
    lines.extend(items.iter().map(|item| format!("- {item}")));
}

/// Writes the markdown draft, creating parent directories as needed.
pub fn write_markdown(path: &Path, result: &RunResult) -> AppResult<()> {
    let describe = |err: std::io::Error| {
        AppError::OutputWrite(format!("{}: {err}", path.display()))
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(describe)?;
    }
    fs::write(path, render_markdown(result)).map_err(describe)?;
    debug!(path = %path.display(), "wrote markdown draft");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::range::TimeRange;
    use crate::domain::report::{AreaEntry, RunStats, SOURCE_MODE, TechEntry};

    fn sample(guidance: Option<&str>) -> RunResult {
        let range = TimeRange::parse(Some("2025-06-01"), Some("2025-12-31")).unwrap();
        let empty = guidance.is_some();
        RunResult {
            role: "Software Engineer".to_string(),
            company: "Acme".to_string(),
            time_range: (&range).into(),
            stats: RunStats {
                raw_commits: 4,
                meaningful_commits: if empty { 0 } else { 3 },
                ..RunStats::default()
            },
            summary: if empty {
                String::new()
            } else {
                "As Software Engineer at Acme, 3 meaningful commits were delivered.".to_string()
            },
            feature_highlights: if empty {
                Vec::new()
            } else {
                vec!["Shipped 3 feature commits introducing new capabilities.".to_string()]
            },
            end_user_outcomes: Vec::new(),
            business_relevance: vec!["New functionality widens the product's value proposition.".to_string()],
            areas: vec![AreaEntry {
                name: "frontend".to_string(),
                commits: 3,
            }],
            tech_signals: vec![TechEntry {
                name: "TypeScript".to_string(),
                files: 5,
            }],
            source_mode: SOURCE_MODE,
            guidance: guidance.map(str::to_string),
        }
    }

    #[test]
    fn json_has_stable_field_order() {
        let json = to_json(&sample(None)).unwrap();
        let keys = [
            "\"role\"",
            "\"company\"",
            "\"time_range\"",
            "\"stats\"",
            "\"summary\"",
            "\"feature_highlights\"",
            "\"end_user_outcomes\"",
            "\"business_relevance\"",
            "\"areas\"",
            "\"tech_signals\"",
            "\"source_mode\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|key| json.find(key).unwrap()).collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(!json.contains("\"guidance\""));
        assert!(json.contains("\"mode\": \"bounded\""));
    }

    #[test]
    fn json_includes_guidance_when_present() {
        let json = to_json(&sample(Some("Widen the date range."))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["guidance"], "Widen the date range.");
        assert_eq!(value["stats"]["meaningful_commits"], 0);
    }

    #[test]
    fn all_time_range_omits_bounds() {
        let mut result = sample(None);
        result.time_range = (&TimeRange::default()).into();
        let value: serde_json::Value = serde_json::from_str(&to_json(&result).unwrap()).unwrap();
        assert_eq!(value["time_range"], serde_json::json!({ "mode": "all-time" }));
    }

    #[test]
    fn markdown_contains_heading_summary_and_bullets() {
        let markdown = render_markdown(&sample(None));
        assert!(markdown.contains("## Software Engineer at Acme"));
        assert!(markdown.contains("## Summary\n\nAs Software Engineer at Acme"));
        assert!(markdown.contains("- Shipped 3 feature commits"));
        assert!(markdown.contains("## Business relevance"));
        assert!(!markdown.contains("## End-user outcomes"));
        assert!(!markdown.contains("## Guidance"));
    }

    #[test]
    fn markdown_renders_guidance_for_empty_runs() {
        let markdown = render_markdown(&sample(Some("Widen the date range.")));
        assert!(markdown.contains("- No meaningful commit highlights were detected."));
        assert!(markdown.contains("## Guidance\n\nWiden the date range."));
    }

    #[test]
    fn writes_markdown_into_new_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drafts").join("acme.md");
        write_markdown(&path, &sample(None)).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_markdown(&sample(None)));
    }

    #[test]
    fn unwritable_path_is_output_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let err = write_markdown(&blocker.join("draft.md"), &sample(None)).unwrap_err();
        assert!(matches!(err, AppError::OutputWrite(_)));
    }
}
