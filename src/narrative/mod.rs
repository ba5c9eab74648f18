//! Narrative text built from aggregates.
//!
//! Only counts, category labels, area names and technology names reach this
//! module; commit subjects, hashes and paths never do.

pub mod templates;

use crate::analysis::Aggregates;
use crate::domain::commit::CommitCategory;
use crate::domain::range::TimeRange;
use crate::domain::report::Narrative;

use self::templates::{AreaKind, area_phrases, category_phrases, fill, pluralize};

pub const MIN_HIGHLIGHTS: usize = 4;
pub const MAX_HIGHLIGHTS: usize = 6;
const MAX_SECONDARY: usize = 3;

pub struct Profile<'a> {
    pub role: &'a str,
    pub company: &'a str,
}

pub fn compose(profile: &Profile<'_>, range: &TimeRange, aggregates: &Aggregates) -> Narrative {
    if aggregates.meaningful_commits == 0 {
        return Narrative {
            guidance: Some(guidance(range, aggregates.raw_commits)),
            ..Narrative::default()
        };
    }

    Narrative {
        summary: summary(profile, range, aggregates),
        feature_highlights: highlights(range, aggregates),
        end_user_outcomes: secondary(aggregates, |phrases| phrases.outcome),
        business_relevance: secondary(aggregates, |phrases| phrases.business),
        guidance: None,
    }
}

fn summary(profile: &Profile<'_>, range: &TimeRange, aggregates: &Aggregates) -> String {
    let count = aggregates.meaningful_commits;
    let verb = if count == 1 { "was" } else { "were" };
    let focus = match (aggregates.focus_area(), aggregates.top_tech()) {
        (Some(area), Some(tech)) => format!("with notable focus on {area} and {tech}"),
        (Some(area), None) => format!("with notable focus on the {area} area"),
        (None, Some(tech)) => format!("with notable focus on {tech}"),
        (None, None) => "spanning multiple parts of the codebase".to_string(),
    };
    format!(
        "As {} at {}, {count} meaningful {} {verb} delivered {}, {focus}.",
        profile.role.trim(),
        profile.company.trim(),
        pluralize(count, "commit"),
        range.label()
    )
}

fn highlights(range: &TimeRange, aggregates: &Aggregates) -> Vec<String> {
    let areas = aggregates.areas.top(2);
    let categories = ranked_categories(aggregates);
    let mut lines = Vec::new();

    lines.push(format!(
        "Delivered {} meaningful {} touching {} {} across {} project {}.",
        aggregates.meaningful_commits,
        pluralize(aggregates.meaningful_commits, "commit"),
        aggregates.unique_files,
        pluralize(aggregates.unique_files, "file"),
        aggregates.areas.len(),
        pluralize(aggregates.areas.len(), "area"),
    ));

    let area_line = |(area, count): &(String, usize)| {
        fill(area_phrases(AreaKind::for_area(area)).highlight, area, *count)
    };
    let category_line = |(category, count): &(CommitCategory, usize)| {
        fill(category_phrases(*category).highlight, "", *count)
    };

    if let Some(first) = areas.first() {
        lines.push(area_line(first));
    }
    if let Some(first) = categories.first() {
        lines.push(category_line(first));
    }
    let techs = aggregates.techs.top(3);
    if !techs.is_empty() {
        let names: Vec<String> = techs.into_iter().map(|(name, _)| name).collect();
        lines.push(format!("Worked across a stack including {}.", join_names(&names)));
    }
    if let Some(second) = areas.get(1) {
        lines.push(area_line(second));
    }
    if let Some(second) = categories.get(1) {
        lines.push(category_line(second));
    }
    if aggregates.insertions > 0 || aggregates.deletions > 0 {
        lines.push(format!(
            "Drove code evolution of roughly {} added and {} removed {}.",
            aggregates.insertions,
            aggregates.deletions,
            pluralize(aggregates.deletions, "line"),
        ));
    }
    if lines.len() < MIN_HIGHLIGHTS {
        lines.push(format!(
            "Maintained a steady cadence of contributions {}.",
            range.label()
        ));
    }
    while lines.len() < MIN_HIGHLIGHTS {
        lines.push("Collaborated on changes that kept the codebase healthy and shippable.".to_string());
    }

    lines.truncate(MAX_HIGHLIGHTS);
    lines
}

/// Categories ranked by count; `Other` only leads when nothing else exists.
fn ranked_categories(aggregates: &Aggregates) -> Vec<(CommitCategory, usize)> {
    let ranked = aggregates.categories.ranked();
    let (named, other): (Vec<_>, Vec<_>) = ranked
        .into_iter()
        .partition(|(category, _)| *category != CommitCategory::Other);
    named.into_iter().chain(other).collect()
}

fn secondary<F>(aggregates: &Aggregates, pick: F) -> Vec<String>
where
    F: Fn(&templates::PhraseSet) -> &'static str,
{
    let mut lines: Vec<String> = Vec::new();
    let from_categories = ranked_categories(aggregates)
        .into_iter()
        .take(2)
        .map(|(category, _)| pick(category_phrases(category)));
    let from_areas = aggregates
        .areas
        .top(2)
        .into_iter()
        .map(|(area, _)| pick(area_phrases(AreaKind::for_area(&area))));

    for phrase in from_categories.chain(from_areas) {
        if lines.len() == MAX_SECONDARY {
            break;
        }
        if !lines.iter().any(|line| line == phrase) {
            lines.push(phrase.to_string());
        }
    }
    lines
}

fn guidance(range: &TimeRange, raw_commits: usize) -> String {
    if raw_commits == 0 {
        format!(
            "No commits matched the author filter {}. Widen the date range or verify the author filter.",
            range.label()
        )
    } else {
        format!(
            "{raw_commits} {} found {} but all were filtered as low-signal. Widen the date range, check the author filter, or relax the noise patterns.",
            if raw_commits == 1 { "commit was" } else { "commits were" },
            range.label()
        )
    }
}

fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}
