//! Phrase tables keyed by commit category and area kind.
//!
//! Placeholders: `{area}`, `{count}`, `{commits}` (pluralized noun).

use crate::analysis::aggregate::ROOT_AREA;
use crate::domain::commit::CommitCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaKind {
    UserInterface,
    Service,
    Infrastructure,
    Data,
    Mobile,
    Testing,
    Documentation,
    RepositoryWide,
    General,
}

const AREA_KEYWORDS: &[(&str, AreaKind)] = &[
    ("frontend", AreaKind::UserInterface),
    ("front-end", AreaKind::UserInterface),
    ("web", AreaKind::UserInterface),
    ("ui", AreaKind::UserInterface),
    ("client", AreaKind::UserInterface),
    ("components", AreaKind::UserInterface),
    ("backend", AreaKind::Service),
    ("back-end", AreaKind::Service),
    ("server", AreaKind::Service),
    ("api", AreaKind::Service),
    ("services", AreaKind::Service),
    ("infra", AreaKind::Infrastructure),
    ("infrastructure", AreaKind::Infrastructure),
    ("deploy", AreaKind::Infrastructure),
    ("ops", AreaKind::Infrastructure),
    ("terraform", AreaKind::Infrastructure),
    ("k8s", AreaKind::Infrastructure),
    ("helm", AreaKind::Infrastructure),
    (".github", AreaKind::Infrastructure),
    ("ci", AreaKind::Infrastructure),
    ("db", AreaKind::Data),
    ("data", AreaKind::Data),
    ("migrations", AreaKind::Data),
    ("schema", AreaKind::Data),
    ("ios", AreaKind::Mobile),
    ("android", AreaKind::Mobile),
    ("mobile", AreaKind::Mobile),
    ("test", AreaKind::Testing),
    ("tests", AreaKind::Testing),
    ("e2e", AreaKind::Testing),
    ("docs", AreaKind::Documentation),
    ("doc", AreaKind::Documentation),
];

impl AreaKind {
    pub fn for_area(area: &str) -> Self {
        if area == ROOT_AREA {
            return AreaKind::RepositoryWide;
        }
        let area = area.to_lowercase();
        AREA_KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == area)
            .map(|(_, kind)| *kind)
            .unwrap_or(AreaKind::General)
    }
}

pub struct PhraseSet {
    pub highlight: &'static str,
    pub outcome: &'static str,
    pub business: &'static str,
}

const AREA_PHRASES: &[(AreaKind, PhraseSet)] = &[
    (
        AreaKind::UserInterface,
        PhraseSet {
            highlight: "Built and refined user-facing functionality in the {area} layer across {count} {commits}.",
            outcome: "Users benefit from a smoother, more consistent interface.",
            business: "A polished product experience supports adoption and retention.",
        },
    ),
    (
        AreaKind::Service,
        PhraseSet {
            highlight: "Extended service-side capabilities in the {area} layer across {count} {commits}.",
            outcome: "Users get dependable data and behavior behind every workflow.",
            business: "A solid service foundation lets the product scale with demand.",
        },
    ),
    (
        AreaKind::Infrastructure,
        PhraseSet {
            highlight: "Strengthened delivery and runtime infrastructure ({area}) across {count} {commits}.",
            outcome: "Users see steadier availability and faster rollout of improvements.",
            business: "Automated, reliable delivery lowers operational cost and release risk.",
        },
    ),
    (
        AreaKind::Data,
        PhraseSet {
            highlight: "Evolved data models and storage in the {area} area across {count} {commits}.",
            outcome: "Users can rely on accurate, consistent information.",
            business: "Trustworthy data underpins reporting and informed decisions.",
        },
    ),
    (
        AreaKind::Mobile,
        PhraseSet {
            highlight: "Advanced the {area} mobile experience across {count} {commits}.",
            outcome: "Users on mobile devices enjoy a more capable app.",
            business: "Mobile reach extends the product to more customers.",
        },
    ),
    (
        AreaKind::Testing,
        PhraseSet {
            highlight: "Expanded automated test coverage in {area} across {count} {commits}.",
            outcome: "Users encounter fewer regressions between releases.",
            business: "Broader test coverage lets the team ship changes with confidence.",
        },
    ),
    (
        AreaKind::Documentation,
        PhraseSet {
            highlight: "Improved technical documentation in {area} across {count} {commits}.",
            outcome: "Users and integrators find answers faster.",
            business: "Clear documentation shortens onboarding for customers and engineers.",
        },
    ),
    (
        AreaKind::RepositoryWide,
        PhraseSet {
            highlight: "Maintained repository-wide configuration and tooling across {count} {commits}.",
            outcome: "Users benefit from a consistently built and configured product.",
            business: "Shared configuration keeps every part of the project aligned.",
        },
    ),
    (
        AreaKind::General,
        PhraseSet {
            highlight: "Concentrated development effort on the {area} area across {count} {commits}.",
            outcome: "Users benefit from steady improvements to core functionality.",
            business: "Focused investment in core components keeps the product competitive.",
        },
    ),
];

const CATEGORY_PHRASES: &[(CommitCategory, PhraseSet)] = &[
    (
        CommitCategory::Feature,
        PhraseSet {
            highlight: "Shipped {count} feature {commits} introducing new capabilities.",
            outcome: "Users gained access to new capabilities and workflows.",
            business: "New functionality widens the product's value proposition.",
        },
    ),
    (
        CommitCategory::Fix,
        PhraseSet {
            highlight: "Resolved defects through {count} targeted fix {commits}, improving reliability.",
            outcome: "Users experience fewer errors and more predictable behavior.",
            business: "Higher reliability reduces support load and protects customer trust.",
        },
    ),
    (
        CommitCategory::Performance,
        PhraseSet {
            highlight: "Improved performance through {count} optimization {commits}.",
            outcome: "Users see faster responses and lighter resource usage.",
            business: "Efficiency gains lower infrastructure cost per user.",
        },
    ),
    (
        CommitCategory::Refactor,
        PhraseSet {
            highlight: "Reduced technical debt through {count} refactoring {commits}.",
            outcome: "Users benefit from a more stable codebase behind the product.",
            business: "A maintainable codebase accelerates future feature delivery.",
        },
    ),
    (
        CommitCategory::Test,
        PhraseSet {
            highlight: "Raised quality gates with {count} testing {commits}.",
            outcome: "Users encounter fewer regressions between releases.",
            business: "Automated verification lowers the cost of change.",
        },
    ),
    (
        CommitCategory::Docs,
        PhraseSet {
            highlight: "Clarified behavior and usage through {count} documentation {commits}.",
            outcome: "Users and integrators find answers faster.",
            business: "Clear documentation shortens onboarding.",
        },
    ),
    (
        CommitCategory::Chore,
        PhraseSet {
            highlight: "Kept tooling and build pipelines healthy with {count} maintenance {commits}.",
            outcome: "Users receive updates through a dependable release process.",
            business: "Healthy tooling keeps delivery predictable.",
        },
    ),
    (
        CommitCategory::Other,
        PhraseSet {
            highlight: "Contributed {count} further {commits} improving existing functionality.",
            outcome: "Users benefit from continuous incremental improvements.",
            business: "Steady iteration keeps the product aligned with customer needs.",
        },
    ),
];

pub fn area_phrases(kind: AreaKind) -> &'static PhraseSet {
    AREA_PHRASES
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .map(|(_, phrases)| phrases)
        .unwrap_or(&AREA_PHRASES[AREA_PHRASES.len() - 1].1)
}

pub fn category_phrases(category: CommitCategory) -> &'static PhraseSet {
    CATEGORY_PHRASES
        .iter()
        .find(|(candidate, _)| *candidate == category)
        .map(|(_, phrases)| phrases)
        .unwrap_or(&CATEGORY_PHRASES[CATEGORY_PHRASES.len() - 1].1)
}

pub fn fill(template: &str, area: &str, count: usize) -> String {
    template
        .replace("{area}", area)
        .replace("{count}", &count.to_string())
        .replace("{commits}", pluralize(count, "commit"))
}

pub fn pluralize(count: usize, singular: &'static str) -> &'static str {
    match (count, singular) {
        (1, _) => singular,
        (_, "commit") => "commits",
        (_, "file") => "files",
        (_, "area") => "areas",
        (_, "line") => "lines",
        (_, other) => other,
    }
}
