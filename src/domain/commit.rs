use chrono::NaiveDate;

/// A single file touched by a commit, as reported by `--numstat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub insertions: usize,
    pub deletions: usize,
}

impl FileChange {
    pub fn new(path: impl Into<String>, insertions: usize, deletions: usize) -> Self {
        Self {
            path: path.into(),
            insertions,
            deletions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub author_name: String,
    pub author_email: String,
    pub date: NaiveDate,
    pub subject: String,
    pub files: Vec<FileChange>,
}

impl CommitRecord {
    pub fn insertions(&self) -> usize {
        self.files.iter().map(|file| file.insertions).sum()
    }

    pub fn deletions(&self) -> usize {
        self.files.iter().map(|file| file.deletions).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitCategory {
    Feature,
    Fix,
    Performance,
    Refactor,
    Test,
    Docs,
    Chore,
    Other,
}

impl CommitCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitCategory::Feature => "feature",
            CommitCategory::Fix => "fix",
            CommitCategory::Performance => "performance",
            CommitCategory::Refactor => "refactor",
            CommitCategory::Test => "test",
            CommitCategory::Docs => "docs",
            CommitCategory::Chore => "chore",
            CommitCategory::Other => "other",
        }
    }

    /// Maps a conventional-commit type (`feat`, `fix`, ...) to a category.
    pub fn from_conventional_type(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "feat" | "feature" => Some(CommitCategory::Feature),
            "fix" | "bugfix" | "hotfix" => Some(CommitCategory::Fix),
            "perf" => Some(CommitCategory::Performance),
            "refactor" => Some(CommitCategory::Refactor),
            "test" | "tests" => Some(CommitCategory::Test),
            "docs" | "doc" => Some(CommitCategory::Docs),
            "chore" | "build" | "ci" | "style" => Some(CommitCategory::Chore),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassifiedCommit {
    pub record: CommitRecord,
    pub meaningful: bool,
    pub category: CommitCategory,
}
