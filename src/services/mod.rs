pub mod commit_source;

pub use commit_source::{CommitQuery, CommitSource};
