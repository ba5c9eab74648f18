pub mod aggregate;
pub mod classify;
pub mod tech;

pub use aggregate::{Aggregates, aggregate};
pub use classify::Classifier;
