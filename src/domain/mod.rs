pub mod commit;
pub mod range;
pub mod report;
