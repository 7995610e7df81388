//! File discovery and parallel normalization checks

pub mod executor;
pub mod file_walker;

pub use executor::{CheckEngine, CheckResult, Finding, check_text};
pub use file_walker::{FileEntry, FileWalker, FileWalkerError};
