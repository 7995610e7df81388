//! CLI argument parsing and command dispatch

pub mod args;
pub mod check;
pub(crate) mod common;
pub mod init;
pub mod list;
pub mod normalize;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, OutputFormat};
pub use common::{EXIT_ERROR, EXIT_NOT_NORMALIZED, EXIT_PARSE_ERROR, EXIT_SUCCESS, GlobalOptions};
