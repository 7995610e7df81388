//! Check command implementation
//!
//! This module implements the `kanafold check` command, which:
//! - Loads configuration from kanafold.toml
//! - Discovers files to check
//! - Normalizes every file in parallel and compares
//! - Formats output (human or JSONL)
//! - Returns appropriate exit code

use crate::cli::args::OutputFormat;
use crate::cli::common::{
    self, EXIT_ERROR, EXIT_NOT_NORMALIZED, EXIT_PARSE_ERROR, EXIT_SUCCESS, GlobalOptions,
};
use crate::engine::{CheckEngine, FileWalkerError};
use crate::error::ConfigError;
use crate::output::{HumanFormatter, JsonlFormatter};
use crate::types::NormalizerKind;

/// Error type specific to check command
#[derive(Debug, thiserror::Error)]
pub(crate) enum CheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File walker error: {0}")]
    FileWalker(#[from] FileWalkerError),
}

/// Run the check command
///
/// # Returns
///
/// Exit code:
/// - 0: Success (every file normalized)
/// - 1: One or more files are not normalized
/// - 2: Error (configuration/I/O error)
/// - 3: Parse error (invalid TOML configuration)
pub fn run_check(
    paths: &[String],
    kind: Option<NormalizerKind>,
    format: Option<OutputFormat>,
    options: &GlobalOptions,
) -> i32 {
    match run_check_inner(paths, kind, format, options) {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_NOT_NORMALIZED,
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                CheckError::Config(ConfigError::Parse(_)) => EXIT_PARSE_ERROR,
                _ => EXIT_ERROR,
            }
        }
    }
}

/// Internal implementation of check command
fn run_check_inner(
    paths: &[String],
    kind: Option<NormalizerKind>,
    format: Option<OutputFormat>,
    options: &GlobalOptions,
) -> Result<bool, CheckError> {
    let config = common::load_config(options)?;
    let kind = kind.unwrap_or(config.kanafold.normalizer);
    let format = common::resolve_format(format, &config);
    let normalizer = config.build_normalizer_for(kind)?;

    let files = common::discover_files(paths, &config)?;
    if files.is_empty() {
        eprintln!("Warning: No files found to check.");
    }

    if format == OutputFormat::Human && !files.is_empty() {
        eprintln!("Checking {} files with the {} normalizer...", files.len(), kind);
    }

    let result = CheckEngine::new(normalizer).execute(files);
    tracing::info!(
        checked = result.files_checked,
        skipped = result.files_skipped,
        not_normalized = result.findings.len(),
        "check finished"
    );

    let report = match format {
        OutputFormat::Human => {
            HumanFormatter::new(common::use_color(options, &config)).format_check(&result)
        }
        OutputFormat::Jsonl => JsonlFormatter::new().format_check(&result),
    };
    print!("{}", report);

    Ok(result.is_clean())
}
