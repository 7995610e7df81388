//! List command implementation
//!
//! This module implements the `kanafold list` command, which prints the
//! effective pre and post rule chains of a normalizer, with any extra rules
//! from kanafold.toml merged in.

use crate::cli::args::OutputFormat;
use crate::cli::common::{self, EXIT_ERROR, EXIT_PARSE_ERROR, EXIT_SUCCESS, GlobalOptions};
use crate::error::ConfigError;
use crate::normalize::Normalizer;
use crate::output::{HumanFormatter, JsonlFormatter};
use crate::types::NormalizerKind;

/// Error type specific to list command
#[derive(Debug, thiserror::Error)]
enum ListError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Run the list command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Error
/// - 3: Parse error (invalid TOML configuration)
pub fn run_list(
    kind: Option<NormalizerKind>,
    format: Option<OutputFormat>,
    options: &GlobalOptions,
) -> i32 {
    match run_list_inner(kind, format, options) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                ListError::Config(ConfigError::Parse(_)) => EXIT_PARSE_ERROR,
                _ => EXIT_ERROR,
            }
        }
    }
}

fn run_list_inner(
    kind: Option<NormalizerKind>,
    format: Option<OutputFormat>,
    options: &GlobalOptions,
) -> Result<(), ListError> {
    let config = common::load_config(options)?;
    let kind = kind.unwrap_or(config.kanafold.normalizer);
    let format = common::resolve_format(format, &config);
    let normalizer = config.build_normalizer_for(kind)?;

    print!(
        "{}",
        render(kind, &normalizer, format, common::use_color(options, &config))
    );
    Ok(())
}

fn render(
    kind: NormalizerKind,
    normalizer: &Normalizer,
    format: OutputFormat,
    use_color: bool,
) -> String {
    match format {
        OutputFormat::Human => HumanFormatter::new(use_color).format_rules(kind, normalizer),
        OutputFormat::Jsonl => JsonlFormatter::new().format_rules(kind, normalizer),
    }
}
