//! Normalize command implementation
//!
//! Prints the normalized content of each file, or of stdin when no files
//! are given. Each input is normalized as a whole and followed by one line
//! feed.

use crate::cli::common::{self, EXIT_ERROR, EXIT_PARSE_ERROR, EXIT_SUCCESS, GlobalOptions};
use crate::error::ConfigError;
use crate::normalize::Normalizer;
use crate::types::NormalizerKind;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Error type specific to normalize command
#[derive(Debug, thiserror::Error)]
pub(crate) enum NormalizeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Run the normalize command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Error (unreadable input, I/O error, invalid configuration)
/// - 3: Parse error (invalid TOML configuration)
pub fn run_normalize(kind: Option<NormalizerKind>, files: &[PathBuf], options: &GlobalOptions) -> i32 {
    match run_normalize_inner(kind, files, options) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                NormalizeError::Config(ConfigError::Parse(_)) => EXIT_PARSE_ERROR,
                _ => EXIT_ERROR,
            }
        }
    }
}

fn run_normalize_inner(
    kind: Option<NormalizerKind>,
    files: &[PathBuf],
    options: &GlobalOptions,
) -> Result<(), NormalizeError> {
    let config = common::load_config(options)?;
    let kind = kind.unwrap_or(config.kanafold.normalizer);
    let normalizer = config.build_normalizer_for(kind)?;
    tracing::info!(normalizer = %kind, inputs = files.len(), "normalizing");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if files.is_empty() {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        write_normalized(&normalizer, &text, &mut out)?;
    } else {
        for path in files {
            let text = read_input(path)?;
            write_normalized(&normalizer, &text, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn read_input(path: &Path) -> Result<String, NormalizeError> {
    fs::read_to_string(path).map_err(|source| NormalizeError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_normalized(normalizer: &Normalizer, text: &str, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", normalizer.normalize(text))
}
