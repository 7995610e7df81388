//! Initialize a kanafold project
//!
//! Writes a commented kanafold.toml into the working directory.

use crate::config::CONFIG_FILE_NAME;
use std::fs;
use std::path::Path;

/// Default content for kanafold.toml
const DEFAULT_KANAFOLD_TOML: &str = r#"[kanafold]
version = "1"

# Normalizer used by `kanafold normalize` and `kanafold check`
# One of: cjk, hiragana, katakana, fullwidth
normalizer = "cjk"

# File patterns to include (defaults to all)
# include = ["docs/**", "**/*.txt"]

# File patterns to exclude
# exclude = ["**/vendor/**"]

# Extra rules merged into the normalizer's chains, ordered by priority.
# Negative priorities count as 0. Mode is "single" or "recursive".
#
# [[rules.pre]]
# pattern = 'ｗｗｗ'
# replacement = "笑"
# priority = 5
#
# [[rules.post]]
# pattern = 'ー{2,}'
# replacement = "ー"
# mode = "recursive"

[output]
format = "human"
# color = "auto"
"#;

/// Error type for init command
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Path error
    #[error("Path error: {0}")]
    Path(String),
}

/// What init did with the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Skipped,
    Overwritten,
}

/// Run the init command
///
/// # Arguments
/// * `force` - If true, overwrite an existing file. If false, leave it alone.
pub fn run_init(force: bool) -> Result<InitOutcome, InitError> {
    handle_file(Path::new(CONFIG_FILE_NAME), DEFAULT_KANAFOLD_TOML, force)
}

fn handle_file(path: &Path, content: &str, force: bool) -> Result<InitOutcome, InitError> {
    if path.is_dir() {
        return Err(InitError::Path(format!(
            "'{}' exists but is a directory",
            path.display()
        )));
    }

    if path.exists() {
        if !force {
            return Ok(InitOutcome::Skipped);
        }
        fs::write(path, content)?;
        Ok(InitOutcome::Overwritten)
    } else {
        fs::write(path, content)?;
        Ok(InitOutcome::Created)
    }
}
