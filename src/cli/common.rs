//! Common helper functions shared across CLI commands
//!
//! This module provides shared functionality for loading configuration,
//! resolving output options, and discovering files.

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::config::{self, CONFIG_FILE_NAME, ColorOption, Config};
use crate::engine::{FileEntry, FileWalker, FileWalkerError};
use crate::error::ConfigError;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Process exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_NOT_NORMALIZED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Options every command receives from the global flags
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// `--config`; `None` means ./kanafold.toml when present
    pub config: Option<PathBuf>,
    /// `--color`; `None` defers to kanafold.toml
    pub color: Option<ColorChoice>,
}

/// Load kanafold configuration
///
/// An explicit `--config` path must exist. Without one, ./kanafold.toml is
/// used when present and defaults apply otherwise.
///
/// # Errors
///
/// Returns `ConfigError::Io` if an explicit path cannot be read.
/// Returns `ConfigError::Parse` or `ConfigError::Validation` if the file is invalid.
pub(crate) fn load_config(options: &GlobalOptions) -> Result<Config, ConfigError> {
    match &options.config {
        Some(path) => Config::load(path),
        None => Config::load_or_default(Path::new(CONFIG_FILE_NAME)),
    }
}

/// Output format from the command line, falling back to the configuration
pub(crate) fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.unwrap_or(match config.output.format {
        config::OutputFormat::Human => OutputFormat::Human,
        config::OutputFormat::Jsonl => OutputFormat::Jsonl,
    })
}

/// Whether human output on stdout should be colored
pub(crate) fn use_color(options: &GlobalOptions, config: &Config) -> bool {
    let choice = options.color.unwrap_or(match config.output.color {
        ColorOption::Auto => ColorChoice::Auto,
        ColorOption::Always => ColorChoice::Always,
        ColorOption::Never => ColorChoice::Never,
    });
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    }
}

/// Discover files to check using FileWalker
///
/// Walks the specified paths and collects all files that match the
/// include/exclude patterns from the configuration.
///
/// # Errors
///
/// Returns `FileWalkerError` if a pattern is invalid or walking fails.
pub(crate) fn discover_files(
    paths: &[String],
    config: &Config,
) -> Result<Vec<FileEntry>, FileWalkerError> {
    let mut all_files = Vec::new();

    for path_str in paths {
        let walker = FileWalker::new(
            Path::new(path_str),
            &config.kanafold.include,
            &config.kanafold.exclude,
        )?;
        for result in walker.walk() {
            all_files.push(result?);
        }
    }

    all_files.sort();
    all_files.dedup();
    Ok(all_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_config_must_exist() {
        let options = GlobalOptions {
            config: Some(PathBuf::from("/nonexistent/kanafold.toml")),
            color: None,
        };
        assert!(matches!(load_config(&options), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("alt.toml");
        fs::write(&path, "[kanafold]\nversion = \"1\"\nnormalizer = \"katakana\"\n").unwrap();

        let options = GlobalOptions {
            config: Some(path),
            color: None,
        };
        let config = load_config(&options).unwrap();
        assert_eq!(
            config.kanafold.normalizer,
            crate::types::NormalizerKind::Katakana
        );
    }

    #[test]
    fn test_resolve_format_prefers_flag() {
        let mut config = Config::default();
        config.output.format = config::OutputFormat::Jsonl;
        assert_eq!(resolve_format(None, &config), OutputFormat::Jsonl);
        assert_eq!(
            resolve_format(Some(OutputFormat::Human), &config),
            OutputFormat::Human
        );
    }

    #[test]
    fn test_use_color_explicit_choices() {
        let mut config = Config::default();
        config.output.color = ColorOption::Always;
        let mut options = GlobalOptions::default();
        assert!(use_color(&options, &config));

        options.color = Some(ColorChoice::Never);
        assert!(!use_color(&options, &config));
    }

    #[test]
    fn test_discover_files_with_empty_paths() {
        let result = discover_files(&[], &Config::default()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_discover_files_applies_patterns() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::write(temp.path().join("b.md"), "b").unwrap();

        let mut config = Config::default();
        config.kanafold.include = vec!["**/*.txt".to_string()];
        let root = temp.path().to_string_lossy().into_owned();

        let files = discover_files(&[root.clone(), root], &config).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("a.txt"));
    }
}
