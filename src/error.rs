//! Error types for kanafold
//!
//! Normalization itself never fails: every rule and normalizer is a total
//! function over text. Errors only arise while *building* rules (bad patterns,
//! bad definitions) and while loading configuration.

use std::path::PathBuf;

/// Rule-related errors
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Invalid rule definition
    #[error("Invalid rule definition: {0}")]
    InvalidDefinition(String),

    /// Invalid regex pattern
    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(String),

    /// A recursive rule kept changing the text past the round limit
    #[error("Rule '{pattern}' did not converge after {rounds} rounds")]
    NonConvergent { pattern: String, rounds: usize },
}

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML syntax or shape error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Semantically invalid configuration
    #[error("Validation error: {0}")]
    Validation(String),

    /// An extra rule in the configuration is invalid
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),
}

/// Top-level error type for kanafold
#[derive(Debug, thiserror::Error)]
pub enum KanafoldError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rule error
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Input file is not valid UTF-8 text
    #[error("Cannot read {file} as text: {message}")]
    Input { file: PathBuf, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_error_into_top_level() {
        let err: KanafoldError = RuleError::InvalidRegex("[".to_string()).into();
        assert!(matches!(err, KanafoldError::Rule(_)));
        assert_eq!(err.to_string(), "Rule error: Invalid regex pattern: [");
    }

    #[test]
    fn test_non_convergent_display() {
        let err = RuleError::NonConvergent {
            pattern: "a".to_string(),
            rounds: 3,
        };
        assert_eq!(err.to_string(), "Rule 'a' did not converge after 3 rounds");
    }

    #[test]
    fn test_config_error_wraps_rule_error() {
        let err: ConfigError = RuleError::InvalidDefinition("empty".to_string()).into();
        let top: KanafoldError = err.into();
        assert!(top.to_string().contains("empty"));
    }

    #[test]
    fn test_input_error_mentions_file() {
        let err = KanafoldError::Input {
            file: PathBuf::from("notes/memo.txt"),
            message: "invalid UTF-8".to_string(),
        };
        assert!(err.to_string().contains("notes/memo.txt"));
    }
}
