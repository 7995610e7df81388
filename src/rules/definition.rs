#![forbid(unsafe_code)]

//! TOML rule definitions
//!
//! Rules can be described in TOML, either as standalone rule files (the
//! built-in whitespace rules under `builtin-rules/`) or as `[[rules.pre]]` /
//! `[[rules.post]]` entries in `kanafold.toml`. Both shapes share
//! [`RuleDefinition`].

use crate::error::RuleError;
use crate::rules::rule::Rule;
use crate::types::{Priority, RuleMode};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A pattern rule as written in TOML
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDefinition {
    pub pattern: String,
    #[serde(default)]
    pub replacement: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub mode: RuleMode,
}

impl RuleDefinition {
    /// Checks the definition without compiling it
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidDefinition` if the pattern is empty.
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.pattern.is_empty() {
            return Err(RuleError::InvalidDefinition(
                "Rule pattern must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Compiles the definition into a rule
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidDefinition` for an empty pattern and
    /// `RuleError::InvalidRegex` if the pattern does not compile.
    pub fn build(&self) -> Result<Rule, RuleError> {
        self.validate()?;
        Rule::new(
            &self.pattern,
            &self.replacement,
            i64::from(self.priority.value()),
            self.mode,
        )
    }
}

/// A standalone rule file: a named, described rule definition
#[derive(Debug, Deserialize)]
struct RuleFile {
    rule: RuleSection,
    substitution: RuleDefinition,
}

#[derive(Debug, Deserialize)]
struct RuleSection {
    name: String,
    #[serde(default)]
    description: String,
}

/// A rule loaded from a rule file, with its name and description
#[derive(Debug, Clone)]
pub struct NamedRule {
    pub name: String,
    pub description: String,
    pub rule: Rule,
}

impl NamedRule {
    /// Parses a rule file from TOML content
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidDefinition` if:
    /// - TOML syntax is invalid
    /// - Required fields are missing
    /// - The rule name or pattern is empty
    ///
    /// Returns `RuleError::InvalidRegex` if the pattern does not compile.
    pub fn from_toml(content: &str) -> Result<Self, RuleError> {
        let file: RuleFile = toml::from_str(content)
            .map_err(|e| RuleError::InvalidDefinition(format!("Failed to parse TOML: {}", e)))?;

        if file.rule.name.trim().is_empty() {
            return Err(RuleError::InvalidDefinition(
                "Rule name must not be empty".to_string(),
            ));
        }

        let rule = file.substitution.build()?;

        Ok(Self {
            name: file.rule.name,
            description: file.rule.description,
            rule,
        })
    }

    /// Parses a rule file from disk
    ///
    /// # Errors
    ///
    /// Returns `RuleError` if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, RuleError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RuleError::InvalidDefinition(format!("Failed to read file {:?}: {}", path, e))
        })?;
        Self::from_toml(&content)
    }
}
