//! Parsing and validation for kanafold.toml configuration files

use crate::error::ConfigError;
use crate::normalize::{Normalizer, normalizer};
use crate::rules::{Rule, RuleDefinition};
use crate::types::NormalizerKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "kanafold.toml";

/// Main configuration struct for kanafold.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// kanafold metadata
    pub kanafold: KanafoldMeta,

    /// Extra rules merged into the normalizer's chains
    #[serde(default)]
    pub rules: RulesConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file, or defaults if it does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file; using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.kanafold.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.kanafold.version
            )));
        }

        for pattern in &self.kanafold.include {
            globset::Glob::new(pattern).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid include glob pattern '{}': {}",
                    pattern, e
                ))
            })?;
        }

        for pattern in &self.kanafold.exclude {
            globset::Glob::new(pattern).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid exclude glob pattern '{}': {}",
                    pattern, e
                ))
            })?;
        }

        // Every extra rule must compile
        self.rules.build_pre()?;
        self.rules.build_post()?;

        Ok(())
    }

    /// The configured normalizer with the extra rules merged in
    pub fn build_normalizer(&self) -> Result<Normalizer, ConfigError> {
        self.build_normalizer_for(self.kanafold.normalizer)
    }

    /// A specific normalizer with the extra rules merged in
    pub fn build_normalizer_for(&self, kind: NormalizerKind) -> Result<Normalizer, ConfigError> {
        let base = normalizer(kind);
        if self.rules.is_empty() {
            return Ok(base.clone());
        }
        Ok(base.with_extra_rules(self.rules.build_pre()?, self.rules.build_post()?))
    }
}

/// kanafold metadata section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KanafoldMeta {
    /// Configuration version (must be "1")
    pub version: String,

    /// Normalizer used by `normalize` and `check` unless overridden
    #[serde(default)]
    pub normalizer: NormalizerKind,

    /// File patterns to include
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// File patterns to exclude
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for KanafoldMeta {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            normalizer: NormalizerKind::default(),
            include: default_include(),
            exclude: Vec::new(),
        }
    }
}

fn default_include() -> Vec<String> {
    vec!["**/*".to_string()]
}

/// Extra rules section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Rules merged into the pre chain (`[[rules.pre]]`)
    #[serde(default)]
    pub pre: Vec<RuleDefinition>,

    /// Rules merged into the post chain (`[[rules.post]]`)
    #[serde(default)]
    pub post: Vec<RuleDefinition>,
}

impl RulesConfig {
    pub fn is_empty(&self) -> bool {
        self.pre.is_empty() && self.post.is_empty()
    }

    /// Compiles the extra pre rules
    pub fn build_pre(&self) -> Result<Vec<Rule>, ConfigError> {
        build_all(&self.pre)
    }

    /// Compiles the extra post rules
    pub fn build_post(&self) -> Result<Vec<Rule>, ConfigError> {
        build_all(&self.post)
    }
}

fn build_all(definitions: &[RuleDefinition]) -> Result<Vec<Rule>, ConfigError> {
    definitions
        .iter()
        .map(|definition| definition.build().map_err(ConfigError::from))
        .collect()
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}
