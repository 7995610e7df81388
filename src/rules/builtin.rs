#![forbid(unsafe_code)]

//! Built-in rules embedded at compile time
//!
//! The five whitespace rules are plain rule files under `builtin-rules/`,
//! compiled into the binary with `include_str!`. The width fold has no
//! pattern/replacement form and is built directly. Every rule here is a
//! process-wide constant, built on first use and never mutated.
//!
//! Standard chain order:
//!
//! | priority | rule |
//! |---|---|
//! | 0 | control-remover |
//! | 10 | space-normalizer |
//! | 100 | space-linter (recursive) |
//! | 1000 | linefeed-linter (recursive) |
//! | 10000 | trimmer |
//! | 100000 | width fold |

use crate::error::RuleError;
use crate::rules::chain::RuleChain;
use crate::rules::definition::NamedRule;
use crate::rules::rule::Rule;
use crate::rules::width_fold::WidthFold;
use std::sync::LazyLock;

pub const CONTROL_REMOVER: &str = "control-remover";
pub const SPACE_NORMALIZER: &str = "space-normalizer";
pub const SPACE_LINTER: &str = "space-linter";
pub const LINEFEED_LINTER: &str = "linefeed-linter";
pub const TRIMMER: &str = "trimmer";

/// Priority of the width fold in the standard chain
pub const WIDTH_FOLD_PRIORITY: i64 = 100_000;

/// Embedded built-in rule files
const BUILTIN_WHITESPACE_RULES: &[(&str, &str)] = &[
    (
        CONTROL_REMOVER,
        include_str!("../../builtin-rules/whitespace/control-remover.toml"),
    ),
    (
        SPACE_NORMALIZER,
        include_str!("../../builtin-rules/whitespace/space-normalizer.toml"),
    ),
    (
        SPACE_LINTER,
        include_str!("../../builtin-rules/whitespace/space-linter.toml"),
    ),
    (
        LINEFEED_LINTER,
        include_str!("../../builtin-rules/whitespace/linefeed-linter.toml"),
    ),
    (
        TRIMMER,
        include_str!("../../builtin-rules/whitespace/trimmer.toml"),
    ),
];

/// Load all built-in whitespace rules from embedded resources
///
/// # Errors
///
/// Returns `RuleError` if an embedded file cannot be parsed or its pattern
/// does not compile.
pub fn load_builtin_rules() -> Result<Vec<NamedRule>, RuleError> {
    BUILTIN_WHITESPACE_RULES
        .iter()
        .map(|(name, content)| load_named(name, content))
        .collect()
}

fn load_named(name: &str, content: &str) -> Result<NamedRule, RuleError> {
    let named = NamedRule::from_toml(content).map_err(|e| {
        RuleError::InvalidDefinition(format!("Failed to parse built-in rule '{}': {}", name, e))
    })?;
    if named.name != name {
        return Err(RuleError::InvalidDefinition(format!(
            "Built-in rule file for '{}' declares name '{}'",
            name, named.name
        )));
    }
    Ok(named)
}

fn builtin(name: &str) -> Rule {
    let content = BUILTIN_WHITESPACE_RULES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, content)| *content)
        .unwrap_or_default();
    match load_named(name, content) {
        Ok(named) => named.rule,
        Err(e) => panic!("built-in rule '{}' is invalid: {}", name, e),
    }
}

/// Removes control characters (priority 0)
pub static CONTROL_REMOVER_RULE: LazyLock<Rule> = LazyLock::new(|| builtin(CONTROL_REMOVER));

/// Turns exotic whitespace runs into one space (priority 10)
pub static SPACE_NORMALIZER_RULE: LazyLock<Rule> = LazyLock::new(|| builtin(SPACE_NORMALIZER));

/// Collapses same-line whitespace runs (priority 100, recursive)
pub static SPACE_LINTER_RULE: LazyLock<Rule> = LazyLock::new(|| builtin(SPACE_LINTER));

/// Collapses whitespace around line feeds (priority 1000, recursive)
pub static LINEFEED_LINTER_RULE: LazyLock<Rule> = LazyLock::new(|| builtin(LINEFEED_LINTER));

/// Strips leading and trailing whitespace (priority 10000)
pub static TRIMMER_RULE: LazyLock<Rule> = LazyLock::new(|| builtin(TRIMMER));

/// The CJK width fold (priority 100000)
pub static WIDTH_FOLD: LazyLock<Rule> = LazyLock::new(|| match WidthFold::new() {
    Ok(fold) => Rule::width_fold(fold, WIDTH_FOLD_PRIORITY),
    Err(e) => panic!("built-in width fold is invalid: {}", e),
});

/// Whitespace cleanup followed by the width fold
pub static STANDARD_CHAIN: LazyLock<RuleChain> = LazyLock::new(|| {
    RuleChain::new([
        CONTROL_REMOVER_RULE.clone(),
        SPACE_NORMALIZER_RULE.clone(),
        SPACE_LINTER_RULE.clone(),
        LINEFEED_LINTER_RULE.clone(),
        TRIMMER_RULE.clone(),
        WIDTH_FOLD.clone(),
    ])
});

static OPTIMIZER_CHAIN: LazyLock<RuleChain> = LazyLock::new(|| {
    RuleChain::new([
        CONTROL_REMOVER_RULE.clone(),
        SPACE_NORMALIZER_RULE.clone(),
        SPACE_LINTER_RULE.clone(),
        LINEFEED_LINTER_RULE.clone(),
        TRIMMER_RULE.clone(),
    ])
});

// No space normalizer: a single exotic space such as U+3000 still counts as clean.
static CLEANLINESS_CHAIN: LazyLock<RuleChain> = LazyLock::new(|| {
    RuleChain::new([
        CONTROL_REMOVER_RULE.clone(),
        SPACE_LINTER_RULE.clone(),
        LINEFEED_LINTER_RULE.clone(),
        TRIMMER_RULE.clone(),
    ])
});

static TRIM_CHAIN: LazyLock<RuleChain> =
    LazyLock::new(|| RuleChain::new([CONTROL_REMOVER_RULE.clone(), TRIMMER_RULE.clone()]));

/// The whitespace cleanup chain without the width fold
pub fn optimizer_chain() -> &'static RuleChain {
    &OPTIMIZER_CHAIN
}

/// Cleans control characters and irregular whitespace
pub fn optimize(text: &str) -> String {
    OPTIMIZER_CHAIN.apply(text)
}

/// Returns true if `text` is empty or has no control characters, repeated
/// same-line whitespace, whitespace around line feeds, or surrounding
/// whitespace
pub fn is_optimized(text: &str) -> bool {
    text.is_empty() || !CLEANLINESS_CHAIN.any_matches(text)
}

/// Removes control characters and surrounding whitespace
pub fn trim(text: &str) -> String {
    TRIM_CHAIN.apply(text)
}

/// Returns true if `text` is empty or [`trim`] would leave it unchanged
pub fn is_trimmed(text: &str) -> bool {
    text.is_empty() || !TRIM_CHAIN.any_matches(text)
}
