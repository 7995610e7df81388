#![forbid(unsafe_code)]

//! Rule engine: rules, chains, the width fold and the built-in rule set

pub mod builtin;
mod chain;
mod definition;
mod rule;
mod width_fold;

// Re-export core types
pub use builtin::{is_optimized, is_trimmed, optimize, trim};
pub use chain::RuleChain;
pub use definition::{NamedRule, RuleDefinition};
pub use rule::{MAX_RECURSIVE_ROUNDS, Rule, RuleKind, Substitution};
pub use width_fold::{
    FOLD_EXCEPTIONS, FOLD_SCOPE_PATTERN, HYPHENS_PATTERN, SEMI_VOICED_MARK_PATTERN,
    VOICED_MARK_PATTERN, WidthFold,
};
