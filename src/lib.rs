#![forbid(unsafe_code)]

//! kanafold: rule-ordered canonicalization of Japanese text
//!
//! A normalizer runs a priority-ordered chain of regex rules, an optional
//! NFKC step, a codepoint block shift and a second rule chain. The shipped
//! normalizers fold CJK width variants, unify voiced sound marks, clean up
//! whitespace and transliterate between Hiragana and Katakana.
//!
//! ```
//! assert_eq!(kanafold::normalize_cjk("ﾊﾝｶｸ　ｶﾅ"), "ハンカク カナ");
//! assert_eq!(kanafold::katakanize("ひらがな"), "ヒラガナ");
//! ```

pub mod cli;
pub mod codepoints;
pub mod config;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod output;
pub mod rules;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, KanafoldError, RuleError};

// Re-export core domain types for convenient access
pub use types::{CodepointRange, NormalizerKind, Priority, RuleMode};

// Re-export the rule engine and normalizers
pub use normalize::{
    CodepointTransform, CoreNormalization, Normalizer, denormalize, hiraganize,
    is_cjk_normalized, katakanize, normalize_cjk, normalizer,
};
pub use rules::{Rule, RuleChain, is_optimized, is_trimmed, optimize, trim};
