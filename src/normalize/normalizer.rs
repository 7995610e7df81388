#![forbid(unsafe_code)]

//! The normalizer template
//!
//! A [`Normalizer`] is plain data: a pre-rule chain, a core normalization
//! step, a codepoint transform and a post-rule chain. `normalize` threads the
//! text through them in that order.

use crate::rules::{Rule, RuleChain, is_optimized, optimize};
use crate::normalize::transform::CodepointTransform;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// The whole-text step between the pre and post chains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoreNormalization {
    /// Leave the text as is
    #[default]
    Identity,
    /// Whitespace cleanup only
    Optimize,
    /// Unicode compatibility composition over the whole text
    Nfkc,
    /// Whitespace cleanup, NFKC, whitespace cleanup again
    OptimizedNfkc,
}

impl CoreNormalization {
    pub fn apply(&self, text: &str) -> String {
        match self {
            CoreNormalization::Identity => text.to_string(),
            CoreNormalization::Optimize => optimize(text),
            CoreNormalization::Nfkc => text.nfkc().collect(),
            CoreNormalization::OptimizedNfkc => {
                let composed: String = optimize(text).nfkc().collect();
                optimize(&composed)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoreNormalization::Identity => "identity",
            CoreNormalization::Optimize => "optimize",
            CoreNormalization::Nfkc => "nfkc",
            CoreNormalization::OptimizedNfkc => "optimize+nfkc",
        }
    }
}

impl fmt::Display for CoreNormalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stateless text normalizer
///
/// Two normalizers are equal when their chains, core step and transform are
/// structurally equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalizer {
    pre: RuleChain,
    core: CoreNormalization,
    transform: CodepointTransform,
    post: RuleChain,
}

impl Normalizer {
    pub fn new(
        pre: RuleChain,
        core: CoreNormalization,
        transform: CodepointTransform,
        post: RuleChain,
    ) -> Self {
        Self {
            pre,
            core,
            transform,
            post,
        }
    }

    pub fn pre_rules(&self) -> &RuleChain {
        &self.pre
    }

    pub fn core(&self) -> CoreNormalization {
        self.core
    }

    pub fn transform(&self) -> &CodepointTransform {
        &self.transform
    }

    pub fn post_rules(&self) -> &RuleChain {
        &self.post
    }

    /// Returns a normalizer with extra rules merged into its chains
    ///
    /// The merged chains are deduplicated and re-sorted by priority, so an
    /// extra rule structurally equal to a built-in one is dropped.
    pub fn with_extra_rules(
        &self,
        pre: impl IntoIterator<Item = Rule>,
        post: impl IntoIterator<Item = Rule>,
    ) -> Self {
        Self {
            pre: self.pre.with_rules(pre),
            core: self.core,
            transform: self.transform.clone(),
            post: self.post.with_rules(post),
        }
    }

    /// Normalizes `text`
    ///
    /// Empty text is returned unchanged.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let pre = self.pre.apply(text);
        let core = self.core.apply(&pre);
        let transformed = self.transform.apply_text(&core);
        self.post.apply(&transformed)
    }

    /// Returns true if `text` is empty, or already clean and left unchanged by
    /// [`Normalizer::normalize`]
    pub fn is_normalized(&self, text: &str) -> bool {
        text.is_empty() || (is_optimized(text) && self.normalize(text) == text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CodepointRange;

    fn rule(pattern: &str, replacement: &str, priority: i64) -> Rule {
        Rule::single_pass(pattern, replacement, priority).unwrap()
    }

    #[test]
    fn test_default_is_identity() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("ｱ  b"), "ｱ  b");
        assert!(normalizer.is_normalized("ｱ b"));
        assert!(!normalizer.is_normalized("ｱ  b"));
    }

    #[test]
    fn test_pipeline_order() {
        // pre: a → b, transform: b → c, post: c → d
        let normalizer = Normalizer::new(
            RuleChain::new([rule("a", "b", 0)]),
            CoreNormalization::Identity,
            CodepointTransform::new(CodepointRange::new(0x62, 0x62), 1),
            RuleChain::new([rule("c", "d", 0)]),
        );
        assert_eq!(normalizer.normalize("a"), "d");
        assert_eq!(normalizer.normalize("xyz"), "xyz");
    }

    #[test]
    fn test_core_normalizations() {
        assert_eq!(CoreNormalization::Identity.apply("ｱ"), "ｱ");
        assert_eq!(CoreNormalization::Optimize.apply(" ｱ  ｲ\t"), "ｱ ｲ");
        assert_eq!(CoreNormalization::Nfkc.apply("ｱ  ｲ"), "ア  イ");
        assert_eq!(CoreNormalization::OptimizedNfkc.apply(" ｱ\u{3000}\u{3000}ｲ "), "ア イ");
    }

    #[test]
    fn test_with_extra_rules_resorts() {
        let base = Normalizer::new(
            RuleChain::new([rule("x", "y", 10)]),
            CoreNormalization::Identity,
            CodepointTransform::identity(),
            RuleChain::default(),
        );
        let extended = base.with_extra_rules([rule("y", "z", 20), rule("w", "x", 0)], []);
        assert_eq!(extended.pre_rules().len(), 3);
        assert_eq!(extended.normalize("w"), "z");
        assert_eq!(base.normalize("w"), "w");
    }

    #[test]
    fn test_with_extra_rules_drops_duplicates() {
        let base = Normalizer::new(
            RuleChain::new([rule("x", "y", 10)]),
            CoreNormalization::Identity,
            CodepointTransform::identity(),
            RuleChain::default(),
        );
        let extended = base.with_extra_rules([rule("x", "y", 0)], []);
        assert_eq!(extended, base);
    }

    #[test]
    fn test_structural_equality() {
        let make = || {
            Normalizer::new(
                RuleChain::new([rule("a", "b", 1)]),
                CoreNormalization::Nfkc,
                CodepointTransform::katakana_to_hiragana(),
                RuleChain::default(),
            )
        };
        assert_eq!(make(), make());
        let other = Normalizer::new(
            RuleChain::new([rule("a", "b", 1)]),
            CoreNormalization::Identity,
            CodepointTransform::katakana_to_hiragana(),
            RuleChain::default(),
        );
        assert_ne!(make(), other);
    }
}
