#![forbid(unsafe_code)]

//! Width folding for CJK text
//!
//! The fold runs in three stages:
//!
//! 1. Canonicalize voiced and semi-voiced sound marks (and any space in
//!    front of them) to their halfwidth forms, and unify hyphen-like
//!    characters to ASCII `-`.
//! 2. Apply NFKC to every maximal run of characters in the CJK scope
//!    (U+3000..=U+30FF and U+FF00..=U+FFEF, minus the fullwidth tilde and
//!    the fullwidth currency signs).
//! 3. Turn any combining sound mark still standing alone into its spacing
//!    form.
//!
//! Halfwidth marks in stage 1 let NFKC compose them with the preceding kana
//! in stage 2 (`ﾊﾞ` and `ハ゛` both become `バ`). Marks with no composed form
//! (`ア゜`) come out of NFKC as combining characters, which stage 3 makes
//! visible again.

use crate::error::RuleError;
use crate::rules::chain::RuleChain;
use crate::rules::rule::Rule;
use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

/// Characters inside the CJK blocks that the fold leaves alone
///
/// The fullwidth tilde and the fullwidth currency signs would otherwise be
/// folded into ASCII or Latin-1 lookalikes.
pub const FOLD_EXCEPTIONS: [char; 6] = [
    '\u{FF5E}', // ～
    '\u{FF04}', // ＄
    '\u{FFE0}', // ￠
    '\u{FFE1}', // ￡
    '\u{FFE5}', // ￥
    '\u{FFE6}', // ￦
];

/// Maximal runs of foldable CJK characters
pub const FOLD_SCOPE_PATTERN: &str = r"[[\x{3000}-\x{30FF}\x{FF00}-\x{FFEF}]--[\x{FF5E}\x{FF04}\x{FFE0}\x{FFE1}\x{FFE5}\x{FFE6}]]+";

/// Hyphen, non-breaking hyphen and figure dash, folded to ASCII `-`
pub const HYPHENS_PATTERN: &str = r"[\x{2010}-\x{2012}]";

/// Any voiced sound mark (combining, spacing, halfwidth) with optional leading space
pub const VOICED_MARK_PATTERN: &str = r" ?[\x{3099}\x{309B}\x{FF9E}]";

/// Any semi-voiced sound mark (combining, spacing, halfwidth) with optional leading space
pub const SEMI_VOICED_MARK_PATTERN: &str = r" ?[\x{309A}\x{309C}\x{FF9F}]";

const HALFWIDTH_VOICED: &str = "\u{FF9E}";
const HALFWIDTH_SEMI_VOICED: &str = "\u{FF9F}";

/// The width-fold pipeline
///
/// Built once and shared through [`crate::rules::builtin::WIDTH_FOLD`];
/// construct your own only to wrap it in a rule at a different priority.
#[derive(Clone)]
pub struct WidthFold {
    scope: Regex,
    canonicalize: RuleChain,
    restore: RuleChain,
}

impl WidthFold {
    /// Builds the fold
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidRegex` if one of the built-in patterns fails
    /// to compile.
    pub fn new() -> Result<Self, RuleError> {
        Self::build(FOLD_SCOPE_PATTERN)
    }

    /// Builds a fold that also leaves `extra` characters alone
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidRegex` if one of the built-in patterns fails
    /// to compile.
    pub fn with_exceptions(extra: &[char]) -> Result<Self, RuleError> {
        if extra.is_empty() {
            return Self::new();
        }
        let excluded: String = FOLD_EXCEPTIONS
            .iter()
            .chain(extra)
            .map(|c| format!(r"\x{{{:X}}}", u32::from(*c)))
            .collect();
        Self::build(&format!(
            r"[[\x{{3000}}-\x{{30FF}}\x{{FF00}}-\x{{FFEF}}]--[{}]]+",
            excluded
        ))
    }

    fn build(scope_pattern: &str) -> Result<Self, RuleError> {
        let scope = Regex::new(scope_pattern)
            .map_err(|e| RuleError::InvalidRegex(format!("fold scope: {}", e)))?;

        let canonicalize = RuleChain::new(vec![
            Rule::single_pass(HYPHENS_PATTERN, "-", 0)?,
            Rule::single_pass(VOICED_MARK_PATTERN, HALFWIDTH_VOICED, 0)?,
            Rule::single_pass(SEMI_VOICED_MARK_PATTERN, HALFWIDTH_SEMI_VOICED, 0)?,
        ]);

        let restore = RuleChain::new(vec![
            Rule::single_pass(r" ?\x{3099}", "\u{309B}", 0)?,
            Rule::single_pass(r" ?\x{309A}", "\u{309C}", 0)?,
        ]);

        Ok(Self {
            scope,
            canonicalize,
            restore,
        })
    }

    /// The pattern selecting the runs that get NFKC applied
    pub fn scope(&self) -> &Regex {
        &self.scope
    }

    /// Runs all three stages over `text`
    pub fn apply(&self, text: &str) -> String {
        let canonical = self.canonicalize.apply(text);
        let folded = self.fold_runs(&canonical);
        self.restore.apply(&folded)
    }

    fn fold_runs(&self, text: &str) -> String {
        self.scope
            .replace_all(text, |caps: &Captures<'_>| caps[0].nfkc().collect::<String>())
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(text: &str) -> String {
        WidthFold::new().unwrap().apply(text)
    }

    #[test]
    fn test_halfwidth_katakana_widens() {
        assert_eq!(fold("ｺﾝﾆﾁﾊ"), "コンニチハ");
    }

    #[test]
    fn test_fullwidth_ascii_narrows() {
        assert_eq!(fold("Ｈｅｌｌｏ"), "Hello");
    }

    #[test]
    fn test_voiced_marks_compose() {
        assert_eq!(fold("ﾊﾞｰﾊﾞﾊﾟﾊﾟ"), "バーバパパ");
        assert_eq!(fold("ハ゛ーハ゛ハ゜ハ゜"), "バーバパパ");
        assert_eq!(fold("ハ ゛"), "バ");
    }

    #[test]
    fn test_uncomposable_marks_become_spacing() {
        assert_eq!(fold("ｱﾟ"), "ア\u{309C}");
        assert_eq!(fold("あ\u{309A}"), "あ\u{309C}");
    }

    #[test]
    fn test_exceptions_untouched() {
        for c in FOLD_EXCEPTIONS {
            let text = c.to_string();
            assert_eq!(fold(&text), text);
        }
    }

    #[test]
    fn test_text_outside_scope_untouched() {
        assert_eq!(fold("abc ① ﬁ"), "abc ① ﬁ");
    }

    #[test]
    fn test_hyphens_unify() {
        assert_eq!(fold("a\u{2010}b\u{2011}c\u{2012}d"), "a-b-c-d");
        assert_eq!(fold("\u{2013}"), "\u{2013}");
    }

    #[test]
    fn test_extra_exceptions_untouched() {
        let fold = WidthFold::with_exceptions(&['\u{FF65}', '\u{FFE3}']).unwrap();
        assert_eq!(fold.apply("ｱ\u{FF65}\u{FFE3}ｲ"), "ア\u{FF65}\u{FFE3}イ");
        assert_eq!(fold.apply("\u{FF5E}Ｈ"), "\u{FF5E}H");
        assert_eq!(WidthFold::with_exceptions(&[]).unwrap().scope().as_str(), FOLD_SCOPE_PATTERN);
    }

    #[test]
    fn test_ideographic_space_narrows() {
        assert_eq!(fold("世\u{3000}界"), "世 界");
    }
}
