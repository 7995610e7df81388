#![forbid(unsafe_code)]

//! The four shipped normalizers
//!
//! Each is a [`Normalizer`] configuration built once on first use:
//!
//! - CJK width: the standard chain (whitespace cleanup, then the width fold),
//!   then whitespace cleanup again for any space the fold produced.
//! - Hiragana: kana unification, NFKC, Katakana → Hiragana, width fold, and
//!   decomposition of the voiced wa/wi/we/wo that have no Hiragana form.
//! - Katakana: kana unification, NFKC, Hiragana → Katakana, width fold.
//! - Fullwidth: the CJK width normalizer followed by widening printable
//!   ASCII, with plain spaces becoming ideographic spaces. Its fold keeps
//!   the fullwidth forms it widens Latin-1 into, so they stay put on a
//!   second run.

use crate::normalize::normalizer::{CoreNormalization, Normalizer};
use crate::normalize::transform::{CodepointTransform, FULLWIDTH_OVERRIDES};
use crate::rules::builtin::{STANDARD_CHAIN, WIDTH_FOLD, WIDTH_FOLD_PRIORITY, optimizer_chain};
use crate::rules::{
    HYPHENS_PATTERN, Rule, RuleChain, SEMI_VOICED_MARK_PATTERN, VOICED_MARK_PATTERN, WidthFold,
};
use crate::types::NormalizerKind;
use std::sync::LazyLock;

/// Stands in for U+FF5E while NFKC runs, so the tilde keeps its full width
const TILDE_FENCE: &str = "\u{FF00}~\u{FF00}";

/// Priority of the Hiragana-only decomposition rules, after the width fold
const DECOMPOSE_PRIORITY: i64 = 200_000;

fn fixed(pattern: &str, replacement: &str, priority: i64) -> Rule {
    match Rule::single_pass(pattern, replacement, priority) {
        Ok(rule) => rule,
        Err(e) => panic!("built-in normalizer rule '{}' is invalid: {}", pattern, e),
    }
}

/// Sound-mark, hyphen and tilde handling shared by the kana normalizers
fn kana_pre_rules() -> RuleChain {
    RuleChain::new([
        fixed(VOICED_MARK_PATTERN, "\u{FF9E}", 0),
        fixed(SEMI_VOICED_MARK_PATTERN, "\u{FF9F}", 0),
        fixed(HYPHENS_PATTERN, "-", 0),
        fixed(r"\x{FF5E}", TILDE_FENCE, 0),
    ])
}

fn kana_post_rules() -> RuleChain {
    RuleChain::new([fixed(r"\x{FF00}~\x{FF00}", "\u{FF5E}", 0), WIDTH_FOLD.clone()])
}

fn logged(kind: NormalizerKind, normalizer: Normalizer) -> Normalizer {
    tracing::debug!(
        kind = %kind,
        pre_rules = normalizer.pre_rules().len(),
        post_rules = normalizer.post_rules().len(),
        core = %normalizer.core(),
        "built normalizer"
    );
    normalizer
}

static CJK: LazyLock<Normalizer> = LazyLock::new(|| {
    logged(
        NormalizerKind::Cjk,
        Normalizer::new(
            STANDARD_CHAIN.clone(),
            CoreNormalization::Optimize,
            CodepointTransform::identity(),
            RuleChain::default(),
        ),
    )
});

static HIRAGANA: LazyLock<Normalizer> = LazyLock::new(|| {
    let decompose = [
        fixed(r"\x{30F7}", "\u{308F}\u{309B}", DECOMPOSE_PRIORITY),
        fixed(r"\x{30F8}", "\u{3090}\u{309B}", DECOMPOSE_PRIORITY),
        fixed(r"\x{30F9}", "\u{3091}\u{309B}", DECOMPOSE_PRIORITY),
        fixed(r"\x{30FA}", "\u{3092}\u{309B}", DECOMPOSE_PRIORITY),
    ];
    logged(
        NormalizerKind::Hiragana,
        Normalizer::new(
            kana_pre_rules(),
            CoreNormalization::OptimizedNfkc,
            CodepointTransform::katakana_to_hiragana(),
            kana_post_rules().with_rules(decompose),
        ),
    )
});

static KATAKANA: LazyLock<Normalizer> = LazyLock::new(|| {
    logged(
        NormalizerKind::Katakana,
        Normalizer::new(
            kana_pre_rules(),
            CoreNormalization::OptimizedNfkc,
            CodepointTransform::hiragana_to_katakana(),
            kana_post_rules(),
        ),
    )
});

static FULLWIDTH: LazyLock<Normalizer> = LazyLock::new(|| {
    let targets: Vec<char> = FULLWIDTH_OVERRIDES
        .iter()
        .filter_map(|&(_, to)| char::from_u32(to))
        .collect();
    let fold = match WidthFold::with_exceptions(&targets) {
        Ok(fold) => Rule::width_fold(fold, WIDTH_FOLD_PRIORITY),
        Err(e) => panic!("fullwidth width fold is invalid: {}", e),
    };
    logged(
        NormalizerKind::Fullwidth,
        Normalizer::new(
            RuleChain::new(optimizer_chain().iter().cloned().chain([fold])),
            CoreNormalization::Optimize,
            CodepointTransform::latin_to_fullwidth(),
            RuleChain::new([fixed(" ", "\u{3000}", 0)]),
        ),
    )
});

/// Returns the shared normalizer for `kind`
pub fn normalizer(kind: NormalizerKind) -> &'static Normalizer {
    match kind {
        NormalizerKind::Cjk => &CJK,
        NormalizerKind::Hiragana => &HIRAGANA,
        NormalizerKind::Katakana => &KATAKANA,
        NormalizerKind::Fullwidth => &FULLWIDTH,
    }
}

/// Folds CJK width variants and cleans whitespace
///
/// ```
/// assert_eq!(kanafold::normalize_cjk("ｺﾝﾆﾁﾊ　世界"), "コンニチハ 世界");
/// ```
pub fn normalize_cjk(text: &str) -> String {
    CJK.normalize(text)
}

/// Returns true if [`normalize_cjk`] would leave `text` unchanged and it is
/// already clean
pub fn is_cjk_normalized(text: &str) -> bool {
    CJK.is_normalized(text)
}

/// Normalizes, then transliterates Katakana to Hiragana
///
/// ```
/// assert_eq!(kanafold::hiraganize("ｱﾚﾝ･ｷﾞﾝｽﾞﾊﾞｰｸﾞ"), "あれん・ぎんずばーぐ");
/// ```
pub fn hiraganize(text: &str) -> String {
    HIRAGANA.normalize(text)
}

/// Normalizes, then transliterates Hiragana to Katakana
pub fn katakanize(text: &str) -> String {
    KATAKANA.normalize(text)
}

/// Normalizes, then widens printable ASCII and spaces
///
/// ```
/// assert_eq!(kanafold::denormalize("Hello World."), "Ｈｅｌｌｏ\u{3000}Ｗｏｒｌｄ．");
/// ```
pub fn denormalize(text: &str) -> String {
    FULLWIDTH.normalize(text)
}
