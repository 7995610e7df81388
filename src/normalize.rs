#![forbid(unsafe_code)]

//! Normalizers: the template, codepoint transforms and the shipped kinds

mod kinds;
mod normalizer;
mod transform;

pub use kinds::{denormalize, hiraganize, is_cjk_normalized, katakanize, normalize_cjk, normalizer};
pub use normalizer::{CoreNormalization, Normalizer};
pub use transform::{
    CodepointTransform, FULLWIDTH_DELTA, FULLWIDTH_OVERRIDES, HIRAGANA_EXCLUSIONS,
    KATAKANA_EXCLUSIONS, KATAKANA_TO_HIRAGANA_DELTA,
};
