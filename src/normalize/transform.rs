#![forbid(unsafe_code)]

//! Per-codepoint transliteration
//!
//! A [`CodepointTransform`] shifts every codepoint inside a target block by a
//! fixed delta, except for an exclusion set. An optional override table
//! redirects individual codepoints (inside or outside the block) to explicit
//! targets before the shift is considered.

use crate::codepoints::{codepoints_to_text, text_to_codepoints};
use crate::types::CodepointRange;
use std::collections::{BTreeMap, BTreeSet};

/// Distance from a Katakana letter to its Hiragana counterpart (`あ` − `ア`)
pub const KATAKANA_TO_HIRAGANA_DELTA: i32 = 0x3042 - 0x30A2;

/// Distance from an ASCII character to its fullwidth form (`Ａ` − `A`)
pub const FULLWIDTH_DELTA: i32 = 0xFF21 - 0x0041;

/// Katakana with no letter-for-letter Hiragana counterpart
///
/// The double hyphen, the voiced wa/wi/we/wo, the middle dot, the prolonged
/// sound mark and the digraph koto.
pub const KATAKANA_EXCLUSIONS: [u32; 8] = [
    0x30A0, 0x30F7, 0x30F8, 0x30F9, 0x30FA, 0x30FB, 0x30FC, 0x30FF,
];

/// Hiragana with no letter-for-letter Katakana counterpart
///
/// The unassigned U+3040, the small ka/ke, the sound marks and the digraph
/// yori.
pub const HIRAGANA_EXCLUSIONS: [u32; 8] = [
    0x3040, 0x3097, 0x3098, 0x3099, 0x309A, 0x309B, 0x309C, 0x309F,
];

/// Latin-1 and box-drawing symbols whose fullwidth forms are not at +0xFEE0
pub const FULLWIDTH_OVERRIDES: [(u32, u32); 9] = [
    (0x00B7, 0xFF65), // middle dot → halfwidth katakana middle dot
    (0x00A2, 0xFFE0), // cent
    (0x00A3, 0xFFE1), // pound
    (0x00AC, 0xFFE2), // not sign
    (0x00AF, 0xFFE3), // macron
    (0x00A6, 0xFFE4), // broken bar
    (0x00A5, 0xFFE5), // yen
    (0x20A9, 0xFFE6), // won
    (0x2502, 0xFFE8), // light vertical
];

/// A block shift with exclusions and explicit overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodepointTransform {
    block: CodepointRange,
    delta: i32,
    exclusions: BTreeSet<u32>,
    overrides: BTreeMap<u32, u32>,
}

impl CodepointTransform {
    /// A transform that shifts every codepoint of `block` by `delta`
    pub fn new(block: CodepointRange, delta: i32) -> Self {
        Self {
            block,
            delta,
            exclusions: BTreeSet::new(),
            overrides: BTreeMap::new(),
        }
    }

    /// The transform that leaves every codepoint unchanged
    pub fn identity() -> Self {
        Self::new(CodepointRange::BASIC_LATIN, 0)
    }

    /// Katakana → Hiragana
    pub fn katakana_to_hiragana() -> Self {
        Self::new(CodepointRange::KATAKANA, KATAKANA_TO_HIRAGANA_DELTA)
            .with_exclusions(KATAKANA_EXCLUSIONS)
    }

    /// Hiragana → Katakana
    pub fn hiragana_to_katakana() -> Self {
        Self::new(CodepointRange::HIRAGANA, -KATAKANA_TO_HIRAGANA_DELTA)
            .with_exclusions(HIRAGANA_EXCLUSIONS)
    }

    /// Printable ASCII → fullwidth forms
    ///
    /// Space, the C0 controls and DEL stay put; the symbols in
    /// [`FULLWIDTH_OVERRIDES`] go to their dedicated compatibility forms.
    pub fn latin_to_fullwidth() -> Self {
        Self::new(CodepointRange::BASIC_LATIN, FULLWIDTH_DELTA)
            .with_exclusions(0x00..=0x20)
            .with_exclusions([0x7F])
            .with_overrides(FULLWIDTH_OVERRIDES)
    }

    /// Adds codepoints that must pass through unchanged
    pub fn with_exclusions(mut self, codepoints: impl IntoIterator<Item = u32>) -> Self {
        self.exclusions.extend(codepoints);
        self
    }

    /// Adds explicit source → target mappings
    pub fn with_overrides(mut self, pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        self.overrides.extend(pairs);
        self
    }

    pub fn block(&self) -> CodepointRange {
        self.block
    }

    pub fn delta(&self) -> i32 {
        self.delta
    }

    pub fn exclusions(&self) -> &BTreeSet<u32> {
        &self.exclusions
    }

    pub fn overrides(&self) -> &BTreeMap<u32, u32> {
        &self.overrides
    }

    /// Returns true if no codepoint is ever changed
    pub fn is_identity(&self) -> bool {
        self.delta == 0 && self.overrides.iter().all(|(from, to)| from == to)
    }

    /// Maps one codepoint
    ///
    /// The result may fall outside the valid codepoint space; callers going
    /// back to text drop such values.
    pub fn apply(&self, codepoint: u32) -> u32 {
        if let Some(&target) = self.overrides.get(&codepoint) {
            return target;
        }
        if self.block.contains(codepoint) && !self.exclusions.contains(&codepoint) {
            return codepoint.saturating_add_signed(self.delta);
        }
        codepoint
    }

    /// Maps every codepoint of `text`, dropping any that become invalid
    pub fn apply_text(&self, text: &str) -> String {
        if self.is_identity() {
            return text.to_string();
        }
        let mapped: Vec<u32> = text_to_codepoints(text)
            .into_iter()
            .map(|codepoint| self.apply(codepoint))
            .collect();
        codepoints_to_text(&mapped)
    }

    /// The transform going the other way
    ///
    /// The block and the exclusions move by the delta, the delta is negated,
    /// and the override table is reversed.
    pub fn inverse(&self) -> Self {
        Self {
            block: self.block.shifted(self.delta),
            delta: -self.delta,
            exclusions: self
                .exclusions
                .iter()
                .map(|codepoint| codepoint.saturating_add_signed(self.delta))
                .collect(),
            overrides: self.overrides.iter().map(|(&from, &to)| (to, from)).collect(),
        }
    }
}

impl Default for CodepointTransform {
    fn default() -> Self {
        Self::identity()
    }
}
