#![forbid(unsafe_code)]

//! Core domain types for kanafold
//!
//! This module defines the small value types shared by rules, transforms and
//! normalizers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution order of a rule inside a chain
///
/// Lower priorities run first. Priorities are never negative: negative input
/// clamps to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u32")]
pub struct Priority(u32);

impl Priority {
    /// Creates a priority, clamping negatives to zero
    pub fn new(value: i64) -> Self {
        Priority(value.clamp(0, i64::from(u32::MAX)) as u32)
    }

    /// Returns the numeric value
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<i64> for Priority {
    fn from(value: i64) -> Self {
        Priority::new(value)
    }
}

impl From<Priority> for u32 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An inclusive, contiguous range of Unicode codepoints
///
/// The named constants correspond to the Unicode blocks this crate operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodepointRange {
    start: u32,
    end: u32,
}

impl CodepointRange {
    /// U+0000..=U+007F
    pub const BASIC_LATIN: CodepointRange = CodepointRange::new(0x0000, 0x007F);
    /// U+3000..=U+303F
    pub const CJK_SYMBOLS_AND_PUNCTUATION: CodepointRange = CodepointRange::new(0x3000, 0x303F);
    /// U+3040..=U+309F
    pub const HIRAGANA: CodepointRange = CodepointRange::new(0x3040, 0x309F);
    /// U+30A0..=U+30FF
    pub const KATAKANA: CodepointRange = CodepointRange::new(0x30A0, 0x30FF);
    /// U+FF00..=U+FFEF
    pub const HALFWIDTH_AND_FULLWIDTH_FORMS: CodepointRange = CodepointRange::new(0xFF00, 0xFFEF);

    /// Creates a range; `start` and `end` are swapped if given out of order
    pub const fn new(start: u32, end: u32) -> Self {
        if start <= end {
            CodepointRange { start, end }
        } else {
            CodepointRange {
                start: end,
                end: start,
            }
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Returns true if the codepoint lies within the range
    pub fn contains(&self, codepoint: u32) -> bool {
        (self.start..=self.end).contains(&codepoint)
    }

    /// Returns the range moved by `delta`, saturating at the codepoint space bounds
    pub fn shifted(&self, delta: i32) -> Self {
        CodepointRange::new(shift(self.start, delta), shift(self.end, delta))
    }
}

fn shift(codepoint: u32, delta: i32) -> u32 {
    codepoint.saturating_add_signed(delta)
}

impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}..=U+{:04X}", self.start, self.end)
    }
}

/// How a pattern rule applies its substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleMode {
    /// Replace every match once
    #[default]
    Single,
    /// Replace repeatedly until the text stops changing
    Recursive,
}

impl RuleMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleMode::Single => "single",
            RuleMode::Recursive => "recursive",
        }
    }
}

/// The concrete normalizers shipped with kanafold
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum NormalizerKind {
    /// Fold CJK width variants and clean whitespace
    #[default]
    Cjk,
    /// Transliterate Katakana to Hiragana
    Hiragana,
    /// Transliterate Hiragana to Katakana
    Katakana,
    /// Widen Basic Latin to fullwidth forms
    Fullwidth,
}

impl NormalizerKind {
    /// All kinds, in declaration order
    pub fn all() -> [NormalizerKind; 4] {
        [
            NormalizerKind::Cjk,
            NormalizerKind::Hiragana,
            NormalizerKind::Katakana,
            NormalizerKind::Fullwidth,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizerKind::Cjk => "cjk",
            NormalizerKind::Hiragana => "hiragana",
            NormalizerKind::Katakana => "katakana",
            NormalizerKind::Fullwidth => "fullwidth",
        }
    }
}

impl fmt::Display for NormalizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
