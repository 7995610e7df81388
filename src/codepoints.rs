#![forbid(unsafe_code)]

//! Conversion between text and raw Unicode codepoint sequences
//!
//! Invalid codepoints (surrogate halves, values above U+10FFFF) are dropped
//! silently, never replaced with U+FFFD.

/// Returns the codepoints of `text` in order
pub fn text_to_codepoints(text: &str) -> Vec<u32> {
    text.chars().map(u32::from).collect()
}

/// Builds text from codepoints, dropping any that are not valid scalar values
pub fn codepoints_to_text(codepoints: &[u32]) -> String {
    codepoints.iter().copied().filter_map(char::from_u32).collect()
}

/// Returns only the codepoints that are valid Unicode scalar values
pub fn valid_codepoints(codepoints: &[u32]) -> Vec<u32> {
    codepoints
        .iter()
        .copied()
        .filter(|&codepoint| char::from_u32(codepoint).is_some())
        .collect()
}
