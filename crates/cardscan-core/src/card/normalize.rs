//! Text normalization helpers shared by the extractor and sanitizer.
//!
//! All lengths are counted in characters, not bytes.

use super::rules::patterns::PHONE_NOISE;

/// Cut `text` to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Length of `text` in characters.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split OCR text into trimmed, non-empty lines.
///
/// The input is cut to `max_text_chars` first and at most `max_lines` lines
/// are returned, in their original order.
pub fn card_lines(text: &str, max_text_chars: usize, max_lines: usize) -> Vec<&str> {
    truncate_chars(text, max_text_chars)
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(max_lines)
        .collect()
}

/// Remove spaces, hyphens, parentheses and periods.
pub fn strip_phone_noise(line: &str) -> String {
    line.chars().filter(|c| !PHONE_NOISE.contains(c)).collect()
}
