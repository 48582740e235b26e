//! Phone number extraction and validation.

use tracing::trace;

use super::FieldExtractor;
use super::patterns::{
    PHONE_DIGIT_RUN, PHONE_GROUPED, PHONE_GROUP_SEPARATORS, PHONE_INTERNATIONAL, PHONE_REJECTED,
    PHONE_SHAPE,
};
use crate::card::normalize::{char_len, strip_phone_noise, truncate_chars};

/// Shortest accepted phone number, `+` included.
pub const MIN_PHONE_LEN: usize = 7;

/// Longest accepted phone number, `+` included.
pub const MAX_PHONE_LEN: usize = 15;

/// Phone field extractor.
pub struct PhoneExtractor {
    max_scan_chars: usize,
}

impl PhoneExtractor {
    /// Create a new phone extractor.
    pub fn new() -> Self {
        Self { max_scan_chars: 100 }
    }

    /// Set how much of a line is scanned.
    pub fn with_max_scan_chars(mut self, max: usize) -> Self {
        self.max_scan_chars = max;
        self
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PhoneExtractor {
    type Output = String;

    /// Extract a phone number that also passes [`is_valid_phone`].
    fn extract(&self, line: &str) -> Option<String> {
        let candidate = extract_phone_with_limit(line, self.max_scan_chars)?;
        if is_valid_phone(&candidate) {
            Some(candidate)
        } else {
            trace!("Rejected phone-shaped value {:?}", candidate);
            None
        }
    }

    fn matches(&self, line: &str) -> bool {
        is_phone_shaped(line)
    }
}

/// Find a phone number in a single line.
///
/// Tries, in order: a bounded 7-15 digit run in the de-noised line, an
/// international-looking run in the de-noised line, and a grouped
/// `ddd-ddd-dddd` number in the line as written. The result is not validated.
pub fn extract_phone(line: &str) -> Option<String> {
    extract_phone_with_limit(line, 100)
}

fn extract_phone_with_limit(line: &str, max_scan_chars: usize) -> Option<String> {
    let line = truncate_chars(line, max_scan_chars);
    let clean = strip_phone_noise(line);

    if let Some(m) = PHONE_DIGIT_RUN.find(&clean) {
        return Some(m.as_str().to_string());
    }

    if let Some(m) = PHONE_INTERNATIONAL.find(&clean) {
        return Some(m.as_str().to_string());
    }

    PHONE_GROUPED.find(line).map(|m| {
        m.as_str()
            .chars()
            .filter(|c| !PHONE_GROUP_SEPARATORS.contains(c))
            .collect()
    })
}

/// Whether a line looks like a phone number, valid or not.
///
/// Used to keep phone lines out of name detection.
pub fn is_phone_shaped(line: &str) -> bool {
    let clean = strip_phone_noise(line);
    PHONE_DIGIT_RUN.is_match(&clean) || PHONE_INTERNATIONAL.is_match(&clean)
}

/// Validate a normalized phone number.
///
/// Accepts 7-15 characters made of an optional leading `+` and digits,
/// excluding all-zero, all-one, `1234567...`, `999...` and `000...` numbers.
/// Rejected shapes are checked on the digits, with any `+` prefix removed.
pub fn is_valid_phone(phone: &str) -> bool {
    let len = char_len(phone);
    if !(MIN_PHONE_LEN..=MAX_PHONE_LEN).contains(&len) {
        return false;
    }

    if !PHONE_SHAPE.is_match(phone) {
        return false;
    }

    let digits = phone.strip_prefix('+').unwrap_or(phone);
    !PHONE_REJECTED.is_match(digits)
}
