//! Candidate sanitization.
//!
//! Turns untrusted candidates into trusted fields. Every rule degrades to
//! "unset" instead of failing: a value is either fully cleaned or dropped.

use tracing::debug;

use super::normalize::truncate_chars;
use super::rules::phone::{is_valid_phone, MAX_PHONE_LEN, MIN_PHONE_LEN};
use crate::models::contact::{CandidateRecord, ContactRecord, PhoneNumber, SafeText};

/// Characters removed outright from text fields.
pub const FORBIDDEN_CHARS: [char; 5] = ['<', '>', '"', '\'', '&'];

/// Clean a free-text value.
///
/// Blank input is dropped. Otherwise markup-significant characters are
/// removed (not escaped), the result is trimmed and cut to `max_chars`.
/// A value with nothing left after cleaning is dropped as well.
pub fn clean_text(raw: &str, max_chars: usize) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }

    let stripped: String = raw.chars().filter(|c| !FORBIDDEN_CHARS.contains(c)).collect();
    let cleaned = truncate_chars(stripped.trim(), max_chars);

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Whether a value already satisfies the trusted text rules.
pub fn is_clean_text(value: &str, max_chars: usize) -> bool {
    !value.trim().is_empty()
        && value.chars().count() <= max_chars
        && !value.chars().any(|c| FORBIDDEN_CHARS.contains(&c))
}

/// Normalize a phone value to digits with an optional leading `+`.
pub fn normalize_phone(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();

    if !(MIN_PHONE_LEN..=MAX_PHONE_LEN).contains(&digits.len()) {
        return None;
    }

    if !is_valid_phone(&digits) {
        return None;
    }

    Some(digits)
}

/// Sanitize every field of a candidate record independently.
pub fn sanitize(candidate: &CandidateRecord) -> ContactRecord {
    let record = ContactRecord {
        name: candidate.name.as_deref().and_then(SafeText::sanitize),
        email: candidate.email.as_deref().and_then(SafeText::sanitize),
        phone: candidate.phone.as_deref().and_then(PhoneNumber::parse),
        company: candidate.company.as_deref().and_then(SafeText::sanitize),
    };

    debug!(
        "Sanitized {} candidate fields into {} trusted fields",
        [&candidate.name, &candidate.email, &candidate.phone, &candidate.company]
            .iter()
            .filter(|f| f.is_some())
            .count(),
        record.field_count()
    );

    record
}
