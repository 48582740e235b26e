//! Email address extraction.

use super::FieldExtractor;
use super::patterns::EMAIL;
use crate::card::normalize::char_len;

/// Email field extractor.
pub struct EmailExtractor {
    max_chars: usize,
}

impl EmailExtractor {
    /// Create a new email extractor.
    pub fn new() -> Self {
        Self { max_chars: 100 }
    }

    /// Set the longest accepted match.
    pub fn with_max_chars(mut self, max: usize) -> Self {
        self.max_chars = max;
        self
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for EmailExtractor {
    type Output = String;

    /// Only the first match in the line is considered; an oversized first
    /// match yields nothing rather than falling through to a later one.
    fn extract(&self, line: &str) -> Option<String> {
        EMAIL
            .find(line)
            .map(|m| m.as_str())
            .filter(|email| char_len(email) <= self.max_chars)
            .map(str::to_string)
    }

    fn matches(&self, line: &str) -> bool {
        EMAIL.is_match(line)
    }
}

/// Extract an email address from text.
pub fn extract_email(text: &str) -> Option<String> {
    EmailExtractor::new().extract(text)
}
