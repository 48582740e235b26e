//! Company line detection.

use super::FieldExtractor;
use super::patterns::COMPANY_KEYWORDS;
use crate::card::normalize::truncate_chars;

/// Company field extractor.
///
/// Keyword matching is a plain case-insensitive substring test, so short
/// keywords such as "co" also hit words like "Jacob" or ".com".
pub struct CompanyExtractor {
    max_chars: usize,
}

impl CompanyExtractor {
    /// Create a new company extractor.
    pub fn new() -> Self {
        Self { max_chars: 100 }
    }

    /// Set the length company lines are cut to.
    pub fn with_max_chars(mut self, max: usize) -> Self {
        self.max_chars = max;
        self
    }
}

impl Default for CompanyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CompanyExtractor {
    type Output = String;

    fn extract(&self, line: &str) -> Option<String> {
        if self.matches(line) {
            Some(truncate_chars(line, self.max_chars).to_string())
        } else {
            None
        }
    }

    fn matches(&self, line: &str) -> bool {
        contains_company_keyword(line)
    }
}

/// Check whether text contains any company keyword.
pub fn contains_company_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    COMPANY_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_case_insensitive() {
        assert!(contains_company_keyword("Globex CORPORATION"));
        assert!(contains_company_keyword("Initech GmbH"));
        assert!(contains_company_keyword("Hooli Solutions"));
        assert!(!contains_company_keyword("Jane Doe"));
    }

    #[test]
    fn test_short_keyword_overlap() {
        assert!(contains_company_keyword("Jacob Smith"));
        assert!(contains_company_keyword("jane@example.com"));
    }

    #[test]
    fn test_extract_truncates() {
        let line = format!("Acme Inc {}", "x".repeat(150));
        let company = CompanyExtractor::new().extract(&line).unwrap();
        assert_eq!(company.chars().count(), 100);
        assert!(company.starts_with("Acme Inc"));
    }
}
