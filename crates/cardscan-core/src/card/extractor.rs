//! Line-order heuristic extractor for business card text.

use tracing::{debug, trace};

use super::normalize::{card_lines, char_len};
use super::rules::{
    contains_company_keyword, is_phone_shaped, CompanyExtractor, EmailExtractor, FieldExtractor,
    PhoneExtractor,
};
use super::CandidateExtractor;
use crate::models::config::ExtractionConfig;
use crate::models::contact::CandidateRecord;

/// Rule-based contact extractor.
///
/// Lines are visited once, top to bottom. Each field keeps the first value
/// found; within a line, email is checked before phone and phone before
/// company. The name is chosen in a separate pass as the first line that
/// looks like none of the other fields.
pub struct ContactExtractor {
    max_text_chars: usize,
    max_lines: usize,
    max_line_chars: usize,
    max_name_chars: usize,
    email: EmailExtractor,
    phone: PhoneExtractor,
    company: CompanyExtractor,
}

impl ContactExtractor {
    /// Create a new extractor with default limits.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            max_text_chars: config.max_text_chars,
            max_lines: config.max_lines,
            max_line_chars: config.max_line_chars,
            max_name_chars: config.max_field_chars,
            email: EmailExtractor::new().with_max_chars(config.max_field_chars),
            phone: PhoneExtractor::new().with_max_scan_chars(config.max_phone_scan_chars),
            company: CompanyExtractor::new().with_max_chars(config.max_field_chars),
        }
    }

    /// Set the number of lines considered.
    pub fn with_max_lines(mut self, max: usize) -> Self {
        self.max_lines = max;
        self
    }

    /// Set the length above which a line is skipped.
    pub fn with_max_line_chars(mut self, max: usize) -> Self {
        self.max_line_chars = max;
        self
    }

    fn is_name_line(&self, line: &str) -> bool {
        let len = char_len(line);
        !self.email.matches(line)
            && !is_phone_shaped(line)
            && !contains_company_keyword(line)
            && len > 2
            && len <= self.max_name_chars
    }
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateExtractor for ContactExtractor {
    fn extract(&self, text: &str) -> CandidateRecord {
        let lines = card_lines(text, self.max_text_chars, self.max_lines);
        if lines.is_empty() {
            return CandidateRecord::default();
        }

        debug!("Scanning {} card lines", lines.len());

        let mut email: Option<String> = None;
        let mut phone: Option<String> = None;
        let mut company: Option<String> = None;

        for (idx, line) in lines.iter().enumerate() {
            if char_len(line) > self.max_line_chars {
                debug!("Skipping oversized line {} ({} chars)", idx, char_len(line));
                continue;
            }

            if email.is_none() {
                email = self.email.extract(line);
            }

            if phone.is_none() {
                phone = self.phone.extract(line);
            }

            if company.is_none()
                && email.as_deref() != Some(*line)
                && phone.as_deref() != Some(*line)
            {
                company = self.company.extract(line);
            }
        }

        let name = lines
            .iter()
            .find(|line| self.is_name_line(line))
            .map(|line| line.to_string());

        trace!(
            "Extraction pass complete: name={} email={} phone={} company={}",
            name.is_some(),
            email.is_some(),
            phone.is_some(),
            company.is_some()
        );

        CandidateRecord {
            name,
            email,
            phone,
            company,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> CandidateRecord {
        ContactExtractor::new().extract(text)
    }

    #[test]
    fn test_extract_full_card() {
        let candidate = extract("John Smith\njohn@example.com\n+1 415 555 0100\nAcme Corp Inc");

        assert_eq!(
            candidate,
            CandidateRecord {
                name: Some("John Smith".to_string()),
                email: Some("john@example.com".to_string()),
                phone: Some("+14155550100".to_string()),
                company: Some("Acme Corp Inc".to_string()),
            }
        );
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(extract("").is_empty());
        assert!(extract(" \r\n\t\n ").is_empty());
    }

    #[test]
    fn test_first_match_wins() {
        let candidate = extract("a@one.com\nb@two.com\n415 555 0100\n650 253 0000");
        assert_eq!(candidate.email.as_deref(), Some("a@one.com"));
        assert_eq!(candidate.phone.as_deref(), Some("4155550100"));
    }

    #[test]
    fn test_invalid_phone_line_does_not_block_later_line() {
        let candidate = extract("Fax 999 555 0100\nTel 415 555 0100");
        assert_eq!(candidate.phone.as_deref(), Some("4155550100"));
    }

    #[test]
    fn test_email_line_not_reused_as_company() {
        // ".com" contains the "co" keyword
        let candidate = extract("sales@example.com\nInitech LLC");
        assert_eq!(candidate.email.as_deref(), Some("sales@example.com"));
        assert_eq!(candidate.company.as_deref(), Some("Initech LLC"));
    }

    #[test]
    fn test_company_line_with_email_text_kept() {
        // Line differs from the bare email match, so it can still be a company
        let candidate = extract("Email: info@example.com");
        assert_eq!(candidate.company.as_deref(), Some("Email: info@example.com"));
    }

    #[test]
    fn test_name_excludes_keyword_lines() {
        let candidate = extract("Jacob Miller\nJane Doe");
        assert_eq!(candidate.name.as_deref(), Some("Jane Doe"));
        assert_eq!(candidate.company.as_deref(), Some("Jacob Miller"));
    }

    #[test]
    fn test_email_line_is_not_a_name() {
        // No company keyword in ".org", so only the email rule keeps it out
        let candidate = extract("jane@example.org\nJane Doe");
        assert_eq!(candidate.email.as_deref(), Some("jane@example.org"));
        assert_eq!(candidate.company, None);
        assert_eq!(candidate.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_name_longer_than_cap_is_skipped() {
        // Short enough for the line pass, too long for a name
        let line = "Q".repeat(150);
        let candidate = extract(&format!("{}\nJane Doe", line));
        assert_eq!(candidate.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_name_requires_three_chars() {
        let candidate = extract("JD\nJane Doe");
        assert_eq!(candidate.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_all_zero_phone_blocks_everything() {
        assert!(extract("0000000").is_empty());
    }

    #[test]
    fn test_oversized_line_skipped() {
        let long = format!("Acme Inc jane@example.com 4155550100 {}", "x".repeat(250));
        let candidate = extract(&format!("{}\nJane Doe", long));

        assert_eq!(candidate.name.as_deref(), Some("Jane Doe"));
        assert_eq!(candidate.email, None);
        assert_eq!(candidate.phone, None);
        assert_eq!(candidate.company, None);
    }

    #[test]
    fn test_only_first_twenty_lines() {
        let mut lines: Vec<String> = (0..20).map(|i| format!("{}", i)).collect();
        lines.push("jane@example.com".to_string());
        let candidate = extract(&lines.join("\n"));
        assert_eq!(candidate.email, None);
    }

    #[test]
    fn test_custom_line_limit() {
        let extractor = ContactExtractor::new().with_max_lines(1);
        let candidate = extractor.extract("Jane Doe\njane@example.com");
        assert_eq!(candidate.name.as_deref(), Some("Jane Doe"));
        assert_eq!(candidate.email, None);
    }

    #[test]
    fn test_company_truncated_to_cap() {
        let line = format!("Globex Corporation {}", "y".repeat(120));
        let candidate = extract(&line);
        assert_eq!(candidate.company.map(|c| c.chars().count()), Some(100));
    }
}
