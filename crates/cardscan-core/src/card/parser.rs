//! Contact parser combining extraction and sanitization.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use super::extractor::ContactExtractor;
use super::sanitize::sanitize;
use super::CandidateExtractor;
use crate::models::config::ExtractionConfig;
use crate::models::contact::{CandidateRecord, ContactRecord};

/// Result of parsing card text.
#[derive(Debug, Clone, Serialize)]
pub struct ParseResult {
    /// Untrusted candidates, kept for diagnostics.
    pub candidate: CandidateRecord,
    /// Sanitized contact fields.
    pub contact: ContactRecord,
    /// Parsing warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Parser turning raw OCR text into a sanitized contact.
pub struct ContactParser {
    extractor: ContactExtractor,
}

impl ContactParser {
    /// Create a new parser with default limits.
    pub fn new() -> Self {
        Self {
            extractor: ContactExtractor::new(),
        }
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            extractor: ContactExtractor::from_config(config),
        }
    }

    /// Use a custom extractor.
    pub fn with_extractor(mut self, extractor: ContactExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Extract and sanitize, returning only the trusted record.
    pub fn process(&self, text: &str) -> ContactRecord {
        sanitize(&self.extractor.extract(text))
    }

    /// Extract and sanitize, collecting warnings about missing fields.
    pub fn parse(&self, text: &str) -> ParseResult {
        let start = start_timer();

        info!("Parsing card from {} characters of text", text.chars().count());

        let candidate = self.extractor.extract(text);
        let contact = sanitize(&candidate);

        let fields = [
            ("name", candidate.name.is_some(), contact.name.is_some()),
            ("email", candidate.email.is_some(), contact.email.is_some()),
            ("phone", candidate.phone.is_some(), contact.phone.is_some()),
            ("company", candidate.company.is_some(), contact.company.is_some()),
        ];

        let mut warnings = Vec::new();
        for (field, found, kept) in fields {
            if !found {
                warnings.push(format!("Could not extract {}", field));
            } else if !kept {
                warnings.push(format!("Discarded {} candidate", field));
            }
        }

        debug!(
            "Extracted {} of 4 contact fields with {} warnings",
            contact.field_count(),
            warnings.len()
        );

        ParseResult {
            candidate,
            contact,
            warnings,
            processing_time_ms: elapsed_ms(start),
        }
    }
}

// wasm32 has no monotonic clock; timings read 0 there.
#[cfg(not(target_arch = "wasm32"))]
fn start_timer() -> Option<Instant> {
    Some(Instant::now())
}

#[cfg(target_arch = "wasm32")]
fn start_timer() -> Option<Instant> {
    None
}

fn elapsed_ms(start: Option<Instant>) -> u64 {
    start.map(|s| s.elapsed().as_millis() as u64).unwrap_or(0)
}

impl Default for ContactParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_reports_missing_fields() {
        let result = ContactParser::new().parse("Jane Doe\njane@example.com");

        assert_eq!(result.contact.name(), Some("Jane Doe"));
        assert_eq!(
            result.warnings,
            vec![
                "Could not extract phone".to_string(),
                "Could not extract company".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_reports_discarded_candidate() {
        // The only non-blank characters are markup, so the sanitizer drops it
        let result = ContactParser::new().parse("<<>>\"\"\n");

        assert_eq!(result.candidate.name.as_deref(), Some("<<>>\"\""));
        assert_eq!(result.contact.name, None);
        assert!(result.warnings.contains(&"Discarded name candidate".to_string()));
    }

    #[test]
    fn test_process_matches_parse() {
        let parser = ContactParser::new();
        let text = "Dr. Ada Lovelace\nAnalytical Engines Ltd\nada@engines.example\n020 7946 0958";
        assert_eq!(parser.process(text), parser.parse(text).contact);
    }
}
