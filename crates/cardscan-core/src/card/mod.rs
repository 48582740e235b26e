//! Business card contact extraction.
//!
//! Raw OCR text flows through two stages: [`ContactExtractor`] picks at most
//! one untrusted candidate per field, then [`sanitize`] turns candidates into
//! trusted fields. Neither stage fails; bad input only leaves fields unset.

mod extractor;
pub mod normalize;
mod parser;
pub mod rules;
pub mod sanitize;

pub use extractor::ContactExtractor;
pub use parser::{ContactParser, ParseResult};
pub use sanitize::sanitize;

use crate::models::contact::{CandidateRecord, ContactRecord};

/// Trait for contact candidate extractors.
pub trait CandidateExtractor {
    /// Extract untrusted field candidates from OCR text.
    fn extract(&self, text: &str) -> CandidateRecord;
}

/// Extract candidates from text with default limits.
pub fn extract(text: &str) -> CandidateRecord {
    ContactExtractor::new().extract(text)
}

/// Extract and sanitize text into a trusted contact record.
pub fn process(text: &str) -> ContactRecord {
    sanitize(&extract(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::rules::{is_valid_phone, EMAIL};
    use super::sanitize::FORBIDDEN_CHARS;
    use pretty_assertions::assert_eq;

    const NOISY_CARDS: &[&str] = &[
        "",
        "\n\n\r\r",
        "John Smith\njohn@example.com\n+1 415 555 0100\nAcme Corp Inc",
        "<script>alert(1)</script>\nAcme Ltd",
        "0000000",
        "JANE ROE | CTO\nroe@globex.example | +49 (30) 1234-5678\nGlobex GmbH",
        "\"Quoted\" 'Name' & <Co>\n1111111\n999-555-0100\n000 555 0100\n12345678",
        "ç∂ƒ©˙∆˚¬…æ\n☎ +33 1 42 68 53 00\nSociété Générale Group",
        "a@b.cc\n\u{0}\u{7}\u{1b}[31m red\nx",
    ];

    #[test]
    fn test_scenario_full_card() {
        let record = process("John Smith\njohn@example.com\n+1 415 555 0100\nAcme Corp Inc");

        assert_eq!(record.name(), Some("John Smith"));
        assert_eq!(record.email(), Some("john@example.com"));
        assert_eq!(record.phone(), Some("+14155550100"));
        assert_eq!(record.company(), Some("Acme Corp Inc"));
    }

    #[test]
    fn test_scenario_all_zero_number() {
        assert!(process("0000000").is_empty());
    }

    #[test]
    fn test_scenario_oversized_line() {
        let line = "Q".repeat(250);
        assert!(process(&line).is_empty());
    }

    #[test]
    fn test_scenario_markup_removed() {
        let record = process("<script>alert(1)</script>\nAcme Ltd");
        assert_eq!(record.name(), Some("scriptalert(1)/script"));
        assert_eq!(record.company(), Some("Acme Ltd"));
    }

    #[test]
    fn test_scenario_empty_input() {
        assert_eq!(process(""), ContactRecord::default());
    }

    #[test]
    fn test_process_is_idempotent() {
        for card in NOISY_CARDS {
            assert_eq!(process(card), process(card));
        }
    }

    #[test]
    fn test_trusted_fields_hold_invariants() {
        for card in NOISY_CARDS {
            let record = process(card);

            if let Some(phone) = record.phone() {
                assert!(is_valid_phone(phone), "bad phone {:?} from {:?}", phone, card);
            }
            if let Some(email) = record.email() {
                assert!(EMAIL.is_match(email));
                assert!(email.chars().count() <= 100);
            }
            for text in [record.name(), record.email(), record.company()].into_iter().flatten() {
                assert!(!text.chars().any(|c| FORBIDDEN_CHARS.contains(&c)));
                assert!(text.chars().count() <= 100);
            }
        }
    }

    #[test]
    fn test_huge_input_is_bounded() {
        let text = "Jane Doe\n".repeat(50_000);
        let record = process(&text);
        assert_eq!(record.name(), Some("Jane Doe"));
    }

    #[test]
    fn test_rejected_shapes_never_selected() {
        let record = process("1111111\n999-555-0100\n000 555 0100\n12345678");
        assert_eq!(record.phone(), None);
    }

    #[test]
    fn test_rejected_shapes_with_plus_prefix() {
        for card in ["+0000000", "+1111111", "+999 555 0100", "+1234567890", "+000 555 0100"] {
            assert_eq!(process(card).phone(), None, "accepted phone from {:?}", card);
        }
    }

    #[tokio::test]
    async fn test_concurrent_processing_is_independent() {
        let handles: Vec<_> = NOISY_CARDS
            .iter()
            .map(|card| {
                let card = card.to_string();
                tokio::task::spawn_blocking(move || (process(&card), card))
            })
            .collect();

        for handle in handles {
            let (record, card) = handle.await.unwrap();
            assert_eq!(record, process(&card));
        }
    }
}
