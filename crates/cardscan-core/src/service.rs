//! Card processing pipeline: intake, OCR, extraction and persistence.

use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::card::ContactParser;
use crate::error::Result;
use crate::intake::validate_upload;
use crate::models::config::{CardscanConfig, IntakeConfig};
use crate::models::contact::{ContactRecord, StoredContact};
use crate::ocr::TextRecognizer;
use crate::storage::CardRepository;

/// Outcome of processing one card.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    /// Sanitized contact fields.
    pub contact: ContactRecord,
    /// The persisted record, unless persistence is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored: Option<StoredContact>,
    /// Parsing warnings.
    pub warnings: Vec<String>,
    /// Text returned by the recognizer.
    pub raw_text: String,
    /// Time spent in OCR in milliseconds.
    pub ocr_time_ms: u64,
    /// Time spent extracting fields in milliseconds.
    pub parse_time_ms: u64,
}

/// Card service tying a recognizer and a store together.
pub struct CardService<R: TextRecognizer, S: CardRepository> {
    recognizer: R,
    repository: S,
    parser: ContactParser,
    intake: IntakeConfig,
    persist: bool,
}

impl<R: TextRecognizer, S: CardRepository> CardService<R, S> {
    /// Create a service with default limits.
    pub fn new(recognizer: R, repository: S) -> Self {
        Self {
            recognizer,
            repository,
            parser: ContactParser::new(),
            intake: IntakeConfig::default(),
            persist: true,
        }
    }

    /// Create a service using extraction and intake settings from configuration.
    pub fn from_config(recognizer: R, repository: S, config: &CardscanConfig) -> Self {
        Self {
            recognizer,
            repository,
            parser: ContactParser::from_config(&config.extraction),
            intake: config.intake.clone(),
            persist: true,
        }
    }

    /// Enable or disable persisting processed records.
    pub fn with_persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    pub fn repository(&self) -> &S {
        &self.repository
    }

    /// Validate an uploaded image, run OCR and process the recognized text.
    pub fn process_upload(&self, file_name: &str, data: &[u8]) -> Result<ProcessOutcome> {
        let signature = validate_upload(file_name, data, &self.intake)?;
        info!(
            "Accepted upload {} ({} bytes, {:?})",
            file_name,
            data.len(),
            signature
        );

        let start = Instant::now();
        let raw_text = self.recognizer.recognize(data)?;
        let ocr_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "{} recognized {} characters in {}ms",
            self.recognizer.name(),
            raw_text.chars().count(),
            ocr_time_ms
        );

        let mut outcome = self.process_text(&raw_text)?;
        outcome.ocr_time_ms = ocr_time_ms;
        Ok(outcome)
    }

    /// Process already recognized text.
    pub fn process_text(&self, text: &str) -> Result<ProcessOutcome> {
        let result = self.parser.parse(text);

        if result.contact.is_empty() {
            warn!("No contact fields survived extraction");
        }

        let stored = if self.persist {
            Some(self.repository.add(result.contact.clone())?)
        } else {
            None
        };

        Ok(ProcessOutcome {
            contact: result.contact,
            stored,
            warnings: result.warnings,
            raw_text: text.to_string(),
            ocr_time_ms: 0,
            parse_time_ms: result.processing_time_ms,
        })
    }

    /// All stored records, newest first.
    pub fn list_all(&self) -> Result<Vec<StoredContact>> {
        Ok(self.repository.list_all()?)
    }
}
