//! WASM bindings for business card contact extraction.
//!
//! OCR runs elsewhere (for example in the browser); these bindings take the
//! recognized text and return sanitized contact fields.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use cardscan_core::card::rules;
use cardscan_core::{CandidateRecord, ContactParser, ContactRecord, SafeText};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract a sanitized contact record from card text.
#[wasm_bindgen]
pub fn process_card_text(text: &str) -> Result<JsValue, JsValue> {
    let record: ContactRecord = cardscan_core::process(text);
    to_js(&record)
}

/// Extract raw, unsanitized candidates from card text.
#[wasm_bindgen]
pub fn extract_candidates(text: &str) -> Result<JsValue, JsValue> {
    let candidate: CandidateRecord = cardscan_core::extract(text);
    to_js(&candidate)
}

/// Check a normalized phone number (digits with optional leading `+`).
#[wasm_bindgen]
pub fn is_valid_phone(phone: &str) -> bool {
    rules::is_valid_phone(phone)
}

/// Sanitize free text the way name, email and company fields are sanitized.
#[wasm_bindgen]
pub fn sanitize_text(text: &str) -> Option<String> {
    SafeText::sanitize(text).map(SafeText::into_inner)
}

/// Card extractor class for browser use.
#[wasm_bindgen]
pub struct CardExtractor {
    parser: ContactParser,
}

#[wasm_bindgen]
impl CardExtractor {
    /// Create a new card extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: ContactParser::new(),
        }
    }

    /// Extract a sanitized contact record.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.process(text))
    }

    /// Extract a contact record along with candidates and warnings.
    #[wasm_bindgen]
    pub fn extract_with_warnings(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text))
    }
}

impl Default for CardExtractor {
    fn default() -> Self {
        Self::new()
    }
}
