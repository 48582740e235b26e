//! Core library for business card OCR processing.
//!
//! This crate provides:
//! - Upload intake gates (size, extension, magic bytes)
//! - OCR pipeline using PaddleOCR models via `pure-onnx-ocr`
//! - Contact field extraction (name, email, phone, company)
//! - Sanitization into trusted contact records
//! - Contact storage (in memory or JSON file)

pub mod card;
pub mod error;
pub mod intake;
pub mod models;
pub mod ocr;
pub mod service;
pub mod storage;

pub use card::{extract, process, sanitize, CandidateExtractor, ContactExtractor, ContactParser, ParseResult};
pub use error::{CardError, IntakeError, OcrError, Result, StorageError};
pub use intake::{validate_upload, ImageSignature};
pub use models::config::CardscanConfig;
pub use models::contact::{
    CandidateRecord, ContactId, ContactRecord, PhoneNumber, SafeText, StoredContact,
};
pub use ocr::{create_engine, StaticRecognizer, TextRecognizer};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use service::{CardService, ProcessOutcome};
pub use storage::{CardRepository, JsonFileRepository, MemoryRepository};
