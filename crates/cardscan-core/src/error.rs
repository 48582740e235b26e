//! Error types for the cardscan-core library.
//!
//! Extraction and sanitization never fail; these errors belong to the
//! collaborators around them (upload intake, OCR, storage).

use thiserror::Error;

/// Main error type for the cardscan library.
#[derive(Error, Debug)]
pub enum CardError {
    /// Uploaded file was rejected before OCR.
    #[error("intake error: {0}")]
    Intake(#[from] IntakeError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Persistence error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Reasons an uploaded card image is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    /// No bytes were supplied.
    #[error("Please select a file.")]
    Empty,

    /// File exceeds the configured size limit.
    #[error("File size too large ({size} bytes). Maximum size is {max} bytes.")]
    TooLarge { size: u64, max: u64 },

    /// Extension missing or not in the allow list.
    #[error("Invalid file format '{0}'. Supported formats: PNG, JPG, JPEG, BMP, TIFF.")]
    UnsupportedFormat(String),

    /// Leading bytes do not match a known image signature.
    #[error("Invalid image file.")]
    InvalidSignature,
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Image could not be decoded or preprocessed.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Binary was built without an OCR backend.
    #[error("OCR support is not available in this build")]
    Unavailable,
}

/// Errors related to the contact store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying file could not be read or written.
    #[error("store I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored data failed to parse or revalidate.
    #[error("store is corrupt: {0}")]
    Corrupt(String),

    /// File store write lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Result type for the cardscan library.
pub type Result<T> = std::result::Result<T, CardError>;
