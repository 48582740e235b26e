//! Configuration structures for the card pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the cardscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardscanConfig {
    /// Contact extraction limits.
    pub extraction: ExtractionConfig,

    /// Upload intake gates.
    pub intake: IntakeConfig,

    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Contact store configuration.
    pub storage: StorageConfig,
}

/// Limits applied while scanning OCR text for contact fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Input is cut to this many characters before splitting into lines.
    pub max_text_chars: usize,

    /// Number of non-empty lines considered.
    pub max_lines: usize,

    /// Lines longer than this are skipped by field detection.
    pub max_line_chars: usize,

    /// Cap on email, company and name candidates.
    pub max_field_chars: usize,

    /// A line is cut to this many characters before phone scanning.
    pub max_phone_scan_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_text_chars: 10_000,
            max_lines: 20,
            max_line_chars: 200,
            max_field_chars: 100,
            max_phone_scan_chars: 100,
        }
    }
}

/// Gates applied to uploaded card images before OCR.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Maximum accepted file size in bytes.
    pub max_file_bytes: u64,

    /// Accepted file extensions (lowercase, with leading dot).
    pub allowed_extensions: Vec<String>,

    /// Verify the leading magic bytes of the file.
    pub check_signature: bool,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 5 * 1024 * 1024,
            allowed_extensions: [".png", ".jpg", ".jpeg", ".bmp", ".tiff"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            check_signature: true,
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Longer image side is scaled down to this many pixels.
    pub max_image_size: u32,

    /// Contrast adjustment applied after grayscale conversion.
    pub contrast: f32,

    /// Binarize the image before recognition.
    pub binarize: bool,

    /// Luma threshold used when binarizing (0-255).
    pub threshold: u8,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            max_image_size: 1600,
            contrast: 10.0,
            binarize: true,
            threshold: 128,
        }
    }
}

/// Contact store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding stored contacts.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("cards.json"),
        }
    }
}

impl CardscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.ocr.model_dir.join(model_name)
    }
}
