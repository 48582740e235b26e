//! OCR collaborator: turns a card image into raw text.
//!
//! The extraction core never looks inside an engine; it only consumes the
//! text returned by [`TextRecognizer::recognize`].

mod preprocessing;
#[cfg(feature = "native")]
mod pure_engine;

pub use preprocessing::ImagePreprocessor;
#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Trait that all OCR engines must implement.
pub trait TextRecognizer: Send + Sync {
    /// Returns the engine identifier.
    fn name(&self) -> &'static str;

    /// Recognize text in an encoded image. May return an empty string.
    fn recognize(&self, image: &[u8]) -> Result<String, OcrError>;
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        (**self).recognize(image)
    }
}

/// Recognizer that ignores the image and returns fixed text.
///
/// Stands in for a real engine when the text is already known, for example
/// a transcript supplied next to the image.
#[derive(Debug, Clone, Default)]
pub struct StaticRecognizer {
    text: String,
}

impl StaticRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextRecognizer for StaticRecognizer {
    fn name(&self) -> &'static str {
        "static"
    }

    fn recognize(&self, _image: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

/// Create the default OCR engine from configuration.
#[cfg(feature = "native")]
pub fn create_engine(config: &OcrConfig) -> Result<Box<dyn TextRecognizer>, OcrError> {
    Ok(Box::new(PureOcrEngine::from_config(config)?))
}

/// Create the default OCR engine from configuration.
#[cfg(not(feature = "native"))]
pub fn create_engine(_config: &OcrConfig) -> Result<Box<dyn TextRecognizer>, OcrError> {
    Err(OcrError::Unavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_recognizer() {
        let recognizer: Box<dyn TextRecognizer> = Box::new(StaticRecognizer::new("Jane Doe"));
        assert_eq!(recognizer.name(), "static");
        assert_eq!(recognizer.recognize(&[]).unwrap(), "Jane Doe");
    }

    #[test]
    fn test_create_engine_missing_models() {
        let config = OcrConfig {
            model_dir: "/nonexistent/cardscan-models".into(),
            ..Default::default()
        };
        assert!(create_engine(&config).is_err());
    }
}
