//! Upload gates applied to card images before OCR.

use std::path::Path;

use tracing::debug;

use crate::error::IntakeError;
use crate::models::config::IntakeConfig;

/// Image formats recognized by their leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSignature {
    Png,
    Jpeg,
    Bmp,
}

impl ImageSignature {
    /// Detect the format from the first bytes of a file.
    pub fn detect(header: &[u8]) -> Option<Self> {
        match header {
            [0x89, 0x50, 0x4E, 0x47, ..] => Some(Self::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x42, 0x4D, ..] => Some(Self::Bmp),
            _ => None,
        }
    }
}

/// Lowercase extension of a file name, with its leading dot.
pub fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e.to_lowercase()))
}

/// Validate an uploaded card image.
///
/// Checks, in order: non-empty, size limit, extension allow list, and the
/// magic bytes of the first 8 bytes. Returns the detected format, which is
/// only `None` when signature checking is disabled.
pub fn validate_upload(
    file_name: &str,
    data: &[u8],
    config: &IntakeConfig,
) -> Result<Option<ImageSignature>, IntakeError> {
    if data.is_empty() {
        return Err(IntakeError::Empty);
    }

    let size = data.len() as u64;
    if size > config.max_file_bytes {
        return Err(IntakeError::TooLarge {
            size,
            max: config.max_file_bytes,
        });
    }

    let extension = file_extension(file_name).unwrap_or_default();
    if extension.is_empty() || !config.allowed_extensions.iter().any(|e| e == &extension) {
        return Err(IntakeError::UnsupportedFormat(extension));
    }

    let header = &data[..data.len().min(8)];
    let signature = ImageSignature::detect(header);

    debug!(
        "Upload {} ({} bytes) detected as {:?}",
        file_name, size, signature
    );

    if signature.is_none() && config.check_signature {
        return Err(IntakeError::InvalidSignature);
    }

    Ok(signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_detect_signatures() {
        assert_eq!(ImageSignature::detect(&PNG_HEADER), Some(ImageSignature::Png));
        assert_eq!(ImageSignature::detect(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageSignature::Jpeg));
        assert_eq!(ImageSignature::detect(b"BM\x00\x00"), Some(ImageSignature::Bmp));
        assert_eq!(ImageSignature::detect(b"II*\x00"), None);
        assert_eq!(ImageSignature::detect(&[0x89]), None);
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("card.PNG"), Some(".png".to_string()));
        assert_eq!(file_extension("scan.back.jpeg"), Some(".jpeg".to_string()));
        assert_eq!(file_extension("README"), None);
    }

    #[test]
    fn test_validate_accepts_png() {
        let config = IntakeConfig::default();
        assert_eq!(validate_upload("card.png", &PNG_HEADER, &config), Ok(Some(ImageSignature::Png)));
    }

    #[test]
    fn test_validate_rejections() {
        let config = IntakeConfig::default();

        assert_eq!(validate_upload("card.png", &[], &config), Err(IntakeError::Empty));
        assert_eq!(
            validate_upload("card.gif", &PNG_HEADER, &config),
            Err(IntakeError::UnsupportedFormat(".gif".to_string()))
        );
        assert_eq!(
            validate_upload("card", &PNG_HEADER, &config),
            Err(IntakeError::UnsupportedFormat(String::new()))
        );
        assert_eq!(
            validate_upload("card.jpg", b"<html>..", &config),
            Err(IntakeError::InvalidSignature)
        );
        // TIFF passes the extension gate but has no accepted signature
        assert_eq!(
            validate_upload("card.tiff", b"II*\x00\x08\x00\x00\x00", &config),
            Err(IntakeError::InvalidSignature)
        );
    }

    #[test]
    fn test_validate_size_limit() {
        let config = IntakeConfig {
            max_file_bytes: 4,
            ..Default::default()
        };
        assert_eq!(
            validate_upload("card.png", &PNG_HEADER, &config),
            Err(IntakeError::TooLarge { size: 8, max: 4 })
        );
    }

    #[test]
    fn test_signature_check_can_be_disabled() {
        let config = IntakeConfig {
            check_signature: false,
            ..Default::default()
        };
        assert_eq!(validate_upload("card.tiff", b"II*\x00", &config), Ok(None));
    }
}
