//! Image preprocessing for card OCR.

use image::{DynamicImage, GenericImageView, GrayImage, Luma};
use tracing::debug;

use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Image preprocessor for the card OCR pipeline.
///
/// Cards are photographed at arbitrary resolutions and lighting, so images
/// are shrunk, converted to grayscale, given a slight contrast boost and
/// binarized before recognition.
pub struct ImagePreprocessor {
    /// Maximum image dimension.
    max_size: u32,
    /// Contrast adjustment (percent).
    contrast: f32,
    /// Whether to binarize.
    binarize: bool,
    /// Luma threshold for binarization.
    threshold: u8,
}

impl ImagePreprocessor {
    /// Create a new preprocessor with default settings.
    pub fn new() -> Self {
        Self {
            max_size: 1600,
            contrast: 10.0,
            binarize: true,
            threshold: 128,
        }
    }

    /// Create a preprocessor from OCR configuration.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            max_size: config.max_image_size,
            contrast: config.contrast,
            binarize: config.binarize,
            threshold: config.threshold,
        }
    }

    /// Set maximum image dimension.
    pub fn with_max_size(mut self, size: u32) -> Self {
        self.max_size = size;
        self
    }

    /// Enable or disable binarization.
    pub fn with_binarize(mut self, binarize: bool) -> Self {
        self.binarize = binarize;
        self
    }

    /// Decode an encoded image (PNG, JPEG, BMP, ...).
    pub fn decode(&self, data: &[u8]) -> Result<DynamicImage, OcrError> {
        image::load_from_memory(data).map_err(|e| OcrError::InvalidImage(e.to_string()))
    }

    /// Prepare a decoded image for recognition.
    pub fn prepare(&self, image: &DynamicImage) -> DynamicImage {
        let (orig_width, orig_height) = image.dimensions();
        let (new_width, new_height) =
            self.calculate_resize_dimensions(orig_width, orig_height, self.max_size);

        let resized = if (new_width, new_height) != (orig_width, orig_height) {
            debug!(
                "Resizing card image {}x{} -> {}x{}",
                orig_width, orig_height, new_width, new_height
            );
            image.resize_exact(new_width, new_height, image::imageops::FilterType::Lanczos3)
        } else {
            image.clone()
        };

        let enhanced = resized.grayscale().adjust_contrast(self.contrast);

        if self.binarize {
            DynamicImage::ImageLuma8(self.threshold_image(&enhanced.to_luma8()))
        } else {
            enhanced
        }
    }

    fn calculate_resize_dimensions(
        &self,
        width: u32,
        height: u32,
        target_size: u32,
    ) -> (u32, u32) {
        let max_dim = width.max(height);

        if max_dim <= target_size {
            return (width, height);
        }

        let scale = target_size as f32 / max_dim as f32;
        let new_width = (width as f32 * scale) as u32;
        let new_height = (height as f32 * scale) as u32;

        (new_width.max(1), new_height.max(1))
    }

    fn threshold_image(&self, image: &GrayImage) -> GrayImage {
        let (width, height) = image.dimensions();
        let mut result = GrayImage::new(width, height);

        for (x, y, pixel) in image.enumerate_pixels() {
            let output = if pixel[0] >= self.threshold { 255 } else { 0 };
            result.put_pixel(x, y, Luma([output]));
        }

        result
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}
