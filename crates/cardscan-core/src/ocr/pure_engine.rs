//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::GenericImageView;
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::preprocessing::ImagePreprocessor;
use super::TextRecognizer;

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct PureOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
    preprocessor: ImagePreprocessor,
}

/// A recognized line with the top-left corner of its region.
struct Region {
    left: f32,
    top: f32,
    text: String,
}

impl PureOcrEngine {
    /// Create an engine from the model files named in the configuration.
    pub fn from_config(config: &OcrConfig) -> Result<Self, OcrError> {
        let det_path = config.model_dir.join(&config.detection_model);
        let rec_path = config.model_dir.join(&config.recognition_model);
        let dict_path = config.model_dir.join(&config.dictionary);

        for path in [&det_path, &rec_path, &dict_path] {
            ensure_exists(path)?;
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", config.model_dir.display());

        Ok(Self {
            engine,
            preprocessor: ImagePreprocessor::from_config(config),
        })
    }
}

impl TextRecognizer for PureOcrEngine {
    fn name(&self) -> &'static str {
        "pure-onnx-ocr"
    }

    /// Recognize card text, one region per line in reading order.
    fn recognize(&self, data: &[u8]) -> Result<String, OcrError> {
        let start = Instant::now();

        let image = self.preprocessor.decode(data)?;
        let (width, height) = image.dimensions();
        info!("Processing card image: {}x{}", width, height);

        let prepared = self.preprocessor.prepare(&image);

        let results = self
            .engine
            .run_from_image(&prepared)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let mut regions: Vec<Region> = results
            .iter()
            .map(|r| {
                let (left, top) = polygon_origin(&r.bounding_box);
                Region {
                    left,
                    top,
                    text: r.text.replace("[UNK]", " "),
                }
            })
            .collect();

        // Sort by reading order, grouping rows within 20 pixels
        regions.sort_by(|a, b| {
            let row_a = (a.top / 20.0) as i32;
            let row_b = (b.top / 20.0) as i32;
            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                a.left.partial_cmp(&b.left).unwrap_or(std::cmp::Ordering::Equal)
            }
        });

        let text = regions
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        info!(
            "OCR complete: {} regions, {} characters in {}ms",
            regions.len(),
            text.chars().count(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

fn ensure_exists(path: &Path) -> Result<(), OcrError> {
    if path.exists() {
        Ok(())
    } else {
        Err(OcrError::ModelLoad(format!("model file not found: {}", path.display())))
    }
}

/// Top-left corner of a detected region polygon.
fn polygon_origin(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f32, f32) {
    polygon
        .exterior()
        .coords()
        .fold((f32::INFINITY, f32::INFINITY), |(x, y), c| {
            (x.min(c.x as f32), y.min(c.y as f32))
        })
}
