//! Text recognizer backed by `pure-onnx-ocr`.

use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::TextRecognizer;

/// Recognizer running PaddleOCR models through `pure-onnx-ocr` (pure Rust).
pub struct PureOcrRecognizer {
    engine: pure_onnx_ocr::engine::OcrEngine,
    keep_unk: bool,
}

/// A recognized region reduced to what ordering needs.
struct Region {
    text: String,
    left: f32,
    top: f32,
}

impl PureOcrRecognizer {
    /// Load the detection, recognition and dictionary files named in `config`.
    pub fn from_config(config: &OcrConfig) -> Result<Self, OcrError> {
        let det_path = config.model_dir.join(&config.detection_model);
        let rec_path = config.model_dir.join(&config.recognition_model);
        let dict_path = config.model_dir.join(&config.dictionary);

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!(
                    "model file not found: {}",
                    path.display()
                )));
            }
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
            keep_unk: config.keep_unk,
        })
    }
}

impl TextRecognizer for PureOcrRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        let results = self
            .engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let mut regions: Vec<Region> = results
            .iter()
            .map(|r| {
                let (left, top) = top_left(&r.bounding_box);
                let text = if self.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                Region { text, left, top }
            })
            .collect();

        sort_reading_order(&mut regions);

        let text = regions
            .iter()
            .map(|r| r.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        info!(
            "Recognized {} regions in {}x{} image in {}ms",
            regions.len(),
            width,
            height,
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

/// Sort top-to-bottom, then left-to-right within 20px rows.
fn sort_reading_order(regions: &mut [Region]) {
    regions.sort_by(|a, b| {
        let row_a = (a.top / 20.0) as i32;
        let row_b = (b.top / 20.0) as i32;
        if row_a != row_b {
            row_a.cmp(&row_b)
        } else {
            a.left
                .partial_cmp(&b.left)
                .unwrap_or(std::cmp::Ordering::Equal)
        }
    });
}

/// Minimum x and y over the first four exterior points of a region polygon.
fn top_left(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f32, f32) {
    polygon
        .exterior()
        .coords()
        .take(4)
        .fold((f32::INFINITY, f32::INFINITY), |(x, y), c| {
            (x.min(c.x as f32), y.min(c.y as f32))
        })
}
