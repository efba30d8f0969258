//! Text recognition seam.
//!
//! Recognition itself is delegated to a [`TextRecognizer`]; this module only
//! connects a recognizer to the card field extractor.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrRecognizer;

use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::extract::FieldExtractor;
use crate::models::card::CardDraft;

/// Something that turns a decoded image into text with one line per
/// recognized region, in top-to-bottom order.
pub trait TextRecognizer {
    /// Recognize text in the image.
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

impl<R: TextRecognizer + ?Sized> TextRecognizer for Box<R> {
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        (**self).recognize(image)
    }
}

/// Runs a recognizer and then the field extractor over its output.
pub struct CardScanner<R> {
    recognizer: R,
    extractor: FieldExtractor,
}

impl<R: TextRecognizer> CardScanner<R> {
    /// Create a scanner with the default extractor.
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            extractor: FieldExtractor::new(),
        }
    }

    /// Use a specific extractor.
    pub fn with_extractor(mut self, extractor: FieldExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Recognize the card and extract a draft.
    pub fn scan(&self, image: &DynamicImage) -> Result<CardDraft, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(OcrError::InvalidImage(format!(
                "image has zero size ({}x{})",
                width, height
            )));
        }

        let text = self.recognizer.recognize(image)?;
        debug!("Recognized {} characters of text", text.chars().count());

        let draft = self.extractor.extract(&text);
        info!(
            "Scanned {}x{} card in {}ms",
            width,
            height,
            start.elapsed().as_millis()
        );

        Ok(draft)
    }

    /// The underlying recognizer.
    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FixedText(&'static str);

    impl TextRecognizer for FixedText {
        fn recognize(&self, _image: &DynamicImage) -> Result<String, OcrError> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    impl TextRecognizer for Failing {
        fn recognize(&self, _image: &DynamicImage) -> Result<String, OcrError> {
            Err(OcrError::Recognition("engine crashed".to_string()))
        }
    }

    #[test]
    fn test_scan_extracts_fields() {
        let scanner = CardScanner::new(FixedText(
            "Taro Yamada\nExample Inc\ntaro@example.com\n03-1234-5678",
        ));
        let image = DynamicImage::new_rgb8(64, 32);

        let draft = scanner.scan(&image).unwrap();
        assert_eq!(draft.name, "Taro Yamada");
        assert_eq!(draft.company, "Example Inc");
        assert_eq!(draft.email, "taro@example.com");
        assert_eq!(draft.phone, "03-1234-5678");
    }

    #[test]
    fn test_scan_surfaces_recognizer_error() {
        let scanner = CardScanner::new(Failing);
        let image = DynamicImage::new_rgb8(8, 8);
        let err = scanner.scan(&image).unwrap_err();
        assert!(err.to_string().contains("engine crashed"));
    }

    #[test]
    fn test_scan_rejects_empty_image() {
        let scanner = CardScanner::new(FixedText("unused"));
        let image = DynamicImage::new_rgb8(0, 0);
        assert!(matches!(
            scanner.scan(&image),
            Err(OcrError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_boxed_recognizer() {
        let boxed: Box<dyn TextRecognizer> = Box::new(FixedText("Example Corp"));
        let scanner = CardScanner::new(boxed)
            .with_extractor(FieldExtractor::new().with_markers(["Corp"]));
        let draft = scanner.scan(&DynamicImage::new_rgb8(4, 4)).unwrap();
        assert_eq!(draft.company, "Example Corp");
    }
}
