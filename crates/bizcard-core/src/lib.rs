//! Core library for business card capture and record store sync.
//!
//! This crate provides:
//! - Contact field extraction from recognized card text
//! - A text recognizer seam, with a native ONNX recognizer
//! - Mapping between contact records and store documents
//! - A sync client that verifies, saves and lists records

pub mod error;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod store;

pub use error::{BizcardError, Operation, Result, SyncError};
pub use extract::{FieldExtractor, extract_card};
pub use models::card::{CardDraft, ContactRecord};
pub use models::config::BizcardConfig;
pub use ocr::{CardScanner, TextRecognizer};
#[cfg(feature = "native")]
pub use ocr::PureOcrRecognizer;
pub use store::{HttpTransport, RecordMapper, StoreTransport, SyncClient};
