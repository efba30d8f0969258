//! Data models and configuration.

pub mod card;
pub mod config;

pub use card::{CardDraft, ContactRecord};
pub use config::{BizcardConfig, ExtractionConfig, OcrConfig, PropertyLabels, StoreConfig};
