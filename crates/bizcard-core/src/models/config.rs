//! Configuration structures for scanning and record store sync.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::BizcardError;

/// Environment variable overriding [`StoreConfig::api_token`].
pub const ENV_API_TOKEN: &str = "BIZCARD_API_TOKEN";

/// Environment variable overriding [`StoreConfig::collection_id`].
pub const ENV_COLLECTION_ID: &str = "BIZCARD_COLLECTION_ID";

/// Main configuration for bizcard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BizcardConfig {
    /// Record store connection.
    pub store: StoreConfig,

    /// Property labels used in stored documents.
    pub properties: PropertyLabels,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Text recognizer configuration.
    pub ocr: OcrConfig,
}

/// Record store connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the store API, with trailing slash.
    pub api_base_url: String,

    /// Value sent in the API version header.
    pub api_version: String,

    /// Bearer token.
    pub api_token: String,

    /// Collection (database) id, in any form the store accepts.
    pub collection_id: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.notion.com/v1/".to_string(),
            api_version: "2022-06-28".to_string(),
            api_token: String::new(),
            collection_id: String::new(),
            timeout_secs: 30,
        }
    }
}

/// Names of the document properties each record field is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyLabels {
    /// Title property holding the name.
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub memo: String,
    pub meeting_place: String,
    /// Date property; also the sort key when listing.
    pub meeting_date: String,
    pub card_image: String,
    pub face_photo: String,

    /// Title written when a record has no name. The store rejects empty titles.
    pub untitled: String,
}

impl Default for PropertyLabels {
    fn default() -> Self {
        Self {
            name: "名前".to_string(),
            company: "会社名".to_string(),
            email: "メール".to_string(),
            phone: "電話番号".to_string(),
            memo: "メモ".to_string(),
            meeting_place: "会った場所".to_string(),
            meeting_date: "会った日".to_string(),
            card_image: "名刺画像".to_string(),
            face_photo: "顔写真".to_string(),
            untitled: "（名前なし）".to_string(),
        }
    }
}

impl PropertyLabels {
    /// All property labels, in record field order.
    pub fn all(&self) -> [&str; 9] {
        [
            &self.name,
            &self.company,
            &self.email,
            &self.phone,
            &self.memo,
            &self.meeting_place,
            &self.meeting_date,
            &self.card_image,
            &self.face_photo,
        ]
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Substrings that mark a line as an organization name.
    pub organization_markers: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            organization_markers: crate::extract::DEFAULT_ORGANIZATION_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

/// Text recognizer configuration.
///
/// The default files are the Latin PaddleOCR recognition model and
/// dictionary. They cannot emit Japanese script, so the Japanese
/// organization markers only match when `recognition_model` and
/// `dictionary` point at a Japanese model and its dictionary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing recognition model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` tokens emitted for unrecognized glyphs.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

impl BizcardConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Get full path to a recognizer model file.
    pub fn model_path(&self, file_name: &str) -> PathBuf {
        self.ocr.model_dir.join(file_name)
    }

    /// Override store credentials from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Override store credentials from an arbitrary variable lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|v| !v.is_empty()) {
            self.store.api_token = token;
        }
        if let Some(id) = lookup(ENV_COLLECTION_ID).filter(|v| !v.is_empty()) {
            self.store.collection_id = id;
        }
    }

    /// Check that the store section can be used to connect.
    pub fn validate_store(&self) -> Result<(), BizcardError> {
        if self.store.api_token.trim().is_empty() {
            return Err(BizcardError::Config(format!(
                "store.api_token is not set (or set {})",
                ENV_API_TOKEN
            )));
        }
        if self.store.collection_id.trim().is_empty() {
            return Err(BizcardError::Config(format!(
                "store.collection_id is not set (or set {})",
                ENV_COLLECTION_ID
            )));
        }
        if self.properties.untitled.is_empty() {
            return Err(BizcardError::Config(
                "properties.untitled must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
