//! Error types for the bizcard-core library.

use std::fmt;

use thiserror::Error;

/// Main error type for the bizcard library.
#[derive(Error, Debug)]
pub enum BizcardError {
    /// Text recognition error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Record store synchronization error.
    #[error("sync error: {0}")]
    Sync(#[from] SyncError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by a text recognizer.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load recognition models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Record store operation that produced a [`SyncError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Fetching collection metadata.
    VerifyCollection,
    /// Creating a document.
    SaveRecord,
    /// Querying documents.
    ListRecords,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::VerifyCollection => write!(f, "collection verification"),
            Operation::SaveRecord => write!(f, "record save"),
            Operation::ListRecords => write!(f, "record query"),
        }
    }
}

/// Placeholder used when a rejected response carries no body.
pub const NO_ERROR_BODY: &str = "No error body";

/// Errors returned by the sync client.
///
/// Every client operation resolves to a value or one of these; nothing
/// panics past the client boundary.
#[derive(Error, Debug)]
pub enum SyncError {
    /// No response was received.
    #[error("{operation} failed: {message}")]
    Transport { operation: Operation, message: String },

    /// The store answered with a non-success status.
    #[error("{operation} failed ({status}): {body}")]
    Rejected {
        operation: Operation,
        status: u16,
        body: String,
    },

    /// A success response could not be decoded into the expected shape.
    #[error("{operation} returned an unexpected response: {message}")]
    Mapping { operation: Operation, message: String },
}

impl SyncError {
    /// Build a rejection, substituting a placeholder for an empty body.
    pub fn rejected(operation: Operation, status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let body = if body.trim().is_empty() {
            NO_ERROR_BODY.to_string()
        } else {
            body
        };
        SyncError::Rejected {
            operation,
            status,
            body,
        }
    }

    /// The operation that failed.
    pub fn operation(&self) -> Operation {
        match self {
            SyncError::Transport { operation, .. }
            | SyncError::Rejected { operation, .. }
            | SyncError::Mapping { operation, .. } => *operation,
        }
    }

    /// HTTP status of a rejected call.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from the HTTP transport layer. Only raised when no response arrived.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Request(String),
}

/// Result type for the bizcard library.
pub type Result<T> = std::result::Result<T, BizcardError>;
