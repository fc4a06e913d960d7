use std::path::PathBuf;

/// Errors surfaced by the engine outside of the (total) parse and walk stages.
#[derive(Debug, thiserror::Error)]
pub enum UmafError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid JSON document: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Cannot extract text from {format}: {reason}")]
    UnsupportedExtraction { format: String, reason: String },
    #[error("Failed to extract text from {format}: {reason}")]
    Extraction { format: String, reason: String },
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Invalid input directory: {0}")]
    InvalidInputDir(String),
}

pub type Result<T> = std::result::Result<T, UmafError>;
