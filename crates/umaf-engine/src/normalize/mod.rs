//! Line-ending and per-format text normalization.

pub mod canonical;
pub mod json;

use crate::error::{Result, UmafError};
use crate::media::SemanticKind;
use crate::parsing::split_lines;

pub use canonical::canonicalize_lines;
pub use json::canonicalize_json;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Normalized text plus the media types that describe it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDocument {
    pub text: String,
    pub line_count: usize,
    /// Media type of the original source.
    pub media_type: String,
    /// Media type that selects the parser strategy.
    pub semantic_media_type: String,
}

/// Decodes UTF-8, replacing invalid sequences, and drops a leading byte order mark.
pub fn decode(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix(BYTE_ORDER_MARK)
        .unwrap_or(&text)
        .to_string()
}

pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Number of `\n`-separated lines, never less than one.
pub fn line_count(text: &str) -> usize {
    split_lines(text).len().max(1)
}

pub fn normalize(
    text: &str,
    media_type: &str,
    semantic_media_type: &str,
) -> Result<NormalizedDocument> {
    let unix = normalize_line_endings(text);
    let text = match SemanticKind::from_media_type(semantic_media_type) {
        SemanticKind::Json => canonicalize_json(&unix).map_err(UmafError::InvalidJson)?,
        SemanticKind::Markdown | SemanticKind::Plain => canonicalize_lines(&unix),
    };

    Ok(NormalizedDocument {
        line_count: line_count(&text),
        text,
        media_type: media_type.to_string(),
        semantic_media_type: semantic_media_type.to_string(),
    })
}
