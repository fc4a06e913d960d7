//! Picks media types and an extraction adapter from a file extension.

use std::path::Path;

use crate::adapters::Adapter;
use crate::media::{
    APPLICATION_DOCX, APPLICATION_JSON, APPLICATION_MSWORD, APPLICATION_PDF, APPLICATION_RTF,
    TEXT_HTML, TEXT_MARKDOWN, TEXT_PLAIN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Media type of the source file.
    pub media_type: &'static str,
    /// Media type of the extracted text, which selects the parser.
    pub semantic_media_type: &'static str,
    pub adapter: Adapter,
}

impl Route {
    const fn new(media_type: &'static str, semantic_media_type: &'static str, adapter: Adapter) -> Self {
        Self {
            media_type,
            semantic_media_type,
            adapter,
        }
    }
}

pub fn route(path: &Path) -> Route {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    route_extension(&extension)
}

pub fn route_extension(extension: &str) -> Route {
    match extension {
        "md" | "markdown" => Route::new(TEXT_MARKDOWN, TEXT_MARKDOWN, Adapter::Text),
        "json" => Route::new(APPLICATION_JSON, APPLICATION_JSON, Adapter::Text),
        "html" | "htm" => Route::new(TEXT_HTML, TEXT_MARKDOWN, Adapter::Html),
        "pdf" => Route::new(APPLICATION_PDF, TEXT_MARKDOWN, Adapter::Pdf),
        "docx" => Route::new(APPLICATION_DOCX, TEXT_PLAIN, Adapter::Docx),
        "doc" => Route::new(APPLICATION_MSWORD, TEXT_PLAIN, Adapter::Docx),
        "rtf" => Route::new(APPLICATION_RTF, TEXT_PLAIN, Adapter::Rtf),
        "png" => Route::new("image/png", TEXT_PLAIN, Adapter::Ocr),
        "jpg" | "jpeg" => Route::new("image/jpeg", TEXT_PLAIN, Adapter::Ocr),
        "tif" | "tiff" => Route::new("image/tiff", TEXT_PLAIN, Adapter::Ocr),
        "heic" => Route::new("image/heic", TEXT_PLAIN, Adapter::Ocr),
        _ => Route::new(TEXT_PLAIN, TEXT_PLAIN, Adapter::Text),
    }
}

/// Semantic media type implied by a source media type. Used when
/// re-normalizing an envelope, whose text has already been extracted.
pub fn semantic_media_type_for(media_type: &str) -> &'static str {
    match media_type {
        TEXT_MARKDOWN | TEXT_HTML | APPLICATION_PDF => TEXT_MARKDOWN,
        APPLICATION_JSON => APPLICATION_JSON,
        _ => TEXT_PLAIN,
    }
}
