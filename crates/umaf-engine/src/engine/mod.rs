//! Route, extract, normalize, parse, walk: one document in, one envelope out.

pub mod assemble;
pub mod render;

use std::path::Path;

use chrono::{DateTime, Utc};
use log::debug;

use crate::error::{Result, UmafError};
use crate::io::read_source;
use crate::models::Envelope;
use crate::normalize::{NormalizedDocument, normalize};
use crate::router::{route, semantic_media_type_for};

pub use assemble::{SourceMeta, assemble, doc_title, sha256_hex};
pub use render::render_markdown;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Envelope,
    /// Canonical markdown rendered from the semantic model.
    Normalized,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transformed {
    Envelope(Box<Envelope>),
    Normalized(String),
}

/// Stateless apart from an optional fixed timestamp, so one engine can be
/// shared across worker threads.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    created_at: Option<DateTime<Utc>>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps every envelope with `created_at` instead of the current time.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn transform(&self, path: &Path, bytes: &[u8], format: OutputFormat) -> Result<Transformed> {
        let route = route(path);
        debug!(
            "{}: {} via {:?} adapter",
            path.display(),
            route.media_type,
            route.adapter
        );

        let text = route.adapter.extract(bytes)?;
        let doc = normalize(&text, route.media_type, route.semantic_media_type)?;

        Ok(match format {
            OutputFormat::Normalized => Transformed::Normalized(render_markdown(&doc)),
            OutputFormat::Envelope => {
                let source = SourceMeta::new(path.to_string_lossy(), bytes, self.timestamp());
                Transformed::Envelope(Box::new(assemble(&doc, &source)))
            }
        })
    }

    pub fn transform_file(&self, path: &Path, format: OutputFormat) -> Result<Transformed> {
        let bytes = read_source(path)?;
        self.transform(path, &bytes, format)
    }

    pub fn envelope(&self, path: &Path, bytes: &[u8]) -> Result<Envelope> {
        match self.transform(path, bytes, OutputFormat::Envelope)? {
            Transformed::Envelope(envelope) => Ok(*envelope),
            Transformed::Normalized(_) => Err(UmafError::Internal(
                "expected an envelope, got normalized text".to_string(),
            )),
        }
    }

    pub fn normalized(&self, path: &Path, bytes: &[u8]) -> Result<String> {
        match self.transform(path, bytes, OutputFormat::Normalized)? {
            Transformed::Normalized(text) => Ok(text),
            Transformed::Envelope(_) => Err(UmafError::Internal(
                "expected normalized text, got an envelope".to_string(),
            )),
        }
    }

    /// Entry point for callers that did their own extraction: `text` is
    /// already decoded and selects its parser via `semantic_media_type`.
    pub fn transform_text(
        &self,
        text: &str,
        media_type: &str,
        semantic_media_type: &str,
        source_path: &str,
    ) -> Result<Envelope> {
        let doc = normalize(text, media_type, semantic_media_type)?;
        let source = SourceMeta::new(source_path, text.as_bytes(), self.timestamp());
        Ok(assemble(&doc, &source))
    }

    /// Runs normalization again over an envelope's own text.
    pub fn renormalize(&self, envelope: &Envelope) -> Result<NormalizedDocument> {
        normalize(
            &envelope.normalized,
            &envelope.media_type,
            semantic_media_type_for(&envelope.media_type),
        )
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.created_at.unwrap_or_else(Utc::now)
    }
}
