//! Composes parser and walker output into an [`Envelope`].

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::media::SemanticKind;
use crate::models::envelope::STRUCTURE_FLAG;
use crate::models::{Envelope, SemanticModel};
use crate::normalize::NormalizedDocument;
use crate::parsing;
use crate::structure::{self, WalkInput};
use crate::version::ENVELOPE_VERSION;

const DOC_ID_LEN: usize = 12;
const ENCODING: &str = "utf-8";
const UNTITLED: &str = "Untitled";

/// Facts about the source bytes that end up in the envelope header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMeta {
    pub path: String,
    pub hash: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

impl SourceMeta {
    pub fn new(path: impl Into<String>, bytes: &[u8], created_at: DateTime<Utc>) -> Self {
        Self {
            path: path.into(),
            hash: sha256_hex(bytes),
            size_bytes: bytes.len() as u64,
            created_at,
        }
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Front matter title, else the first non-empty markdown heading, else the
/// file stem.
pub fn doc_title(model: &SemanticModel, semantic_media_type: &str, source_path: &str) -> String {
    if let Some(title) = model.front_matter_value("title")
        && !title.trim().is_empty()
    {
        return title.trim().to_string();
    }

    if SemanticKind::from_media_type(semantic_media_type) == SemanticKind::Markdown
        && let Some(section) = model
            .sections
            .iter()
            .find(|s| !s.implicit && !s.heading.is_empty())
    {
        return section.heading.clone();
    }

    Path::new(source_path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

pub fn assemble(doc: &NormalizedDocument, source: &SourceMeta) -> Envelope {
    let model = parsing::parse(&doc.text, &doc.semantic_media_type);
    let title = doc_title(&model, &doc.semantic_media_type, &source.path);

    let structure = structure::build(WalkInput {
        model: &model,
        normalized: &doc.text,
        line_count: doc.line_count,
        media_type: &doc.media_type,
        doc_title: &title,
    });

    let SemanticModel {
        sections,
        bullets,
        front_matter,
        tables,
        code_blocks,
    } = model;

    Envelope {
        version: ENVELOPE_VERSION.to_string(),
        doc_title: title,
        doc_id: source.hash.chars().take(DOC_ID_LEN).collect(),
        created_at: source.created_at,
        source_hash: source.hash.clone(),
        source_path: source.path.clone(),
        media_type: doc.media_type.clone(),
        encoding: ENCODING.to_string(),
        size_bytes: source.size_bytes,
        line_count: doc.line_count,
        normalized: doc.text.clone(),
        sections,
        bullets,
        front_matter,
        tables,
        code_blocks,
        spans: structure.spans,
        blocks: structure.blocks,
        feature_flags: BTreeMap::from([(STRUCTURE_FLAG.to_string(), true)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{TEXT_MARKDOWN, TEXT_PLAIN};
    use crate::parsing::{MarkdownParser, PlainTextParser, SemanticParser};

    #[test]
    fn test_sha256_hex_of_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_title_prefers_front_matter() {
        let model = MarkdownParser.parse("---\ntitle: 'From FM'\n---\n# Heading");
        assert_eq!(doc_title(&model, TEXT_MARKDOWN, "x/file.md"), "From FM");
    }

    #[test]
    fn test_title_falls_back_to_first_non_empty_heading() {
        let model = MarkdownParser.parse("#\n## Real");
        assert_eq!(doc_title(&model, TEXT_MARKDOWN, "x/file.md"), "Real");
    }

    #[test]
    fn test_title_falls_back_to_file_stem() {
        let model = PlainTextParser.parse("just text");
        assert_eq!(doc_title(&model, TEXT_PLAIN, "dir/notes.txt"), "notes");
        assert_eq!(doc_title(&model, TEXT_PLAIN, ""), "Untitled");
    }
}
