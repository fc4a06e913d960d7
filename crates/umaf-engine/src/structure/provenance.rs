//! Provenance tags and confidence scores per block kind and source origin.

use crate::media::{APPLICATION_MSWORD, APPLICATION_PDF, APPLICATION_RTF, TEXT_PLAIN};
use crate::models::BlockKind;
use crate::version::PROVENANCE_VERSION;

/// Broad extraction pathway a document took before reaching the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceOrigin {
    MarkdownNative,
    PdfExtracted,
    DocxExtracted,
    PlainText,
    OcrExtracted,
}

impl SourceOrigin {
    /// Anything unrecognized counts as markdown-native; HTML reaches the
    /// parser already converted to markdown-ish text.
    pub fn from_media_type(media_type: &str) -> Self {
        let media = media_type.trim().to_ascii_lowercase();
        if media == APPLICATION_PDF {
            SourceOrigin::PdfExtracted
        } else if media.contains("openxmlformats")
            || media == APPLICATION_RTF
            || media == APPLICATION_MSWORD
        {
            SourceOrigin::DocxExtracted
        } else if media.starts_with("image/") || media.contains("ocr") {
            SourceOrigin::OcrExtracted
        } else if media == TEXT_PLAIN {
            SourceOrigin::PlainText
        } else {
            SourceOrigin::MarkdownNative
        }
    }

    fn path(self) -> &'static str {
        match self {
            SourceOrigin::MarkdownNative => "markdown",
            SourceOrigin::PdfExtracted => "adapter:pdfkit",
            SourceOrigin::DocxExtracted => "adapter:docx",
            SourceOrigin::PlainText => "plain-text",
            SourceOrigin::OcrExtracted => "adapter:ocr",
        }
    }
}

/// Shape facts that refine a block's tag or confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Table { ragged: bool },
    /// Section with no heading line of its own.
    ImplicitSection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    pub tag: String,
    pub confidence: f64,
}

pub fn classify(kind: BlockKind, origin: SourceOrigin, shape: Option<Shape>) -> Provenance {
    use SourceOrigin::*;

    if kind == BlockKind::Root {
        return Provenance {
            tag: format!("umaf:{PROVENANCE_VERSION}:root"),
            confidence: 1.0,
        };
    }

    let ragged = matches!(shape, Some(Shape::Table { ragged: true }));
    let confidence = match kind {
        BlockKind::Root | BlockKind::Code | BlockKind::FrontMatter => 1.0,
        BlockKind::Section => match origin {
            MarkdownNative => 1.0,
            PdfExtracted | PlainText => 0.8,
            DocxExtracted => 0.85,
            OcrExtracted => 0.7,
        },
        BlockKind::Bullet => match origin {
            MarkdownNative => 1.0,
            PdfExtracted => 0.7,
            DocxExtracted => 0.8,
            PlainText => 0.75,
            OcrExtracted => 0.6,
        },
        BlockKind::Paragraph => match origin {
            MarkdownNative => 0.9,
            PdfExtracted | PlainText => 0.8,
            DocxExtracted => 0.85,
            OcrExtracted => 0.7,
        },
        BlockKind::Table => match (origin, ragged) {
            (MarkdownNative, false) => 1.0,
            (MarkdownNative, true) => 0.8,
            (_, false) => 0.9,
            (_, true) => 0.7,
        },
        BlockKind::Raw => 0.6,
    };

    Provenance {
        tag: format!(
            "umaf:{PROVENANCE_VERSION}:{}:{}",
            origin.path(),
            kind_tag(kind, shape)
        ),
        confidence,
    }
}

fn kind_tag(kind: BlockKind, shape: Option<Shape>) -> &'static str {
    match kind {
        BlockKind::Section if shape == Some(Shape::ImplicitSection) => "section-implicit",
        BlockKind::Root => "root",
        BlockKind::Section => "heading-atx",
        BlockKind::Paragraph => "paragraph",
        BlockKind::Bullet => "bullet",
        BlockKind::Table => "table:pipe",
        BlockKind::Code => "code:fenced-backtick",
        BlockKind::FrontMatter => "front-matter:yaml",
        BlockKind::Raw => "raw",
    }
}
