//! The span/block overlay. Lines here are 1-based and inclusive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    pub id: String,
    pub start_line: usize,
    pub end_line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_column: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
}

impl Span {
    pub fn new(id: impl Into<String>, start_line: usize, end_line: usize) -> Self {
        Self {
            id: id.into(),
            start_line,
            end_line,
            start_column: None,
            end_column: None,
        }
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.start_line <= other.start_line && other.end_line <= self.end_line
    }

    pub fn contains_line(&self, line: usize) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Root,
    Section,
    Paragraph,
    Bullet,
    Table,
    Code,
    FrontMatter,
    Raw,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Root => "root",
            BlockKind::Section => "section",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Bullet => "bullet",
            BlockKind::Table => "table",
            BlockKind::Code => "code",
            BlockKind::FrontMatter => "frontMatter",
            BlockKind::Raw => "raw",
        }
    }
}

/// Kind-specific payload of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockBody {
    Root {
        title: String,
        media_type: String,
    },
    Section {
        level: u8,
        heading: String,
    },
    Paragraph,
    Bullet {
        text: String,
        section_level: Option<u8>,
    },
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Code {
        language: Option<String>,
    },
    FrontMatter {
        entries: BTreeMap<String, String>,
    },
    Raw,
}

impl BlockBody {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockBody::Root { .. } => BlockKind::Root,
            BlockBody::Section { .. } => BlockKind::Section,
            BlockBody::Paragraph => BlockKind::Paragraph,
            BlockBody::Bullet { .. } => BlockKind::Bullet,
            BlockBody::Table { .. } => BlockKind::Table,
            BlockBody::Code { .. } => BlockKind::Code,
            BlockBody::FrontMatter { .. } => BlockKind::FrontMatter,
            BlockBody::Raw => BlockKind::Raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireBlock", into = "WireBlock")]
pub struct Block {
    pub id: String,
    pub span_id: String,
    pub parent_id: Option<String>,
    pub body: BlockBody,
    pub provenance: String,
    pub confidence: f64,
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        self.body.kind()
    }

    pub fn heading(&self) -> Option<&str> {
        match &self.body {
            BlockBody::Root { title, .. } => Some(title),
            BlockBody::Section { heading, .. } => Some(heading),
            BlockBody::Bullet { text, .. } => Some(text),
            _ => None,
        }
    }
}

const MEDIA_TYPE_KEY: &str = "mediaType";

/// Flat JSON shape of a block: one `kind` string plus optional fields.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBlock {
    id: String,
    kind: BlockKind,
    span_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    table_header: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    table_rows: Option<Vec<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<BTreeMap<String, String>>,
    provenance: String,
    confidence: f64,
}

impl From<Block> for WireBlock {
    fn from(block: Block) -> Self {
        let mut wire = WireBlock {
            id: block.id,
            kind: block.body.kind(),
            span_id: block.span_id,
            parent_id: block.parent_id,
            level: None,
            heading: None,
            language: None,
            table_header: None,
            table_rows: None,
            metadata: None,
            provenance: block.provenance,
            confidence: block.confidence,
        };
        match block.body {
            BlockBody::Root { title, media_type } => {
                wire.level = Some(1);
                wire.heading = Some(title);
                wire.metadata = Some(BTreeMap::from([(MEDIA_TYPE_KEY.to_string(), media_type)]));
            }
            BlockBody::Section { level, heading } => {
                wire.level = Some(level);
                wire.heading = Some(heading);
            }
            BlockBody::Bullet {
                text,
                section_level,
            } => {
                wire.level = section_level;
                wire.heading = Some(text);
            }
            BlockBody::Table { header, rows } => {
                wire.table_header = Some(header);
                wire.table_rows = Some(rows);
            }
            BlockBody::Code { language } => wire.language = language,
            BlockBody::FrontMatter { entries } => wire.metadata = Some(entries),
            BlockBody::Paragraph | BlockBody::Raw => {}
        }
        wire
    }
}

impl From<WireBlock> for Block {
    fn from(wire: WireBlock) -> Self {
        let body = match wire.kind {
            BlockKind::Root => BlockBody::Root {
                title: wire.heading.unwrap_or_default(),
                media_type: wire
                    .metadata
                    .and_then(|mut m| m.remove(MEDIA_TYPE_KEY))
                    .unwrap_or_default(),
            },
            BlockKind::Section => BlockBody::Section {
                level: wire.level.unwrap_or(1),
                heading: wire.heading.unwrap_or_default(),
            },
            BlockKind::Paragraph => BlockBody::Paragraph,
            BlockKind::Bullet => BlockBody::Bullet {
                text: wire.heading.unwrap_or_default(),
                section_level: wire.level,
            },
            BlockKind::Table => BlockBody::Table {
                header: wire.table_header.unwrap_or_default(),
                rows: wire.table_rows.unwrap_or_default(),
            },
            BlockKind::Code => BlockBody::Code {
                language: wire.language,
            },
            BlockKind::FrontMatter => BlockBody::FrontMatter {
                entries: wire.metadata.unwrap_or_default(),
            },
            BlockKind::Raw => BlockBody::Raw,
        };
        Block {
            id: wire.id,
            span_id: wire.span_id,
            parent_id: wire.parent_id,
            body,
            provenance: wire.provenance,
            confidence: wire.confidence,
        }
    }
}
