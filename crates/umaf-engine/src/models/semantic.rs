//! Semantic lists produced by the parser.
//!
//! Every line number in this module is a 0-based index into the normalized
//! text's line array. The structural overlay uses 1-based inclusive lines.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub heading: String,
    pub level: u8,
    /// Body lines, verbatim.
    pub lines: Vec<String>,
    pub paragraphs: Vec<String>,
    pub start_line_index: usize,
    pub end_line_index: usize,
    /// True for the synthetic section of non-markdown text, which has no heading line.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub implicit: bool,
}

impl Section {
    /// Index of the first body line.
    pub fn body_start_index(&self) -> usize {
        if self.implicit {
            self.start_line_index
        } else {
            self.start_line_index + 1
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bullet {
    pub text: String,
    pub line_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_level: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Index of the header row.
    pub start_line_index: usize,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// A table is ragged when it has no header cells or any row disagrees
    /// with the header's cell count.
    pub fn is_ragged(&self) -> bool {
        self.header.is_empty() || self.rows.iter().any(|row| row.len() != self.header.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    /// Index of the opening fence.
    pub start_line_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Fenced content without the fence lines.
    pub code: String,
}

impl CodeBlock {
    /// Number of content lines between the fences, as recoverable from `code`.
    pub fn content_line_count(&self) -> usize {
        if self.code.is_empty() {
            0
        } else {
            self.code.split('\n').count()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatterEntry {
    pub key: String,
    pub value: String,
}

/// Everything a semantic parser strategy produces for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SemanticModel {
    pub sections: Vec<Section>,
    pub bullets: Vec<Bullet>,
    pub front_matter: Vec<FrontMatterEntry>,
    pub tables: Vec<Table>,
    pub code_blocks: Vec<CodeBlock>,
}

impl SemanticModel {
    pub fn front_matter_value(&self, key: &str) -> Option<&str> {
        self.front_matter
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }
}
