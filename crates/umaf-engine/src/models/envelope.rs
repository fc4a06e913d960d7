use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::semantic::{Bullet, CodeBlock, FrontMatterEntry, Section, Table};
use super::structure::{Block, Span};
use crate::error::Result;
use crate::normalize::json::sort_keys;

pub const STRUCTURE_FLAG: &str = "structure";

/// The complete output record for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub version: String,
    pub doc_title: String,
    pub doc_id: String,
    pub created_at: DateTime<Utc>,
    pub source_hash: String,
    pub source_path: String,
    pub media_type: String,
    pub encoding: String,
    pub size_bytes: u64,
    pub line_count: usize,
    pub normalized: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub bullets: Vec<Bullet>,
    #[serde(default)]
    pub front_matter: Vec<FrontMatterEntry>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub code_blocks: Vec<CodeBlock>,
    #[serde(default)]
    pub spans: Vec<Span>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub feature_flags: BTreeMap<String, bool>,
}

impl Envelope {
    /// Pretty JSON with object keys sorted at every depth.
    pub fn to_json_pretty(&self) -> Result<String> {
        let value = sort_keys(serde_json::to_value(self)?);
        Ok(serde_json::to_string_pretty(&value)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn span(&self, id: &str) -> Option<&Span> {
        self.spans.iter().find(|s| s.id == id)
    }

    pub fn root_block(&self) -> Option<&Block> {
        self.blocks.iter().find(|b| b.parent_id.is_none())
    }

    pub fn has_structure(&self) -> bool {
        self.feature_flags
            .get(STRUCTURE_FLAG)
            .copied()
            .unwrap_or(false)
    }
}
