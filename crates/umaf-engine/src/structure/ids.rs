use std::collections::HashMap;

use crate::models::BlockKind;

pub const ROOT_SPAN_ID: &str = "span:root";
pub const ROOT_BLOCK_ID: &str = "block:root";

/// Per-kind counters for one document transform. Identical input walked in
/// the same order yields identical ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counters: HashMap<&'static str, usize>,
}

/// A span id and the id of the block that points at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPair {
    pub span: String,
    pub block: String,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, kind: BlockKind) -> IdPair {
        let prefix = id_prefix(kind);
        let counter = self.counters.entry(prefix).or_insert(0);
        *counter += 1;
        IdPair {
            span: format!("span:{prefix}:{counter:03}"),
            block: format!("block:{prefix}:{counter:03}"),
        }
    }
}

fn id_prefix(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Root => "root",
        BlockKind::Section => "sec",
        BlockKind::Paragraph => "p",
        BlockKind::Bullet => "bullet",
        BlockKind::Table => "tbl",
        BlockKind::Code => "code",
        BlockKind::FrontMatter => "front",
        BlockKind::Raw => "raw",
    }
}
