use crate::models::{Bullet, CodeBlock, Section, SemanticModel, Table};

use super::{
    classify::LineClass,
    kinds::{FenceRole, Heading, PipeTable},
    paragraphs::make_paragraphs,
};

#[derive(Debug)]
enum LeafState {
    None,
    /// A pipe line that becomes a table header if a separator follows.
    PendingHeader { start: usize, cells: Vec<String> },
    Table {
        start: usize,
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Fence {
        start: usize,
        language: Option<String>,
        content: Vec<String>,
    },
}

#[derive(Debug)]
struct OpenSection {
    heading: String,
    level: u8,
    start: usize,
    lines: Vec<String>,
}

/// Phase 2 of markdown parsing: consumes classified lines in order and
/// accumulates the semantic model. Each line is claimed by at most one
/// structure.
pub struct SemanticBuilder {
    section: Option<OpenSection>,
    leaf: LeafState,
    out: SemanticModel,
}

impl SemanticBuilder {
    pub fn new() -> Self {
        Self {
            section: None,
            leaf: LeafState::None,
            out: SemanticModel::default(),
        }
    }

    pub fn push(&mut self, c: &LineClass, text: &str) {
        if self.in_fence() {
            self.consume_fence_line(c, text);
            return;
        }

        if c.fence == FenceRole::Open {
            self.flush_leaf();
            self.leaf = LeafState::Fence {
                start: c.index,
                language: c.fence_language.clone(),
                content: vec![],
            };
            self.push_body(text);
            return;
        }

        if let Some(heading) = &c.heading {
            self.flush_leaf();
            self.open_section(heading, c.index);
            return;
        }

        if self.continue_table(c, text) {
            return;
        }

        if self.promote_pending_header(c, text) {
            return;
        }

        if let Some(bullet) = &c.bullet {
            self.out.bullets.push(Bullet {
                text: bullet.clone(),
                line_index: c.index,
                section_heading: self.section.as_ref().map(|s| s.heading.clone()),
                section_level: self.section.as_ref().map(|s| s.level),
            });
        } else if c.has_pipe {
            let cells = PipeTable::cells(text);
            if !cells.is_empty() {
                self.leaf = LeafState::PendingHeader {
                    start: c.index,
                    cells,
                };
            }
        }

        self.push_body(text);
    }

    /// `last_index` is the index of the final line of the document.
    pub fn finish(mut self, last_index: usize) -> SemanticModel {
        // EOF flush
        self.flush_leaf();
        self.close_section(last_index);
        self.out
    }

    fn in_fence(&self) -> bool {
        matches!(self.leaf, LeafState::Fence { .. })
    }

    fn consume_fence_line(&mut self, c: &LineClass, text: &str) {
        self.push_body(text);
        if c.fence == FenceRole::Close {
            self.flush_leaf();
        } else if let LeafState::Fence { content, .. } = &mut self.leaf {
            content.push(text.to_string());
        }
    }

    fn continue_table(&mut self, c: &LineClass, text: &str) -> bool {
        let LeafState::Table { rows, .. } = &mut self.leaf else {
            return false;
        };
        if c.has_pipe {
            rows.push(PipeTable::cells(text));
            self.push_body(text);
            return true;
        }
        self.flush_leaf();
        false
    }

    fn promote_pending_header(&mut self, c: &LineClass, text: &str) -> bool {
        let LeafState::PendingHeader { start, cells } = &mut self.leaf else {
            return false;
        };
        if c.is_table_separator {
            let start = *start;
            let header = std::mem::take(cells);
            self.leaf = LeafState::Table {
                start,
                header,
                rows: vec![],
            };
            self.push_body(text);
            return true;
        }
        self.leaf = LeafState::None;
        false
    }

    fn flush_leaf(&mut self) {
        match std::mem::replace(&mut self.leaf, LeafState::None) {
            LeafState::None | LeafState::PendingHeader { .. } => {}
            LeafState::Table {
                start,
                header,
                rows,
            } => self.out.tables.push(Table {
                start_line_index: start,
                header,
                rows,
            }),
            LeafState::Fence {
                start,
                language,
                content,
            } => self.out.code_blocks.push(CodeBlock {
                start_line_index: start,
                language,
                code: content.join("\n"),
            }),
        }
    }

    fn open_section(&mut self, heading: &Heading, index: usize) {
        if index > 0 {
            self.close_section(index - 1);
        }
        self.section = Some(OpenSection {
            heading: heading.text.clone(),
            level: heading.level,
            start: index,
            lines: vec![],
        });
    }

    fn close_section(&mut self, end: usize) {
        let Some(open) = self.section.take() else {
            return;
        };
        self.out.sections.push(Section {
            heading: open.heading,
            level: open.level,
            paragraphs: make_paragraphs(&open.lines),
            lines: open.lines,
            start_line_index: open.start,
            end_line_index: end,
            implicit: false,
        });
    }

    fn push_body(&mut self, text: &str) {
        if let Some(section) = &mut self.section {
            section.lines.push(text.to_string());
        }
    }
}

impl Default for SemanticBuilder {
    fn default() -> Self {
        Self::new()
    }
}
