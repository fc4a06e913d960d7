//! Merges the semantic model into one fully covering span/block tree.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::models::{Block, BlockBody, BlockKind, SemanticModel, Span};
use crate::parsing::split_lines;

use super::{
    ids::{IdGenerator, ROOT_BLOCK_ID, ROOT_SPAN_ID},
    placement::{Candidate, Placement, place_all},
    provenance::{Shape, SourceOrigin, classify},
};

/// Everything the walker needs for one document.
#[derive(Debug, Clone, Copy)]
pub struct WalkInput<'a> {
    pub model: &'a SemanticModel,
    pub normalized: &'a str,
    pub line_count: usize,
    pub media_type: &'a str,
    pub doc_title: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    pub spans: Vec<Span>,
    pub blocks: Vec<Block>,
}

/// A section that made it into the tree, kept for parent lookup.
#[derive(Debug, Clone)]
struct PlacedSection {
    start: usize,
    end: usize,
    body_start: usize,
    block_id: String,
}

struct Walker<'a> {
    lines: Vec<&'a str>,
    line_count: usize,
    origin: SourceOrigin,
    ids: IdGenerator,
    out: Structure,
    sections: Vec<PlacedSection>,
    /// End line of the last child placed under each parent.
    last_child_end: HashMap<String, usize>,
}

/// Builds the span/block tree. Total for any input: the result always has a
/// single root and covers every line.
pub fn build(input: WalkInput<'_>) -> Structure {
    let mut walker = Walker::new(&input);
    walker.emit_root(input.doc_title, input.media_type);

    let placements = place_all(input.model, &walker.lines, walker.line_count);
    for placement in &placements {
        walker.place(placement);
    }

    walker.fill_paragraphs();
    walker.fill_raw();

    debug!(
        "walked {} lines into {} blocks",
        walker.line_count,
        walker.out.blocks.len()
    );
    walker.out
}

impl<'a> Walker<'a> {
    fn new(input: &WalkInput<'a>) -> Self {
        Self {
            lines: split_lines(input.normalized),
            line_count: input.line_count.max(1),
            origin: SourceOrigin::from_media_type(input.media_type),
            ids: IdGenerator::new(),
            out: Structure::default(),
            sections: vec![],
            last_child_end: HashMap::new(),
        }
    }

    fn emit_root(&mut self, title: &str, media_type: &str) {
        let span = Span::new(ROOT_SPAN_ID, 1, self.line_count);
        let provenance = classify(BlockKind::Root, self.origin, None);
        self.out.spans.push(span);
        self.out.blocks.push(Block {
            id: ROOT_BLOCK_ID.to_string(),
            span_id: ROOT_SPAN_ID.to_string(),
            parent_id: None,
            body: BlockBody::Root {
                title: title.to_string(),
                media_type: media_type.to_string(),
            },
            provenance: provenance.tag,
            confidence: provenance.confidence,
        });
    }

    fn place(&mut self, placement: &Placement<'_>) {
        match placement.candidate {
            Candidate::Section(section) => {
                let mut start = placement.start;
                if let Some(&prev_end) = self.last_child_end.get(ROOT_BLOCK_ID)
                    && start <= prev_end
                {
                    start = prev_end + 1;
                }
                if start > placement.end {
                    debug!("dropping section {:?}: no lines left", section.heading);
                    return;
                }
                let body = BlockBody::Section {
                    level: section.level,
                    heading: section.heading.clone(),
                };
                let shape = section.implicit.then_some(Shape::ImplicitSection);
                let block_id = self.emit(start, placement.end, ROOT_BLOCK_ID, body, shape);
                self.sections.push(PlacedSection {
                    start,
                    end: placement.end,
                    body_start: (section.body_start_index() + 1).max(start),
                    block_id,
                });
            }
            candidate => {
                let (parent_id, parent_end) = match self.enclosing_section(placement.start) {
                    Some(section) => (section.block_id.clone(), section.end),
                    None => (ROOT_BLOCK_ID.to_string(), self.line_count),
                };
                let end = placement.end.min(parent_end);
                if let Some(&prev_end) = self.last_child_end.get(&parent_id)
                    && placement.start <= prev_end
                {
                    debug!(
                        "skipping candidate at line {}: overlaps a sibling",
                        placement.start
                    );
                    return;
                }
                let (body, shape) = leaf_body(candidate);
                self.emit(placement.start, end, &parent_id, body, shape);
            }
        }
    }

    /// Most specific section whose range contains `line`. Placed sections
    /// never overlap and are sorted by start, so the candidate is the last
    /// one starting at or before `line`.
    fn enclosing_section(&self, line: usize) -> Option<&PlacedSection> {
        let idx = self.sections.partition_point(|s| s.start <= line);
        let section = self.sections.get(idx.checked_sub(1)?)?;
        (line <= section.end).then_some(section)
    }

    fn fill_paragraphs(&mut self) {
        let mut claimed = vec![false; self.line_count + 1];
        for block in &self.out.blocks {
            if matches!(
                block.kind(),
                BlockKind::FrontMatter | BlockKind::Code | BlockKind::Table | BlockKind::Bullet
            ) && let Some(span) = self.out.spans.iter().find(|s| s.id == block.span_id)
            {
                for line in span.start_line..=span.end_line {
                    claimed[line] = true;
                }
            }
        }

        let sections = std::mem::take(&mut self.sections);
        for section in &sections {
            let mut run_start: Option<usize> = None;
            for line in section.body_start..=section.end + 1 {
                let open = line <= section.end && !claimed[line] && !self.is_blank(line);
                match (open, run_start) {
                    (true, None) => run_start = Some(line),
                    (false, Some(start)) => {
                        self.emit(start, line - 1, &section.block_id, BlockBody::Paragraph, None);
                        run_start = None;
                    }
                    _ => {}
                }
            }
        }
        self.sections = sections;
    }

    fn fill_raw(&mut self) {
        let mut covered = vec![false; self.line_count + 1];
        for span in self.out.spans.iter().filter(|s| s.id != ROOT_SPAN_ID) {
            for line in span.start_line..=span.end_line.min(self.line_count) {
                covered[line] = true;
            }
        }

        let mut run_start: Option<usize> = None;
        for line in 1..=self.line_count + 1 {
            let gap = line <= self.line_count && !covered[line];
            match (gap, run_start) {
                (true, None) => run_start = Some(line),
                (false, Some(start)) => {
                    let parent_id = self
                        .enclosing_section(start)
                        .map(|s| s.block_id.clone())
                        .unwrap_or_else(|| ROOT_BLOCK_ID.to_string());
                    self.emit(start, line - 1, &parent_id, BlockBody::Raw, None);
                    run_start = None;
                }
                _ => {}
            }
        }
    }

    fn is_blank(&self, line: usize) -> bool {
        self.lines
            .get(line - 1)
            .is_none_or(|text| text.trim().is_empty())
    }

    /// Pushes one span and its block, returning the block id.
    fn emit(
        &mut self,
        start: usize,
        end: usize,
        parent_id: &str,
        body: BlockBody,
        shape: Option<Shape>,
    ) -> String {
        let kind = body.kind();
        let ids = self.ids.next(kind);
        let provenance = classify(kind, self.origin, shape);

        self.out.spans.push(Span::new(ids.span.clone(), start, end));
        self.out.blocks.push(Block {
            id: ids.block.clone(),
            span_id: ids.span,
            parent_id: Some(parent_id.to_string()),
            body,
            provenance: provenance.tag,
            confidence: provenance.confidence,
        });
        self.last_child_end.insert(parent_id.to_string(), end);
        ids.block
    }
}

fn leaf_body(candidate: Candidate<'_>) -> (BlockBody, Option<Shape>) {
    match candidate {
        Candidate::FrontMatter(entries) => {
            let entries: BTreeMap<String, String> = entries
                .iter()
                .map(|e| (e.key.clone(), e.value.clone()))
                .collect();
            (BlockBody::FrontMatter { entries }, None)
        }
        Candidate::Table(table) => (
            BlockBody::Table {
                header: table.header.clone(),
                rows: table.rows.clone(),
            },
            Some(Shape::Table {
                ragged: table.is_ragged(),
            }),
        ),
        Candidate::Code(code) => (
            BlockBody::Code {
                language: code.language.clone(),
            },
            None,
        ),
        Candidate::Bullet(bullet) => (
            BlockBody::Bullet {
                text: bullet.text.clone(),
                section_level: bullet.section_level,
            },
            None,
        ),
        Candidate::Section(section) => (
            BlockBody::Section {
                level: section.level,
                heading: section.heading.clone(),
            },
            None,
        ),
    }
}
