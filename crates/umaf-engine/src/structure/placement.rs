//! Converts 0-based semantic items into 1-based inclusive line ranges.

use crate::models::{Bullet, CodeBlock, FrontMatterEntry, Section, SemanticModel, Table};
use crate::parsing::kinds::{CodeFence, FrontMatter};

#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    FrontMatter(&'a [FrontMatterEntry]),
    Section(&'a Section),
    Table(&'a Table),
    Code(&'a CodeBlock),
    Bullet(&'a Bullet),
}

impl Candidate<'_> {
    /// Tie-break order for items starting on the same line.
    pub fn priority(&self) -> u8 {
        match self {
            Candidate::FrontMatter(_) => 0,
            Candidate::Section(_) => 1,
            Candidate::Table(_) => 2,
            Candidate::Code(_) => 3,
            Candidate::Bullet(_) => 4,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub start: usize,
    pub end: usize,
    pub candidate: Candidate<'a>,
}

/// Places every semantic item and sorts by `(start, priority, end)`. Items
/// that start past the end of the document, or end before they start after
/// clamping, are dropped.
pub fn place_all<'a>(
    model: &'a SemanticModel,
    lines: &[&str],
    line_count: usize,
) -> Vec<Placement<'a>> {
    let mut placements = Vec::new();
    let mut push = |start: usize, end: usize, candidate: Candidate<'a>| {
        let end = end.min(line_count);
        if start >= 1 && start <= line_count && start <= end {
            placements.push(Placement {
                start,
                end,
                candidate,
            });
        }
    };

    if !model.front_matter.is_empty()
        && let Some(block) = FrontMatter::detect(lines)
    {
        push(
            1,
            block.closing_line_index + 1,
            Candidate::FrontMatter(&model.front_matter),
        );
    }

    for section in &model.sections {
        push(
            section.start_line_index + 1,
            section.end_line_index + 1,
            Candidate::Section(section),
        );
    }

    for table in &model.tables {
        let start = table.start_line_index + 1;
        push(start, start + 1 + table.rows.len(), Candidate::Table(table));
    }

    for code in &model.code_blocks {
        let start = code.start_line_index + 1;
        push(start, code_end(code, lines, start), Candidate::Code(code));
    }

    for bullet in &model.bullets {
        let line = bullet.line_index + 1;
        push(line, line, Candidate::Bullet(bullet));
    }

    placements.sort_by_key(|p| (p.start, p.candidate.priority(), p.end));
    placements
}

/// Line of the matching closing fence, or the length implied by the code
/// text when no closing fence follows.
fn code_end(code: &CodeBlock, lines: &[&str], start: usize) -> usize {
    lines
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, line)| CodeFence::sig(line).is_some())
        .map(|(i, _)| i + 1)
        .unwrap_or(start + code.content_line_count() + 1)
}
