use std::collections::{HashMap, HashSet};

use crate::models::{BlockKind, Envelope, Span};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("expected exactly one parentless block, found {0}")]
    RootCount(usize),
    #[error("root block must be kind root spanning [1, {line_count}], got {kind} [{start}, {end}]")]
    RootShape {
        kind: &'static str,
        start: usize,
        end: usize,
        line_count: usize,
    },
    #[error("duplicate id {0}")]
    DuplicateId(String),
    #[error("block {block_id} references missing span {span_id}")]
    MissingSpan { block_id: String, span_id: String },
    #[error("block {block_id} references missing parent {parent_id}")]
    MissingParent { block_id: String, parent_id: String },
    #[error("span {span_id} [{start}, {end}] is outside [1, {line_count}]")]
    OutOfBounds {
        span_id: String,
        start: usize,
        end: usize,
        line_count: usize,
    },
    #[error("block {block_id} is not contained in its parent {parent_id}")]
    NotContained { block_id: String, parent_id: String },
    #[error("children {first} and {second} of {parent_id} overlap")]
    SiblingOverlap {
        parent_id: String,
        first: String,
        second: String,
    },
    #[error("line {0} is not covered by any non-root span")]
    Uncovered(usize),
}

/// Checks the global structural invariants of an envelope: single root,
/// unique ids, referential integrity, bounds, containment, sibling
/// non-overlap and full line coverage.
pub fn validate(envelope: &Envelope) -> Result<(), InvariantViolation> {
    let line_count = envelope.line_count.max(1);

    let mut seen = HashSet::new();
    for id in envelope
        .spans
        .iter()
        .map(|s| &s.id)
        .chain(envelope.blocks.iter().map(|b| &b.id))
    {
        if !seen.insert(id.as_str()) {
            return Err(InvariantViolation::DuplicateId(id.clone()));
        }
    }

    let spans: HashMap<&str, &Span> = envelope.spans.iter().map(|s| (s.id.as_str(), s)).collect();
    for span in &envelope.spans {
        if span.start_line < 1 || span.start_line > span.end_line || span.end_line > line_count {
            return Err(InvariantViolation::OutOfBounds {
                span_id: span.id.clone(),
                start: span.start_line,
                end: span.end_line,
                line_count,
            });
        }
    }

    let mut block_spans: HashMap<&str, &Span> = HashMap::new();
    for block in &envelope.blocks {
        let span = spans
            .get(block.span_id.as_str())
            .copied()
            .ok_or_else(|| InvariantViolation::MissingSpan {
                block_id: block.id.clone(),
                span_id: block.span_id.clone(),
            })?;
        block_spans.insert(block.id.as_str(), span);
    }

    let roots: Vec<_> = envelope
        .blocks
        .iter()
        .filter(|b| b.parent_id.is_none())
        .collect();
    let [root] = roots.as_slice() else {
        return Err(InvariantViolation::RootCount(roots.len()));
    };
    let root_span = block_spans[root.id.as_str()];
    if root.kind() != BlockKind::Root || root_span.start_line != 1 || root_span.end_line != line_count
    {
        return Err(InvariantViolation::RootShape {
            kind: root.kind().as_str(),
            start: root_span.start_line,
            end: root_span.end_line,
            line_count,
        });
    }

    let mut children: HashMap<&str, Vec<(&Span, &str)>> = HashMap::new();
    for block in &envelope.blocks {
        let Some(parent_id) = &block.parent_id else {
            continue;
        };
        let parent_span =
            block_spans
                .get(parent_id.as_str())
                .ok_or_else(|| InvariantViolation::MissingParent {
                    block_id: block.id.clone(),
                    parent_id: parent_id.clone(),
                })?;
        let span = block_spans[block.id.as_str()];
        if !parent_span.contains(span) {
            return Err(InvariantViolation::NotContained {
                block_id: block.id.clone(),
                parent_id: parent_id.clone(),
            });
        }
        children
            .entry(parent_id.as_str())
            .or_default()
            .push((span, block.id.as_str()));
    }

    for (parent_id, siblings) in &mut children {
        siblings.sort_by_key(|(span, _)| (span.start_line, span.end_line));
        for pair in siblings.windows(2) {
            let (prev, prev_id) = pair[0];
            let (next, next_id) = pair[1];
            if next.start_line <= prev.end_line {
                return Err(InvariantViolation::SiblingOverlap {
                    parent_id: parent_id.to_string(),
                    first: prev_id.to_string(),
                    second: next_id.to_string(),
                });
            }
        }
    }

    let mut covered = vec![false; line_count + 1];
    for block in envelope.blocks.iter().filter(|b| b.parent_id.is_some()) {
        let span = block_spans[block.id.as_str()];
        for line in span.start_line..=span.end_line {
            covered[line] = true;
        }
    }
    if let Some(line) = (1..=line_count).find(|&line| !covered[line]) {
        return Err(InvariantViolation::Uncovered(line));
    }

    Ok(())
}
