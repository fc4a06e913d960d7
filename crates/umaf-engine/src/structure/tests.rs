use pretty_assertions::assert_eq;

use super::*;
use crate::models::{BlockBody, BlockKind, Envelope};
use crate::snapshot::validate;
use crate::tests::envelope_for;

/// `(block id, kind, start, end, parent)` for every block, in emission order.
fn layout(envelope: &Envelope) -> Vec<(String, BlockKind, usize, usize, Option<String>)> {
    envelope
        .blocks
        .iter()
        .map(|block| {
            let span = envelope.span(&block.span_id).unwrap();
            (
                block.id.clone(),
                block.kind(),
                span.start_line,
                span.end_line,
                block.parent_id.clone(),
            )
        })
        .collect()
}

fn row(
    id: &str,
    kind: BlockKind,
    start: usize,
    end: usize,
    parent: Option<&str>,
) -> (String, BlockKind, usize, usize, Option<String>) {
    (id.to_string(), kind, start, end, parent.map(str::to_string))
}

#[test]
fn test_heading_with_body_paragraph() {
    let envelope = envelope_for("# Title\n\nBody line", "md");

    assert_eq!(
        layout(&envelope),
        vec![
            row("block:root", BlockKind::Root, 1, 3, None),
            row("block:sec:001", BlockKind::Section, 1, 3, Some("block:root")),
            row("block:p:001", BlockKind::Paragraph, 3, 3, Some("block:sec:001")),
        ]
    );
    assert_eq!(envelope.blocks[1].provenance, "umaf:0.7.0:markdown:heading-atx");
    assert_eq!(envelope.blocks[1].confidence, 1.0);
    assert_eq!(envelope.blocks[2].confidence, 0.9);
    validate(&envelope).unwrap();
}

#[test]
fn test_root_block_shape() {
    let envelope = envelope_for("# Title\n\nBody line", "md");

    let root = envelope.root_block().unwrap();
    assert_eq!(root.id, ROOT_BLOCK_ID);
    assert_eq!(root.span_id, ROOT_SPAN_ID);
    assert_eq!(root.provenance, "umaf:0.7.0:root");
    assert_eq!(root.confidence, 1.0);
    assert_eq!(
        root.body,
        BlockBody::Root {
            title: "Title".into(),
            media_type: "text/markdown".into(),
        }
    );
}

#[test]
fn test_table_inside_section() {
    let envelope = envelope_for("# T\n| a | b |\n|---|---|\n| 1 | 2 |", "md");

    assert_eq!(
        layout(&envelope),
        vec![
            row("block:root", BlockKind::Root, 1, 4, None),
            row("block:sec:001", BlockKind::Section, 1, 4, Some("block:root")),
            row("block:tbl:001", BlockKind::Table, 2, 4, Some("block:sec:001")),
        ]
    );
    let table = &envelope.blocks[2];
    assert_eq!(table.provenance, "umaf:0.7.0:markdown:table:pipe");
    assert_eq!(table.confidence, 1.0);
    assert_eq!(
        table.body,
        BlockBody::Table {
            header: vec!["a".into(), "b".into()],
            rows: vec![vec!["1".into(), "2".into()]],
        }
    );
}

#[test]
fn test_ragged_table_has_lower_confidence() {
    let envelope = envelope_for("| a | b |\n|---|---|\n| 1 |", "md");

    let table = envelope
        .blocks
        .iter()
        .find(|b| b.kind() == BlockKind::Table)
        .unwrap();
    assert_eq!(table.parent_id.as_deref(), Some(ROOT_BLOCK_ID));
    assert_eq!(table.confidence, 0.8);
}

#[test]
fn test_front_matter_gap_and_section() {
    let envelope = envelope_for("---\ntitle: T\n---\n\n# H", "md");

    assert_eq!(
        layout(&envelope),
        vec![
            row("block:root", BlockKind::Root, 1, 5, None),
            row("block:front:001", BlockKind::FrontMatter, 1, 3, Some("block:root")),
            row("block:sec:001", BlockKind::Section, 5, 5, Some("block:root")),
            row("block:raw:001", BlockKind::Raw, 4, 4, Some("block:root")),
        ]
    );
    assert_eq!(envelope.doc_title, "T");
    assert_eq!(envelope.blocks[3].confidence, 0.6);
    validate(&envelope).unwrap();
}

#[test]
fn test_bullets_and_trailing_paragraph() {
    let envelope = envelope_for("# A\n- one\n- two\ntext", "md");

    assert_eq!(
        layout(&envelope),
        vec![
            row("block:root", BlockKind::Root, 1, 4, None),
            row("block:sec:001", BlockKind::Section, 1, 4, Some("block:root")),
            row("block:bullet:001", BlockKind::Bullet, 2, 2, Some("block:sec:001")),
            row("block:bullet:002", BlockKind::Bullet, 3, 3, Some("block:sec:001")),
            row("block:p:001", BlockKind::Paragraph, 4, 4, Some("block:sec:001")),
        ]
    );
    assert_eq!(
        envelope.blocks[2].body,
        BlockBody::Bullet {
            text: "one".into(),
            section_level: Some(1),
        }
    );
}

#[test]
fn test_preamble_before_first_heading_is_raw() {
    let envelope = envelope_for("intro\n\n# H\nbody", "md");

    assert_eq!(
        layout(&envelope),
        vec![
            row("block:root", BlockKind::Root, 1, 4, None),
            row("block:sec:001", BlockKind::Section, 3, 4, Some("block:root")),
            row("block:p:001", BlockKind::Paragraph, 4, 4, Some("block:sec:001")),
            row("block:raw:001", BlockKind::Raw, 1, 2, Some("block:root")),
        ]
    );
}

#[test]
fn test_code_block_claims_fence_lines() {
    let envelope = envelope_for("# C\n```rust\nfn main() {}\n```\nafter", "md");

    assert_eq!(
        layout(&envelope),
        vec![
            row("block:root", BlockKind::Root, 1, 5, None),
            row("block:sec:001", BlockKind::Section, 1, 5, Some("block:root")),
            row("block:code:001", BlockKind::Code, 2, 4, Some("block:sec:001")),
            row("block:p:001", BlockKind::Paragraph, 5, 5, Some("block:sec:001")),
        ]
    );
    assert_eq!(
        envelope.blocks[2].body,
        BlockBody::Code {
            language: Some("rust".into())
        }
    );
    assert_eq!(envelope.blocks[2].confidence, 1.0);
}

#[test]
fn test_plain_whitespace_only_document() {
    let envelope = envelope_for("   \n  ", "txt");

    assert_eq!(envelope.normalized, "");
    assert_eq!(envelope.line_count, 1);
    assert_eq!(
        layout(&envelope),
        vec![
            row("block:root", BlockKind::Root, 1, 1, None),
            row("block:sec:001", BlockKind::Section, 1, 1, Some("block:root")),
        ]
    );
    assert_eq!(
        envelope.blocks[1].provenance,
        "umaf:0.7.0:plain-text:section-implicit"
    );
    assert_eq!(envelope.blocks[1].confidence, 0.8);
    validate(&envelope).unwrap();
}

/// Lines covered by paragraph and raw blocks, one entry per covering block.
fn body_coverage(envelope: &Envelope) -> Vec<usize> {
    let mut lines: Vec<usize> = envelope
        .blocks
        .iter()
        .filter(|b| matches!(b.kind(), BlockKind::Paragraph | BlockKind::Raw))
        .flat_map(|b| {
            let span = envelope.span(&b.span_id).unwrap();
            span.start_line..=span.end_line
        })
        .collect();
    lines.sort_unstable();
    lines
}

#[test]
fn test_plain_body_between_blank_lines_is_one_paragraph() {
    let envelope = envelope_for("\n\n  hello  \n\n", "txt");

    assert_eq!(envelope.normalized, "  hello");
    assert_eq!(
        layout(&envelope),
        vec![
            row("block:root", BlockKind::Root, 1, 1, None),
            row("block:sec:001", BlockKind::Section, 1, 1, Some("block:root")),
            row("block:p:001", BlockKind::Paragraph, 1, 1, Some("block:sec:001")),
        ]
    );
    assert_eq!(body_coverage(&envelope), vec![1]);
    validate(&envelope).unwrap();
}

#[test]
fn test_plain_body_lines_are_covered_once() {
    let envelope = envelope_for("\n\nfirst\n\n\nsecond  \nthird\n\n", "txt");

    assert_eq!(envelope.normalized, "first\n\nsecond\nthird");
    // Every non-blank line sits in exactly one paragraph or raw block.
    assert_eq!(body_coverage(&envelope), vec![1, 3, 4]);
    let kinds: Vec<_> = envelope.blocks.iter().map(|b| b.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::Root,
            BlockKind::Section,
            BlockKind::Paragraph,
            BlockKind::Paragraph,
        ]
    );
    validate(&envelope).unwrap();
}

#[test]
fn test_table_confidence_drops_when_a_row_is_short() {
    let tidy = envelope_for("| a | b |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |", "md");
    let ragged = envelope_for("| a | b |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |\n| 5 |", "md");

    let table = |envelope: &Envelope| {
        envelope
            .blocks
            .iter()
            .find(|b| b.kind() == BlockKind::Table)
            .cloned()
            .unwrap()
    };

    let tidy_table = table(&tidy);
    assert_eq!(tidy_table.confidence, 1.0);
    assert_eq!(
        tidy_table.body,
        BlockBody::Table {
            header: vec!["a".into(), "b".into()],
            rows: vec![vec!["1".into(), "2".into()], vec!["3".into(), "4".into()]],
        }
    );
    let span = tidy.span(&tidy_table.span_id).unwrap();
    assert_eq!((span.start_line, span.end_line), (1, 4));

    let ragged_table = table(&ragged);
    assert_eq!(ragged_table.confidence, 0.8);
    let span = ragged.span(&ragged_table.span_id).unwrap();
    assert_eq!((span.start_line, span.end_line), (1, 5));
    validate(&tidy).unwrap();
    validate(&ragged).unwrap();
}

#[test]
fn test_json_document_is_covered_by_raw() {
    let envelope = envelope_for("{\"b\": 1, \"a\": [1, 2]}", "json");

    assert!(envelope.sections.is_empty());
    let kinds: Vec<_> = envelope.blocks.iter().map(|b| b.kind()).collect();
    assert_eq!(kinds, vec![BlockKind::Root, BlockKind::Raw]);
    let raw = envelope.span(&envelope.blocks[1].span_id).unwrap();
    assert_eq!((raw.start_line, raw.end_line), (1, envelope.line_count));
    validate(&envelope).unwrap();
}

#[test]
fn test_same_input_gives_same_structure() {
    let text = "# A\n\n- x\n\n| h |\n|---|\n\n## B\n```\ncode\n```";

    let first = envelope_for(text, "md");
    let second = envelope_for(text, "md");

    assert_eq!(first.spans, second.spans);
    assert_eq!(first.blocks, second.blocks);
}

#[test]
fn test_ensure_root_is_a_no_op_on_complete_envelopes() {
    let envelope = envelope_for("# Title\n\nBody line", "md");

    let repaired = ensure_root_span_and_block(envelope.clone());

    assert_eq!(repaired, envelope);
}

#[test]
fn test_ensure_root_restores_stripped_root() {
    let mut envelope = envelope_for("# Title\n\nBody line", "md");
    envelope.spans.retain(|s| s.id != ROOT_SPAN_ID);
    envelope.blocks.retain(|b| b.id != ROOT_BLOCK_ID);
    envelope.feature_flags.clear();

    let repaired = ensure_root_span_and_block(envelope);

    assert_eq!(repaired.spans[0].id, ROOT_SPAN_ID);
    assert_eq!((repaired.spans[0].start_line, repaired.spans[0].end_line), (1, 3));
    assert_eq!(repaired.blocks[0].id, ROOT_BLOCK_ID);
    assert_eq!(repaired.blocks[0].parent_id, None);
    assert!(repaired.has_structure());
    validate(&repaired).unwrap();
}

#[test]
fn test_ensure_root_on_envelope_without_structure() {
    let mut envelope = envelope_for("plain words", "txt");
    envelope.spans.clear();
    envelope.blocks.clear();

    let repaired = ensure_root_span_and_block(envelope);

    assert_eq!(repaired.spans.len(), 1);
    assert_eq!(repaired.blocks.len(), 1);
    assert_eq!(repaired.blocks[0].kind(), BlockKind::Root);
}
