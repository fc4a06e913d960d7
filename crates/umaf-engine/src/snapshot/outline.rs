use std::collections::HashMap;

use crate::models::{Block, BlockBody, Envelope, Span};

/// One line per block, indented by depth, children in line order:
///
/// ```text
/// root [1-3] "Title"
///   section h1 [1-3] "Title" 1.00
///     paragraph [3-3] 0.90
/// ```
pub fn outline(envelope: &Envelope) -> Vec<String> {
    let spans: HashMap<&str, &Span> = envelope.spans.iter().map(|s| (s.id.as_str(), s)).collect();
    let known: HashMap<&str, &Block> = envelope.blocks.iter().map(|b| (b.id.as_str(), b)).collect();

    let mut children: HashMap<Option<&str>, Vec<&Block>> = HashMap::new();
    for block in &envelope.blocks {
        let parent = block
            .parent_id
            .as_deref()
            .filter(|id| known.contains_key(id));
        children.entry(parent).or_default().push(block);
    }
    let line_range = |block: &Block| {
        spans
            .get(block.span_id.as_str())
            .map(|s| (s.start_line, s.end_line))
            .unwrap_or((0, 0))
    };
    for list in children.values_mut() {
        list.sort_by_key(|b| line_range(*b));
    }

    let mut out = Vec::new();
    let mut stack: Vec<(&Block, usize)> = children
        .get(&None)
        .map(|roots| roots.iter().rev().map(|b| (*b, 0)).collect())
        .unwrap_or_default();
    while let Some((block, depth)) = stack.pop() {
        let (start, end) = line_range(block);
        out.push(format!("{}{}", "  ".repeat(depth), describe(block, start, end)));
        if let Some(kids) = children.get(&Some(block.id.as_str())) {
            stack.extend(kids.iter().rev().map(|b| (*b, depth + 1)));
        }
    }
    out
}

fn describe(block: &Block, start: usize, end: usize) -> String {
    let lines = format!("[{start}-{end}]");
    let confidence = format!("{:.2}", block.confidence);
    match &block.body {
        BlockBody::Root { title, .. } => format!("root {lines} {title:?}"),
        BlockBody::Section { level, heading } => {
            format!("section h{level} {lines} {heading:?} {confidence}")
        }
        BlockBody::Paragraph => format!("paragraph {lines} {confidence}"),
        BlockBody::Bullet { text, .. } => format!("bullet {lines} {text:?} {confidence}"),
        BlockBody::Table { header, rows } => format!(
            "table {lines} {} cols, {} rows {confidence}",
            header.len(),
            rows.len()
        ),
        BlockBody::Code { language } => match language {
            Some(language) => format!("code {lines} {language} {confidence}"),
            None => format!("code {lines} {confidence}"),
        },
        BlockBody::FrontMatter { entries } => {
            let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
            format!("frontMatter {lines} {} {confidence}", keys.join(","))
        }
        BlockBody::Raw => format!("raw {lines} {confidence}"),
    }
}
