//! Canonical markdown rendered back out of the semantic model.

use std::collections::BTreeMap;

use crate::media::SemanticKind;
use crate::models::{Bullet, Section, SemanticModel};
use crate::normalize::{NormalizedDocument, canonicalize_lines};
use crate::parsing::{self, kinds::FrontMatter, plain::IMPLICIT_SECTION_TITLE, split_lines};

const MAX_HEADING_LEVEL: u8 = 6;
/// Indent columns per nesting level of a rendered bullet.
const NEST_WIDTH: usize = 2;

/// Renders `doc` as markdown: markdown is rebuilt from its front matter and
/// sections, JSON is fenced, and other text becomes one titled section with
/// its bullets rewritten as `- ` items.
pub fn render_markdown(doc: &NormalizedDocument) -> String {
    let model = parsing::parse(&doc.text, &doc.semantic_media_type);
    match SemanticKind::from_media_type(&doc.semantic_media_type) {
        SemanticKind::Markdown => render_markdown_text(&doc.text, &model),
        SemanticKind::Json => fenced("json", &doc.text),
        SemanticKind::Plain => render_plain_text(&doc.text, &model),
    }
}

fn render_markdown_text(text: &str, model: &SemanticModel) -> String {
    if model.front_matter.is_empty() && model.sections.is_empty() {
        return text.to_string();
    }

    let lines = split_lines(text);
    let mut out: Vec<String> = Vec::new();

    let mut body_start = 0;
    if let Some(front_matter) = FrontMatter::detect(&lines) {
        out.push("---".to_string());
        out.extend(
            front_matter
                .entries
                .iter()
                .map(|entry| format!("{}: {}", entry.key, entry.value)),
        );
        out.push("---".to_string());
        out.push(String::new());
        body_start = front_matter.closing_line_index + 1;
    }

    // Text ahead of the first heading.
    let first_heading = model
        .sections
        .first()
        .map_or(lines.len(), |s| s.start_line_index);
    if body_start < first_heading {
        out.extend(lines[body_start..first_heading].iter().map(|l| l.to_string()));
    }

    // Paragraph regrouping would break up table rows and fenced code.
    let verbatim = !model.tables.is_empty() || !model.code_blocks.is_empty();
    for section in &model.sections {
        out.push(String::new());
        out.push(heading_line(section));
        if !verbatim && !section.paragraphs.is_empty() {
            for paragraph in &section.paragraphs {
                out.push(String::new());
                out.push(paragraph.clone());
            }
        } else if !section.lines.is_empty() {
            out.push(String::new());
            out.extend(section.lines.iter().cloned());
        }
    }

    canonicalize_lines(&out.join("\n"))
}

fn render_plain_text(text: &str, model: &SemanticModel) -> String {
    let Some(section) = model.sections.first() else {
        return fenced("text", text);
    };

    // Keyed by index into the section's lines.
    let bullets: BTreeMap<usize, &Bullet> = model
        .bullets
        .iter()
        .filter(|b| {
            b.section_heading
                .as_deref()
                .is_none_or(|heading| heading == IMPLICIT_SECTION_TITLE)
        })
        .filter_map(|b| {
            let index = b.line_index.checked_sub(section.start_line_index)?;
            (index < section.lines.len()).then_some((index, b))
        })
        .collect();
    let base_indent = bullets
        .keys()
        .map(|&i| indent_width(&section.lines[i]))
        .min()
        .unwrap_or(0);

    let mut out = vec![heading_line(section), String::new()];
    let mut i = 0;
    while let Some(line) = section.lines.get(i) {
        if !bullets.contains_key(&i) {
            out.push(line.clone());
            i += 1;
            continue;
        }
        while let (Some(bullet), Some(line)) = (bullets.get(&i), section.lines.get(i)) {
            let depth = indent_width(line).saturating_sub(base_indent) / NEST_WIDTH;
            out.push(format!("{}- {}", " ".repeat(depth * NEST_WIDTH), bullet.text));
            i += 1;
        }
        out.push(String::new());
    }

    canonicalize_lines(&out.join("\n"))
}

fn heading_line(section: &Section) -> String {
    let level = section.level.clamp(1, MAX_HEADING_LEVEL);
    format!("{} {}", "#".repeat(usize::from(level)), section.heading.trim())
}

fn fenced(language: &str, text: &str) -> String {
    format!("```{language}\n{text}\n```")
}

/// Leading whitespace width, counting a tab as two columns.
fn indent_width(line: &str) -> usize {
    line.chars()
        .map_while(|c| match c {
            ' ' => Some(1),
            '\t' => Some(2),
            _ => None,
        })
        .sum()
}
