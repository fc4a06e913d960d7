use crate::models::SemanticModel;

use super::{
    SemanticParser, builder::SemanticBuilder, classify::MarkdownLineClassifier,
    kinds::FrontMatter, split_lines,
};

/// Markdown strategy: front matter, ATX headings, backtick fences, glyph
/// bullets and pipe tables, each attributed to exact source lines.
pub struct MarkdownParser;

impl SemanticParser for MarkdownParser {
    fn parse(&self, text: &str) -> SemanticModel {
        let lines = split_lines(text);

        let front_matter = FrontMatter::detect(&lines);
        let body_start = front_matter
            .as_ref()
            .map(|fm| fm.closing_line_index + 1)
            .unwrap_or(0);

        let classes = MarkdownLineClassifier.classify_all(&lines[body_start..], body_start);
        let mut builder = SemanticBuilder::new();
        for class in &classes {
            builder.push(class, lines[class.index]);
        }

        let mut model = builder.finish(lines.len() - 1);
        model.front_matter = front_matter.map(|fm| fm.entries).unwrap_or_default();
        model
    }
}
