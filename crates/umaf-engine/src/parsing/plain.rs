use crate::models::{Bullet, Section, SemanticModel};

use super::{SemanticParser, kinds::BulletMarker, paragraphs::make_paragraphs, split_lines};

pub const IMPLICIT_SECTION_TITLE: &str = "Document";
const IMPLICIT_SECTION_LEVEL: u8 = 1;

/// Line-oriented strategy for text that is not markdown: the whole document
/// is one implicit section, and only glyph bullets are detected.
pub struct PlainTextParser;

impl SemanticParser for PlainTextParser {
    fn parse(&self, text: &str) -> SemanticModel {
        let lines = split_lines(text);

        let bullets = lines
            .iter()
            .enumerate()
            .filter_map(|(line_index, line)| {
                BulletMarker::parse(line).map(|text| Bullet {
                    text: text.to_string(),
                    line_index,
                    section_heading: Some(IMPLICIT_SECTION_TITLE.to_string()),
                    section_level: Some(IMPLICIT_SECTION_LEVEL),
                })
            })
            .collect();

        let section = Section {
            heading: IMPLICIT_SECTION_TITLE.to_string(),
            level: IMPLICIT_SECTION_LEVEL,
            paragraphs: make_paragraphs(&lines),
            lines: lines.iter().map(|line| line.to_string()).collect(),
            start_line_index: 0,
            end_line_index: lines.len() - 1,
            implicit: true,
        };

        SemanticModel {
            sections: vec![section],
            bullets,
            ..SemanticModel::default()
        }
    }
}
