//! Text to semantic model. One [`SemanticParser`] implementation per
//! strategy, selected by semantic media type.

pub mod builder;
pub mod classify;
pub mod json;
pub mod kinds;
pub mod markdown;
pub mod paragraphs;
pub mod plain;

use crate::media::SemanticKind;
use crate::models::SemanticModel;

pub use json::JsonParser;
pub use markdown::MarkdownParser;
pub use plain::PlainTextParser;

/// Turns normalized text into a semantic model. Implementations are total:
/// malformed structure degrades to plain body text.
pub trait SemanticParser: Send + Sync {
    fn parse(&self, text: &str) -> SemanticModel;
}

pub fn parser_for(semantic_media_type: &str) -> &'static dyn SemanticParser {
    match SemanticKind::from_media_type(semantic_media_type) {
        SemanticKind::Markdown => &MarkdownParser,
        SemanticKind::Json => &JsonParser,
        SemanticKind::Plain => &PlainTextParser,
    }
}

pub fn parse(text: &str, semantic_media_type: &str) -> SemanticModel {
    parser_for(semantic_media_type).parse(text)
}

/// Splits normalized text on `\n`. Always yields at least one line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}
