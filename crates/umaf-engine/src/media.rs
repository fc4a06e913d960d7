//! Media type names shared by the router, normalizer and taxonomy.

pub const TEXT_MARKDOWN: &str = "text/markdown";
pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML: &str = "text/html";
pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_PDF: &str = "application/pdf";
pub const APPLICATION_RTF: &str = "application/rtf";
pub const APPLICATION_MSWORD: &str = "application/msword";
pub const APPLICATION_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Parser strategy selected by a semantic media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticKind {
    Markdown,
    Json,
    Plain,
}

impl SemanticKind {
    pub fn from_media_type(semantic_media_type: &str) -> Self {
        let media = semantic_media_type.trim().to_ascii_lowercase();
        match media.as_str() {
            TEXT_MARKDOWN | "text/x-markdown" => SemanticKind::Markdown,
            APPLICATION_JSON => SemanticKind::Json,
            _ => SemanticKind::Plain,
        }
    }
}
