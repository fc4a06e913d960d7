use super::kinds::{AtxHeading, BulletMarker, CodeFence, FenceRole, Heading, PipeTable};

/// Classification of a single line containing only local facts, plus the
/// fence role computed by the pairing pre-pass.
#[derive(Debug, Clone)]
pub struct LineClass {
    pub index: usize,
    pub is_blank: bool,
    pub fence: FenceRole,
    /// Language of the fence when this line opens one.
    pub fence_language: Option<String>,
    pub heading: Option<Heading>,
    pub bullet: Option<String>,
    pub has_pipe: bool,
    pub is_table_separator: bool,
}

/// Classifies lines for the markdown builder phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies `lines`, whose first element sits at index `offset` of the document.
    pub fn classify_all(&self, lines: &[&str], offset: usize) -> Vec<LineClass> {
        let roles = CodeFence::pair(lines);
        lines
            .iter()
            .zip(roles)
            .enumerate()
            .map(|(i, (line, role))| self.classify(offset + i, line, role))
            .collect()
    }

    /// Lines inside a fence only carry their role; nothing else is detected there.
    pub fn classify(&self, index: usize, text: &str, fence: FenceRole) -> LineClass {
        let is_blank = text.trim().is_empty();
        if fence.is_fenced() {
            return LineClass {
                index,
                is_blank,
                fence,
                fence_language: match fence {
                    FenceRole::Open => CodeFence::sig(text).and_then(|sig| sig.language),
                    _ => None,
                },
                heading: None,
                bullet: None,
                has_pipe: false,
                is_table_separator: false,
            };
        }

        LineClass {
            index,
            is_blank,
            fence,
            fence_language: None,
            heading: AtxHeading::parse(text),
            bullet: BulletMarker::parse(text).map(str::to_string),
            has_pipe: PipeTable::has_pipe(text),
            is_table_separator: PipeTable::is_separator(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_lines_are_not_classified_as_structure() {
        let lines = ["```md", "# not a heading", "- not a bullet", "```"];

        let classes = MarkdownLineClassifier.classify_all(&lines, 0);

        assert_eq!(classes[0].fence, FenceRole::Open);
        assert_eq!(classes[0].fence_language.as_deref(), Some("md"));
        assert!(classes[1].heading.is_none());
        assert!(classes[2].bullet.is_none());
        assert_eq!(classes[3].fence, FenceRole::Close);
    }

    #[test]
    fn test_unmatched_fence_line_is_plain_text() {
        let lines = ["```", "# Heading"];

        let classes = MarkdownLineClassifier.classify_all(&lines, 0);

        assert_eq!(classes[0].fence, FenceRole::Outside);
        assert_eq!(classes[1].heading.as_ref().map(|h| h.level), Some(1));
    }
}
