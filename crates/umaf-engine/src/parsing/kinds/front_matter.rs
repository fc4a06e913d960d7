use crate::models::FrontMatterEntry;

const DELIMITER: &str = "---";

/// A terminated front matter block with at least one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterBlock {
    pub entries: Vec<FrontMatterEntry>,
    /// Index of the closing `---` line.
    pub closing_line_index: usize,
}

pub struct FrontMatter;

impl FrontMatter {
    /// Detects front matter at the top of the document. Unterminated blocks
    /// and blocks without any `key: value` line are not front matter.
    pub fn detect<S: AsRef<str>>(lines: &[S]) -> Option<FrontMatterBlock> {
        let first = lines.first()?;
        if first.as_ref().trim() != DELIMITER {
            return None;
        }

        let closing_line_index = lines
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, line)| line.as_ref().trim() == DELIMITER)
            .map(|(i, _)| i)?;

        let entries: Vec<FrontMatterEntry> = lines[1..closing_line_index]
            .iter()
            .filter_map(|line| Self::entry(line.as_ref()))
            .collect();

        if entries.is_empty() {
            return None;
        }

        Some(FrontMatterBlock {
            entries,
            closing_line_index,
        })
    }

    fn entry(line: &str) -> Option<FrontMatterEntry> {
        let (key, value) = line.split_once(':')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some(FrontMatterEntry {
            key: key.to_string(),
            value: strip_outer_quotes(value.trim()).to_string(),
        })
    }
}

/// Strips one pair of matching single or double quotes.
pub fn strip_outer_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
