//! HTML to markdown-ish text via `html2md`, reshaped so the markdown
//! strategy sees ATX headings and unindented prose.

use std::sync::OnceLock;

use html2md::parse_html;
use regex::Regex;

use crate::parsing::kinds::CodeFence;
use crate::parsing::split_lines;

/// Elements whose content never reaches the output.
const HIDDEN_TAGS: [&str; 5] = ["head", "script", "style", "template", "noscript"];

fn hidden_element_regexes() -> &'static [Regex] {
    static HIDDEN_ELEMENT_REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();
    HIDDEN_ELEMENT_REGEXES.get_or_init(|| {
        HIDDEN_TAGS
            .iter()
            .map(|tag| {
                Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))
                    .expect("Invalid hidden element regex")
            })
            .collect()
    })
}

pub fn html_to_markdownish(html: &str) -> String {
    let visible = hidden_element_regexes()
        .iter()
        .fold(html.to_string(), |acc, re| re.replace_all(&acc, "").into_owned());
    tidy_markdown(&parse_html(&visible))
}

/// Rewrites setext headings as ATX and trims every line outside code fences.
fn tidy_markdown(markdown: &str) -> String {
    let lines = split_lines(markdown);
    let roles = CodeFence::pair(&lines);

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for (line, role) in lines.iter().zip(roles) {
        if role.is_fenced() {
            out.push(line.to_string());
            continue;
        }
        let trimmed = line.trim();
        if let Some(level) = setext_level(trimmed)
            && let Some(previous) = out.last_mut()
            && is_heading_text(previous)
        {
            *previous = format!("{} {previous}", "#".repeat(level));
            continue;
        }
        out.push(trimmed.to_string());
    }
    out.join("\n")
}

/// Level of a setext underline: `=` for 1, `-` for 2.
fn setext_level(line: &str) -> Option<usize> {
    let first = line.chars().next()?;
    let level = match first {
        '=' => 1,
        '-' => 2,
        _ => return None,
    };
    line.chars().all(|c| c == first).then_some(level)
}

fn is_heading_text(line: &str) -> bool {
    !line.is_empty() && !line.starts_with('#') && !line.starts_with("```")
}
