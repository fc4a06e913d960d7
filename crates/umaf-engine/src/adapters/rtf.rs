//! Best-effort RTF to plain text: keeps body text and paragraph breaks,
//! drops font tables, pictures and other destinations.

const RTF_MAGIC: &str = "{\\rtf";

const SKIPPED_DESTINATIONS: [&str; 10] = [
    "fonttbl",
    "colortbl",
    "stylesheet",
    "info",
    "pict",
    "header",
    "footer",
    "listtable",
    "listoverridetable",
    "generator",
];

/// Returns `text` unchanged unless it is an RTF document.
pub fn extract_text(text: &str) -> String {
    if text.trim_start().starts_with(RTF_MAGIC) {
        rtf_to_text(text)
    } else {
        text.to_string()
    }
}

pub fn rtf_to_text(rtf: &str) -> String {
    let mut out = String::new();
    let mut chars = rtf.chars().peekable();
    let mut depth = 0usize;
    // Groups at or below this depth are skipped until they close.
    let mut skip_depth: Option<usize> = None;
    let mut group_start = false;

    while let Some(c) = chars.next() {
        let emitting = skip_depth.is_none();
        match c {
            '{' => {
                depth += 1;
                group_start = true;
                continue;
            }
            '}' => {
                if skip_depth == Some(depth) {
                    skip_depth = None;
                }
                depth = depth.saturating_sub(1);
            }
            '\\' => match chars.peek().copied() {
                Some(lit @ ('\\' | '{' | '}')) => {
                    chars.next();
                    if emitting {
                        out.push(lit);
                    }
                }
                Some('\'') => {
                    chars.next();
                    let hex: String = chars.by_ref().take(2).collect();
                    if emitting && let Ok(byte) = u8::from_str_radix(&hex, 16) {
                        out.push(char::from(byte));
                    }
                }
                Some('*') => {
                    chars.next();
                    if group_start {
                        skip_depth.get_or_insert(depth);
                    }
                }
                Some(next) if next.is_ascii_alphabetic() => {
                    let mut word = String::new();
                    while let Some(&c) = chars.peek().filter(|c| c.is_ascii_alphabetic()) {
                        word.push(c);
                        chars.next();
                    }
                    if chars.peek() == Some(&'-') {
                        chars.next();
                    }
                    while chars.peek().is_some_and(|c| c.is_ascii_digit()) {
                        chars.next();
                    }
                    if chars.peek() == Some(&' ') {
                        chars.next();
                    }
                    if group_start && SKIPPED_DESTINATIONS.contains(&word.as_str()) {
                        skip_depth.get_or_insert(depth);
                    }
                    if skip_depth.is_none() {
                        match word.as_str() {
                            "par" | "line" => out.push('\n'),
                            "tab" => out.push('\t'),
                            _ => {}
                        }
                    }
                }
                Some('~') => {
                    chars.next();
                    if emitting {
                        out.push(' ');
                    }
                }
                Some(_) => {
                    chars.next();
                }
                None => {}
            },
            '\r' | '\n' => {}
            other => {
                if emitting {
                    out.push(other);
                }
            }
        }
        group_start = false;
    }

    out
}
