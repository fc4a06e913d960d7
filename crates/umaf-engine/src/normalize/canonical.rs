use crate::parsing::kinds::{BulletMarker, CodeFence, FenceRole};
use crate::parsing::split_lines;

/// Canonical line layout for markdown and plain text.
///
/// Outside matched code fences: trailing spaces and tabs are trimmed, blank
/// lines between two list items are dropped and blank runs collapse to one.
/// Lines inside fences are kept byte for byte. Leading and trailing blank
/// lines are removed. Applying it twice gives the same text as applying it once.
pub fn canonicalize_lines(text: &str) -> String {
    let lines = split_lines(text);
    let roles = CodeFence::pair(&lines);

    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    let mut last_pushed_blank = false;

    for (i, (line, role)) in lines.iter().zip(roles).enumerate() {
        match role {
            FenceRole::Inside => out.push(*line),
            FenceRole::Open | FenceRole::Close => out.push(trim_line_end(line)),
            FenceRole::Outside => {
                let trimmed = trim_line_end(line);
                if trimmed.is_empty() {
                    if last_pushed_blank || between_list_items(&out, &lines[i + 1..]) {
                        continue;
                    }
                    out.push("");
                    last_pushed_blank = true;
                    continue;
                }
                out.push(trimmed);
            }
        }
        last_pushed_blank = false;
    }

    let start = out.iter().position(|l| !l.is_empty()).unwrap_or(out.len());
    let end = out.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);
    out[start..end].join("\n")
}

fn trim_line_end(line: &str) -> &str {
    line.trim_end_matches([' ', '\t'])
}

fn has_content(line: &str) -> bool {
    !trim_line_end(line).is_empty()
}

fn between_list_items(before: &[&str], after: &[&str]) -> bool {
    let previous = before.iter().rev().find(|l| has_content(l));
    let next = after.iter().find(|l| has_content(l));
    match (previous, next) {
        (Some(p), Some(n)) => BulletMarker::is_list_item(p) && BulletMarker::is_list_item(n),
        _ => false,
    }
}
