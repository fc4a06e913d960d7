/// Splits body lines into blank-line-delimited groups. Each group has its
/// common leading whitespace removed, trailing whitespace trimmed, and its
/// lines joined with `\n`.
pub fn make_paragraphs<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut group: Vec<&str> = Vec::new();

    for line in lines {
        let line = line.as_ref();
        if line.trim().is_empty() {
            flush_group(&mut group, &mut paragraphs);
        } else {
            group.push(line);
        }
    }
    flush_group(&mut group, &mut paragraphs);

    paragraphs
}

fn flush_group(group: &mut Vec<&str>, out: &mut Vec<String>) {
    if group.is_empty() {
        return;
    }
    let indent = common_indent(group);
    let joined = group
        .iter()
        .map(|line| line[indent..].trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    out.push(joined);
    group.clear();
}

/// Byte length of the longest whitespace prefix shared by every line.
fn common_indent(lines: &[&str]) -> usize {
    let Some(first) = lines.first() else {
        return 0;
    };
    let mut prefix = leading_whitespace(first);
    for line in &lines[1..] {
        let other = leading_whitespace(line);
        let shared = prefix
            .char_indices()
            .zip(other.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((i, c), _)| i + c.len_utf8())
            .unwrap_or(0);
        prefix = &prefix[..shared];
    }
    prefix.len()
}

fn leading_whitespace(line: &str) -> &str {
    let end = line
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    &line[..end]
}
