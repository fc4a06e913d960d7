// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with some content.\n\n- Bullet point\n- Another item\n\n| Name | Value |\n|------|-------|\n| a | 1 |\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_front_matter_document(sections: usize) -> String {
    let mut content = String::from("---\ntitle: Benchmark\ntags: perf, umaf\n---\n\n");
    for section in 0..sections {
        content.push_str(&format!("## Section {section}\n\n"));
        content.push_str("Some paragraph content with multiple sentences.\nIt wraps onto a second line.\n\n");
        for i in 0..3 {
            content.push_str(&format!("* Item {i} in section {section}\n"));
        }
        content.push('\n');
    }
    content
}

#[allow(dead_code)]
pub fn generate_plain_text(lines: usize) -> String {
    (0..lines)
        .map(|i| match i % 7 {
            0 => String::new(),
            3 => format!("• bullet number {i}"),
            _ => format!("Plain line {i} with a handful of words in it."),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
