const BULLET_GLYPHS: [char; 3] = ['-', '*', '•'];

pub struct BulletMarker;

impl BulletMarker {
    /// Returns the bullet text when the line starts with `-`, `*` or `•`
    /// followed by whitespace.
    pub fn parse(line: &str) -> Option<&str> {
        let trimmed = line.trim_start();
        let mut chars = trimmed.chars();
        let glyph = chars.next()?;
        if !BULLET_GLYPHS.contains(&glyph) {
            return None;
        }
        let rest = chars.as_str();
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        Some(rest.trim())
    }

    /// Broader list-item test used when tidying blank lines: bullets, `+`
    /// items and ordered items such as `1.` or `2)`.
    pub fn is_list_item(line: &str) -> bool {
        let trimmed = line.trim_start();
        if Self::parse(trimmed).is_some() {
            return true;
        }
        if let Some(rest) = trimmed.strip_prefix('+') {
            return rest.starts_with(char::is_whitespace);
        }

        let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return false;
        }
        let rest = &trimmed[digits..];
        rest.strip_prefix(['.', ')'])
            .is_some_and(|after| after.starts_with(char::is_whitespace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- item", Some("item"))]
    #[case("* star  ", Some("star"))]
    #[case("• dot", Some("dot"))]
    #[case("  - nested", Some("nested"))]
    #[case("-\ttab", Some("tab"))]
    #[case("-no-space", None)]
    #[case("---", None)]
    #[case("+ plus", None)]
    #[case("1. one", None)]
    #[case("-", None)]
    fn test_parse_bullet(#[case] line: &str, #[case] expected: Option<&str>) {
        assert_eq!(BulletMarker::parse(line), expected);
    }

    #[rstest]
    #[case("- a", true)]
    #[case("+ b", true)]
    #[case("12. twelve", true)]
    #[case("3) three", true)]
    #[case("3.14 is pi", false)]
    #[case("1.", false)]
    #[case("text", false)]
    fn test_is_list_item(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(BulletMarker::is_list_item(line), expected);
    }
}
