#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

/// `#`-prefixed headings, levels 1 through 6.
pub struct AtxHeading;

impl AtxHeading {
    const MAX_LEVEL: usize = 6;

    /// The hashes must be followed by whitespace or end the line, so
    /// `#hashtag` and `#include` stay text.
    pub fn parse(line: &str) -> Option<Heading> {
        let trimmed = line.trim();
        let hashes = trimmed.bytes().take_while(|&b| b == b'#').count();
        if hashes == 0 || hashes > Self::MAX_LEVEL {
            return None;
        }

        let rest = &trimmed[hashes..];
        if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
            return None;
        }

        Some(Heading {
            level: hashes as u8,
            text: rest.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("# Title", Some((1, "Title")))]
    #[case("###### Deep", Some((6, "Deep")))]
    #[case("##\tTabbed  ", Some((2, "Tabbed")))]
    #[case("  ## Indented", Some((2, "Indented")))]
    #[case("#", Some((1, "")))]
    #[case("####### Seven", None)]
    #[case("#hashtag", None)]
    #[case("plain text", None)]
    #[case("", None)]
    fn test_parse_atx_heading(#[case] line: &str, #[case] expected: Option<(u8, &str)>) {
        let heading = AtxHeading::parse(line);
        assert_eq!(
            heading,
            expected.map(|(level, text)| Heading {
                level,
                text: text.to_string()
            })
        );
    }
}
