/// Fence signature: the line opens or closes a backtick fence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceSig {
    pub language: Option<String>,
}

/// Role of a line once fence lines have been paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceRole {
    Outside,
    Open,
    Inside,
    Close,
}

impl FenceRole {
    pub fn is_fenced(self) -> bool {
        !matches!(self, FenceRole::Outside)
    }
}

pub struct CodeFence;

impl CodeFence {
    /// Returns the fence signature if `line` starts with three backticks
    /// (after leading whitespace). The language is the first word of the info string.
    pub fn sig(line: &str) -> Option<FenceSig> {
        let rest = line.trim().strip_prefix("```")?;
        let info = rest.trim_start_matches('`').trim();
        let language = info.split_whitespace().next().map(str::to_string);
        Some(FenceSig { language })
    }

    /// Pairs fence lines in order: each fence line opens a fence unless one
    /// is already open, in which case it closes it. A final opener without a
    /// closer is ordinary text, as is everything after it.
    pub fn pair<S: AsRef<str>>(lines: &[S]) -> Vec<FenceRole> {
        let mut roles = vec![FenceRole::Outside; lines.len()];
        let mut open: Option<usize> = None;

        for (i, line) in lines.iter().enumerate() {
            if Self::sig(line.as_ref()).is_none() {
                continue;
            }
            match open.take() {
                Some(start) => {
                    roles[start] = FenceRole::Open;
                    for role in &mut roles[start + 1..i] {
                        *role = FenceRole::Inside;
                    }
                    roles[i] = FenceRole::Close;
                }
                None => open = Some(i),
            }
        }

        roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("```", Some(None))]
    #[case("```rust", Some(Some("rust")))]
    #[case("  ```python extra words", Some(Some("python")))]
    #[case("````js", Some(Some("js")))]
    #[case("``", None)]
    #[case("~~~", None)]
    #[case("text ```", None)]
    fn test_fence_sig(#[case] line: &str, #[case] expected: Option<Option<&str>>) {
        let sig = CodeFence::sig(line);
        assert_eq!(
            sig.map(|s| s.language),
            expected.map(|lang| lang.map(str::to_string))
        );
    }

    #[test]
    fn test_pair_matched_fence() {
        let roles = CodeFence::pair(&["a", "```", "x", "", "```", "b"]);
        assert_eq!(
            roles,
            vec![
                FenceRole::Outside,
                FenceRole::Open,
                FenceRole::Inside,
                FenceRole::Inside,
                FenceRole::Close,
                FenceRole::Outside,
            ]
        );
    }

    #[test]
    fn test_unmatched_final_fence_is_outside() {
        let roles = CodeFence::pair(&["```", "a", "```", "```rust", "b"]);
        assert_eq!(roles[0], FenceRole::Open);
        assert_eq!(roles[2], FenceRole::Close);
        assert_eq!(roles[3], FenceRole::Outside);
        assert_eq!(roles[4], FenceRole::Outside);
    }
}
