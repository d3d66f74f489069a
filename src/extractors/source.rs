//! Line-indexed view over a file's text

/// File content split on `\n` boundaries
///
/// Lines keep any trailing `\r`, so slices rejoined with `\n` reproduce the
/// original bytes exactly.
#[derive(Debug, Clone)]
pub struct SourceLines<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SourceLines<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.split('\n').collect(),
        }
    }

    /// Lines `start_line..=end_line` (1-based) joined with `\n`
    ///
    /// Out-of-range lines are clipped to the file; an inverted or empty range
    /// yields an empty string.
    pub fn slice(&self, start_line: u32, end_line: u32) -> String {
        if start_line == 0 || end_line < start_line {
            return String::new();
        }

        let start = (start_line - 1) as usize;
        if start >= self.lines.len() {
            return String::new();
        }
        let end = std::cmp::min(end_line as usize, self.lines.len());

        self.lines[start..end].join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_is_inclusive_of_both_lines() {
        let lines = SourceLines::new("one\ntwo\nthree\nfour");
        assert_eq!(lines.slice(2, 3), "two\nthree");
        assert_eq!(lines.slice(1, 1), "one");
        assert_eq!(lines.slice(4, 4), "four");
    }

    #[test]
    fn test_slice_clips_past_end_of_file() {
        let lines = SourceLines::new("a\nb");
        assert_eq!(lines.slice(2, 10), "b");
        assert_eq!(lines.slice(5, 6), "");
    }

    #[test]
    fn test_slice_rejects_inverted_and_zero_ranges() {
        let lines = SourceLines::new("a\nb\nc");
        assert_eq!(lines.slice(3, 2), "");
        assert_eq!(lines.slice(0, 2), "");
    }

    #[test]
    fn test_slice_preserves_carriage_returns() {
        let lines = SourceLines::new("a\r\nb\r\nc");
        assert_eq!(lines.slice(1, 2), "a\r\nb\r");
    }
}
