/// Maps byte offsets to 1-based line and column numbers.
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self {
            source,
            line_starts,
        }
    }

    /// Columns count characters, not bytes.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let start = self.line_starts[line];
        let column = self
            .source
            .get(start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - start);
        (line + 1, column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_offsets() {
        let index = LineIndex::new("describe.only()");
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(9), (1, 10));
    }

    #[test]
    fn later_lines_restart_columns() {
        let index = LineIndex::new("a\nbb\n  it.only()\n");
        assert_eq!(index.line_col(2), (2, 1));
        assert_eq!(index.line_col(5), (3, 1));
        assert_eq!(index.line_col(10), (3, 6));
    }

    #[test]
    fn multibyte_characters_count_once() {
        let index = LineIndex::new("\u{e9}\u{e9}.only");
        assert_eq!(index.line_col(5), (1, 4));
    }

    #[test]
    fn offsets_past_the_end_clamp() {
        let index = LineIndex::new("ab");
        assert_eq!(index.line_col(99), (1, 3));
    }
}
