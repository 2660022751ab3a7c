//! Source locations.
//!
//! Every token and tree node records where it starts so diagnostics can
//! point back into the Python source.

use std::fmt;

/// A region of source text, identified by its starting line and column.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, byte-based).
    pub col: u32,
    /// Length in bytes.
    pub len: u32,
}

impl Span {
    #[inline]
    pub fn new(line: u32, col: u32, len: u32) -> Self {
        Self { line, col, len }
    }

    /// A zero-length span, used for synthesized tokens like `Dedent`.
    #[inline]
    pub fn point(line: u32, col: u32) -> Self {
        Self { line, col, len: 0 }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Column one past the last byte covered on the starting line.
    #[inline]
    pub fn end_col(&self) -> u32 {
        self.col + self.len
    }

    /// Extend this span so it also covers `other`.
    ///
    /// Spans on different lines keep the first position and accumulate
    /// length; only single-line spans are exact.
    #[inline]
    pub fn to(self, other: Span) -> Span {
        if self.line == other.line {
            let start = self.col.min(other.col);
            let end = self.end_col().max(other.end_col());
            Span::new(self.line, start, end - start)
        } else if other.line < self.line {
            other.to(self)
        } else {
            Span::new(self.line, self.col, self.len + other.len)
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_line_col() {
        assert_eq!(Span::new(3, 15, 5).to_string(), "3:15");
        assert_eq!(format!("{:?}", Span::point(1, 1)), "1:1");
    }

    #[test]
    fn point_is_empty() {
        assert!(Span::point(2, 4).is_empty());
        assert!(!Span::new(2, 4, 1).is_empty());
    }

    #[test]
    fn to_covers_both_on_one_line() {
        // `a + bc` : `a` at col 1, `bc` at col 5
        let joined = Span::new(1, 1, 1).to(Span::new(1, 5, 2));
        assert_eq!(joined, Span::new(1, 1, 6));

        let reversed = Span::new(1, 5, 2).to(Span::new(1, 1, 1));
        assert_eq!(reversed, Span::new(1, 1, 6));
    }

    #[test]
    fn to_across_lines_keeps_earliest_start() {
        let joined = Span::new(4, 9, 3).to(Span::new(2, 1, 2));
        assert_eq!(joined.line, 2);
        assert_eq!(joined.col, 1);
        assert_eq!(joined.len, 5);
    }
}
