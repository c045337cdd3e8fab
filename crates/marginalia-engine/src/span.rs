use std::fmt;
use std::ops::Range;

/// A byte range `[start, end)` into the document buffer.
///
/// Decorations, markers and selections all store spans rather than copied
/// text; slicing the document with a span reproduces the exact source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted span {start}..{end}");
        Self { start, end }
    }

    /// A zero-width span, e.g. a caret.
    pub fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Inclusive intersection: spans that merely share an endpoint touch,
    /// and a zero-width span touches anything it sits on the edge of.
    #[must_use]
    pub fn touches(self, other: Span) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Strict intersection: at least one byte in common, or a zero-width
    /// span strictly inside the other.
    #[must_use]
    pub fn intersects(self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Clamps both ends to `[0, len]`, keeping `start <= end`.
    #[must_use]
    pub fn clamp(self, len: usize) -> Span {
        let start = self.start.min(len);
        let end = self.end.min(len).max(start);
        Span { start, end }
    }

    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span {
            start: range.start,
            end: range.end,
        }
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.range()
    }
}
