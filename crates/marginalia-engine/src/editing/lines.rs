use xi_rope::Rope;

use crate::span::Span;

/// A reference to a single line in the rope with its byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// Byte span of this line in the rope (includes newline if present).
    pub span: Span,
    /// The line text, including the newline if present.
    pub text: String,
}

impl LineRef {
    /// The span without the trailing line ending.
    pub fn content_span(&self) -> Span {
        Span::new(self.span.start, self.span.start + self.content().len())
    }

    /// The text without the trailing line ending.
    pub fn content(&self) -> &str {
        self.text
            .strip_suffix('\n')
            .map(|t| t.strip_suffix('\r').unwrap_or(t))
            .unwrap_or(&self.text)
    }
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` to preserve newline characters so consecutive spans tile
/// the whole rope.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).map(move |line| {
        let start = offset;
        offset += line.len();
        LineRef {
            span: Span::new(start, offset),
            text: line.into_owned(),
        }
    })
}
