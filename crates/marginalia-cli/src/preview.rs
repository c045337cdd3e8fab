//! Turns document lines plus a decoration set into what the terminal shows.
//!
//! Everything here is pure so the mapping between screen columns and byte
//! offsets can be tested without a terminal.

use marginalia_engine::{DecorationKind, DecorationSet, Document, Selection, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Text,
    Selected,
    Widget { active: bool },
}

/// A run of screen cells standing for a run of source bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub kind: SegmentKind,
    /// Source bytes the segment stands for. For a widget this is the whole
    /// replaced range.
    pub span: Span,
}

impl Segment {
    fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// What a click on a screen column lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Widget(Span),
    Offset(usize),
}

/// Content spans of every line, without line endings.
///
/// A document that is empty or ends in a newline gets a trailing empty line
/// so the caret has somewhere to sit.
pub fn line_spans(doc: &Document) -> Vec<Span> {
    let mut spans: Vec<Span> = doc.lines().map(|line| line.content_span()).collect();
    if doc.is_empty() || doc.byte_at(doc.len() - 1) == Some(b'\n') {
        spans.push(Span::at(doc.len()));
    }
    spans
}

/// Index of the line holding `offset`.
pub fn line_of(lines: &[Span], offset: usize) -> usize {
    lines
        .partition_point(|line| line.start <= offset)
        .saturating_sub(1)
}

/// Lays out one line.
///
/// Hidden bytes are dropped, a widget shows its label where its range
/// starts, and the rest of the line is plain or selected text. Tabs are
/// drawn as a single space so one column is always one character.
pub fn render_line(
    text: &str,
    start: usize,
    decorations: &DecorationSet,
    selection: &Selection,
) -> Vec<Segment> {
    let end = start + text.len();
    let line = Span::new(start, end);
    let relevant: Vec<_> = decorations
        .iter()
        .filter(|d| d.span.touches(line))
        .collect();

    let mut segments: Vec<Segment> = Vec::new();
    let positions = text
        .char_indices()
        .map(|(i, ch)| (start + i, Some(ch)))
        .chain(std::iter::once((end, None)));

    for (at, ch) in positions {
        for d in &relevant {
            if let DecorationKind::Widget(widget) = &d.kind
                && d.span.is_empty()
                && d.span.start == at
            {
                segments.push(widget_segment(d.span, widget.label(), widget.is_active()));
            }
        }

        let Some(ch) = ch else { break };

        if let Some(d) = relevant
            .iter()
            .find(|d| d.span.start <= at && at < d.span.end)
        {
            if let DecorationKind::Widget(widget) = &d.kind
                && d.span.start == at
            {
                segments.push(widget_segment(d.span, widget.label(), widget.is_active()));
            }
            continue;
        }

        let kind = if selection
            .ranges()
            .iter()
            .any(|r| r.start <= at && at < r.end)
        {
            SegmentKind::Selected
        } else {
            SegmentKind::Text
        };
        let shown = if ch == '\t' { ' ' } else { ch };
        let next = at + ch.len_utf8();

        match segments.last_mut() {
            Some(last) if last.kind == kind && last.span.end == at => {
                last.text.push(shown);
                last.span.end = next;
            }
            _ => segments.push(Segment {
                text: shown.to_string(),
                kind,
                span: Span::new(at, next),
            }),
        }
    }

    segments
}

fn widget_segment(span: Span, label: String, active: bool) -> Segment {
    Segment {
        text: label,
        kind: SegmentKind::Widget { active },
        span,
    }
}

/// Maps a screen column back onto the line. Columns past the last segment
/// land at `line_end`.
pub fn hit_test(segments: &[Segment], column: usize, line_end: usize) -> Hit {
    let mut x = 0;
    for segment in segments {
        let width = segment.width();
        if column < x + width {
            return match segment.kind {
                SegmentKind::Widget { .. } => Hit::Widget(segment.span),
                SegmentKind::Text | SegmentKind::Selected => {
                    let bytes: usize = segment
                        .text
                        .chars()
                        .take(column - x)
                        .map(char::len_utf8)
                        .sum();
                    Hit::Offset(segment.span.start + bytes)
                }
            };
        }
        x += width;
    }
    Hit::Offset(line_end)
}

/// Screen column of the caret at `offset`.
pub fn caret_column(segments: &[Segment], offset: usize) -> usize {
    let mut x = 0;
    for segment in segments {
        if offset < segment.span.start {
            return x;
        }
        if offset < segment.span.end {
            return match segment.kind {
                SegmentKind::Widget { .. } => x,
                SegmentKind::Text | SegmentKind::Selected => {
                    x + segment
                        .text
                        .char_indices()
                        .take_while(|(i, _)| segment.span.start + i < offset)
                        .count()
                }
            };
        }
        x += segment.width();
    }
    x
}

/// The first widget at or after `caret` that starts on the line ending at
/// `line_end`.
pub fn widget_after(decorations: &DecorationSet, caret: usize, line_end: usize) -> Option<Span> {
    decorations
        .widgets()
        .map(|(span, _)| span)
        .find(|span| span.end >= caret && span.start <= line_end)
}
