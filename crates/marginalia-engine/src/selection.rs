use crate::editing::Cmd;
use crate::span::Span;

/// The host's cursor/selection state: one or more ranges, carets being
/// zero-width. Read on every recomputation, never modified by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ranges: Vec<Span>,
    main: usize,
}

impl Selection {
    /// A single caret.
    pub fn cursor(at: usize) -> Self {
        Self {
            ranges: vec![Span::at(at)],
            main: 0,
        }
    }

    /// A single range from `anchor` to `head`, in either direction.
    pub fn single(anchor: usize, head: usize) -> Self {
        Self {
            ranges: vec![Span::new(anchor.min(head), anchor.max(head))],
            main: 0,
        }
    }

    /// Several ranges; `main` indexes into `ranges` as given. Ranges are
    /// stored sorted by start. An empty list becomes a caret at 0.
    pub fn new(mut ranges: Vec<Span>, main: usize) -> Self {
        if ranges.is_empty() {
            return Self::cursor(0);
        }

        let main_span = ranges[main.min(ranges.len() - 1)];
        ranges.sort();
        let main = ranges.iter().position(|r| *r == main_span).unwrap_or(0);

        Self { ranges, main }
    }

    pub fn ranges(&self) -> &[Span] {
        &self.ranges
    }

    /// The primary range, the one a caret-driven UI follows.
    pub fn main(&self) -> Span {
        self.ranges[self.main]
    }

    /// True when any range touches `[from, to]`.
    ///
    /// Bounds are inclusive on both sides, so a caret sitting right before
    /// or right after a marker counts as overlapping it.
    pub fn overlaps(&self, from: usize, to: usize) -> bool {
        self.ranges.iter().any(|r| r.start <= to && r.end >= from)
    }

    /// Carries every range through an edit.
    pub fn map(&self, cmd: &Cmd) -> Selection {
        let ranges = self
            .ranges
            .iter()
            .map(|r| {
                let start = cmd.transform_offset(r.start);
                let end = cmd.transform_offset(r.end).max(start);
                Span::new(start, end)
            })
            .collect();
        Selection {
            ranges,
            main: self.main,
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::cursor(0)
    }
}
