use thiserror::Error;

use crate::annotations::AnnotationWidget;
use crate::span::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum DecorationKind {
    /// Render nothing for the span.
    Hide,
    /// Render the widget in place of the span.
    Widget(AnnotationWidget),
}

/// A rendering instruction over a byte range, layered on top of the
/// unmodified document text.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub span: Span,
    pub kind: DecorationKind,
}

impl Decoration {
    pub fn hide(span: Span) -> Self {
        Self {
            span,
            kind: DecorationKind::Hide,
        }
    }

    pub fn widget(span: Span, widget: AnnotationWidget) -> Self {
        Self {
            span,
            kind: DecorationKind::Widget(widget),
        }
    }

    pub fn as_widget(&self) -> Option<&AnnotationWidget> {
        match &self.kind {
            DecorationKind::Widget(widget) => Some(widget),
            DecorationKind::Hide => None,
        }
    }
}

/// Decorations ordered by start offset, pairwise non-overlapping and inside
/// the document. Only [`DecorationSetBuilder`] makes non-empty ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecorationSet {
    decorations: Vec<Decoration>,
}

impl DecorationSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.decorations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Decoration> {
        self.decorations.iter()
    }

    pub fn as_slice(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn widgets(&self) -> impl Iterator<Item = (Span, &AnnotationWidget)> {
        self.decorations
            .iter()
            .filter_map(|d| d.as_widget().map(|w| (d.span, w)))
    }

    /// The widget covering `offset`. A zero-width widget covers the offset it
    /// sits at.
    pub fn widget_at(&self, offset: usize) -> Option<(Span, &AnnotationWidget)> {
        self.widgets().find(|(span, _)| {
            (span.start <= offset && offset < span.end) || (span.is_empty() && span.start == offset)
        })
    }
}

impl<'a> IntoIterator for &'a DecorationSet {
    type Item = &'a Decoration;
    type IntoIter = std::slice::Iter<'a, Decoration>;

    fn into_iter(self) -> Self::IntoIter {
        self.decorations.iter()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecorationError {
    #[error("decoration {span} lies outside the document (length {len})")]
    OutOfBounds { span: Span, len: usize },

    #[error("decoration {span} starts before the previous one at {previous}")]
    OutOfOrder { span: Span, previous: Span },

    #[error("decoration {span} overlaps the previous one at {previous}")]
    Overlapping { span: Span, previous: Span },
}

/// Accumulates decorations in document order, rejecting anything that would
/// break the [`DecorationSet`] ordering guarantees.
#[derive(Debug)]
pub struct DecorationSetBuilder {
    doc_len: usize,
    decorations: Vec<Decoration>,
    last: Option<Span>,
}

impl DecorationSetBuilder {
    pub fn new(doc_len: usize) -> Self {
        Self {
            doc_len,
            decorations: Vec::new(),
            last: None,
        }
    }

    pub fn push(&mut self, decoration: Decoration) -> Result<(), DecorationError> {
        self.validate(decoration.span, self.last)?;
        self.last = Some(decoration.span);
        self.decorations.push(decoration);
        Ok(())
    }

    /// Adds a group of decorations all-or-nothing: if any of them is
    /// rejected, none are added.
    pub fn push_all(&mut self, group: Vec<Decoration>) -> Result<(), DecorationError> {
        let mut last = self.last;
        for decoration in &group {
            self.validate(decoration.span, last)?;
            last = Some(decoration.span);
        }
        self.last = last;
        self.decorations.extend(group);
        Ok(())
    }

    pub fn finish(self) -> DecorationSet {
        DecorationSet {
            decorations: self.decorations,
        }
    }

    fn validate(&self, span: Span, last: Option<Span>) -> Result<(), DecorationError> {
        if span.start > span.end || span.end > self.doc_len {
            return Err(DecorationError::OutOfBounds {
                span,
                len: self.doc_len,
            });
        }

        let Some(previous) = last else {
            return Ok(());
        };
        if span.start < previous.start {
            return Err(DecorationError::OutOfOrder { span, previous });
        }
        if span.start < previous.end {
            return Err(DecorationError::Overlapping { span, previous });
        }
        Ok(())
    }
}
