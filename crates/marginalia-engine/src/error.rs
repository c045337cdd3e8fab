use thiserror::Error;

use crate::span::Span;

/// Errors from loading or editing a [`Document`](crate::Document).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("edit range {range} is outside the document (length {len})")]
    EditOutOfBounds { range: Span, len: usize },

    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}
