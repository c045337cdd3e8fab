use std::ops::Range;

use xi_rope::delta::Builder;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::Document;
use crate::error::EngineError;

/// Commands that can be applied to the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    InsertText { at: usize, text: String },
    DeleteRange { range: Range<usize> },
    ReplaceRange { range: Range<usize>, text: String },
}

impl Cmd {
    /// The pre-edit byte range this command rewrites.
    pub fn range(&self) -> Range<usize> {
        match self {
            Cmd::InsertText { at, .. } => *at..*at,
            Cmd::DeleteRange { range } | Cmd::ReplaceRange { range, .. } => range.clone(),
        }
    }

    fn inserted_len(&self) -> usize {
        match self {
            Cmd::InsertText { text, .. } | Cmd::ReplaceRange { text, .. } => text.len(),
            Cmd::DeleteRange { .. } => 0,
        }
    }

    /// Maps a pre-edit offset to where it ends up after this command.
    ///
    /// Offsets before the edit stay put, offsets after it shift by the size
    /// difference, and offsets inside a rewritten range land after the new
    /// text. A caret sitting exactly at an insertion point moves past it.
    pub fn transform_offset(&self, offset: usize) -> usize {
        let range = self.range();
        let inserted = self.inserted_len();

        if offset < range.start {
            offset
        } else if offset >= range.end {
            offset - range.len() + inserted
        } else {
            range.start + inserted
        }
    }
}

/// Compile a command into a delta, rejecting ranges the buffer can't take.
pub(crate) fn compile_command(doc: &Document, cmd: &Cmd) -> Result<Delta<RopeInfo>, EngineError> {
    let range = cmd.range();
    check_range(doc, &range)?;

    let mut builder = Builder::new(doc.len());
    match cmd {
        Cmd::InsertText { at, text } => {
            builder.replace(*at..*at, Rope::from(text));
        }
        Cmd::DeleteRange { range } => {
            builder.delete(range.clone());
        }
        Cmd::ReplaceRange { range, text } => {
            builder.replace(range.clone(), Rope::from(text));
        }
    }
    Ok(builder.build())
}

fn check_range(doc: &Document, range: &Range<usize>) -> Result<(), EngineError> {
    if range.start > range.end || range.end > doc.len() {
        return Err(EngineError::EditOutOfBounds {
            range: range.clone().into(),
            len: doc.len(),
        });
    }

    for offset in [range.start, range.end] {
        if !doc.is_char_boundary(offset) {
            return Err(EngineError::NotCharBoundary { offset });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn insert_text_at_start() {
        let mut doc = Document::from_text("world");
        doc.apply(Cmd::InsertText {
            at: 0,
            text: "hello ".to_string(),
        })
        .unwrap();
        assert_eq!(doc.text(), "hello world");
    }

    #[test]
    fn delete_range_removes_marker_payload() {
        let mut doc = Document::from_text("[a]{annotation=1}");
        doc.apply(Cmd::DeleteRange { range: 3..17 }).unwrap();
        assert_eq!(doc.text(), "[a]");
    }

    #[test]
    fn replace_range_swaps_index() {
        let mut doc = Document::from_text("[a]{annotation=1}");
        doc.apply(Cmd::ReplaceRange {
            range: 15..16,
            text: "42".to_string(),
        })
        .unwrap();
        assert_eq!(doc.text(), "[a]{annotation=42}");
    }

    #[test]
    fn out_of_bounds_edit_is_rejected() {
        let mut doc = Document::from_text("abc");
        let err = doc.apply(Cmd::DeleteRange { range: 1..10 }).unwrap_err();
        assert_eq!(
            err,
            EngineError::EditOutOfBounds {
                range: Span::new(1, 10),
                len: 3
            }
        );
        assert_eq!(doc.text(), "abc");
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut doc = Document::from_text("abc");
        #[allow(clippy::reversed_empty_ranges)]
        let result = doc.apply(Cmd::DeleteRange { range: 2..1 });
        assert!(matches!(result, Err(EngineError::EditOutOfBounds { .. })));
    }

    #[test]
    fn edit_inside_multibyte_char_is_rejected() {
        let mut doc = Document::from_text("é!");
        let err = doc
            .apply(Cmd::InsertText {
                at: 1,
                text: "x".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, EngineError::NotCharBoundary { offset: 1 });
    }

    #[rstest]
    #[case::before_insert(Cmd::InsertText { at: 5, text: "ab".into() }, 3, 3)]
    #[case::at_insert(Cmd::InsertText { at: 5, text: "ab".into() }, 5, 7)]
    #[case::after_insert(Cmd::InsertText { at: 5, text: "ab".into() }, 9, 11)]
    #[case::before_delete(Cmd::DeleteRange { range: 4..8 }, 2, 2)]
    #[case::inside_delete(Cmd::DeleteRange { range: 4..8 }, 6, 4)]
    #[case::after_delete(Cmd::DeleteRange { range: 4..8 }, 10, 6)]
    #[case::inside_replace(Cmd::ReplaceRange { range: 4..8, text: "xyz".into() }, 5, 7)]
    #[case::after_replace(Cmd::ReplaceRange { range: 4..8, text: "xyz".into() }, 8, 7)]
    fn transform_offset_follows_edit(#[case] cmd: Cmd, #[case] offset: usize, #[case] expected: usize) {
        assert_eq!(cmd.transform_offset(offset), expected);
    }
}
