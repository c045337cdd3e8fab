use std::borrow::Cow;

use log::trace;
use marginalia_syntax::{SyntaxNode, parse};
use xi_rope::Rope;
use xi_rope::delta::DeltaElement;

use crate::editing::lines::{LineRef, lines_with_spans};
use crate::editing::{Cmd, Patch, commands};
use crate::error::EngineError;
use crate::span::Span;

/// Core document structure
///
/// ## 1. Single Source of Truth (xi-rope buffer)
/// - **Lossless storage**: Entire document in one `xi_rope::Rope` buffer
/// - **Exact round-trip**: `to_bytes()` returns identical content to original
/// - **Efficient edits**: xi-rope provides O(log n) insert/delete operations
///
/// ## 2. Syntax tree
/// - Lossless Rowan tree, so node ranges are byte offsets into the buffer
/// - Rebuilt after each edit; the tree always describes the current text
///
/// ## Usage Pattern
///
/// ```rust
/// # use marginalia_engine::editing::{Document, Cmd};
/// let mut doc = Document::from_bytes(b"[Topic]{annotation=3}").unwrap();
/// doc.apply(Cmd::DeleteRange { range: 0..1 }).unwrap();
/// assert_eq!(doc.text(), "Topic]{annotation=3}");
/// ```
pub struct Document {
    /// xi-rope buffer containing entire document as UTF-8 bytes
    pub(crate) buffer: Rope,
    /// Syntax tree for the current buffer contents
    pub(crate) tree: SyntaxNode,
    /// Version counter incremented on each edit (enables change detection)
    pub(crate) version: u64,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_text(text))
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            tree: parse(text),
            version: 0,
        }
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    /// Apply command to document
    ///
    /// 1. **Command Compilation**: validate and convert `Cmd` to a `Delta`
    /// 2. **Buffer Application**: apply the delta to the rope
    /// 3. **Reparse**: rebuild the syntax tree from the new text
    /// 4. **Version Increment**: update document version for change detection
    ///
    /// A rejected command leaves the document untouched.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EngineError> {
        let delta = commands::compile_command(self, &cmd)?;

        // Track inserted ranges for the patch
        let mut changed = Vec::new();
        let mut cursor = 0;
        for op in delta.els.iter() {
            match op {
                DeltaElement::Copy(from, to) => {
                    cursor += to - from;
                }
                DeltaElement::Insert(inserted) => {
                    let start = cursor;
                    let end = cursor + inserted.len();
                    changed.push(Span::new(start, end));
                    cursor = end;
                }
            }
        }

        self.buffer = delta.apply(&self.buffer);
        self.tree = parse(&self.buffer.to_string());
        self.version += 1;

        trace!(
            "applied {:?}, document now {} bytes at version {}",
            cmd,
            self.buffer.len(),
            self.version
        );

        Ok(Patch {
            changed,
            version: self.version,
        })
    }

    /// Get the current version
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get the current text content
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Syntax tree for the current text.
    pub fn syntax(&self) -> &SyntaxNode {
        &self.tree
    }

    /// Text covered by `span`.
    ///
    /// Out-of-range spans are clamped to the document and ends falling inside
    /// a multi-byte character are pulled back to its start, so this never
    /// panics; callers working with stale offsets just get less text.
    pub fn slice(&self, span: Span) -> Cow<'_, str> {
        let span = span.clamp(self.len());
        let start = self.floor_char_boundary(span.start);
        let end = self.floor_char_boundary(span.end);
        self.buffer.slice_to_cow(start..end)
    }

    /// The byte at `offset`, or `None` past the end.
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        (offset < self.len()).then(|| self.buffer.byte_at(offset))
    }

    /// Absolute offset of the first `byte` at or after `from`.
    ///
    /// A `from` in the middle of a multi-byte character is fine: the scan
    /// starts at that character's first byte and skips anything before
    /// `from`.
    pub fn find_byte(&self, from: usize, byte: u8) -> Option<usize> {
        let len = self.len();
        if from >= len {
            return None;
        }

        let start = self.floor_char_boundary(from);
        let mut offset = start;
        for chunk in self.buffer.iter_chunks(start..len) {
            if let Some(i) = chunk
                .bytes()
                .enumerate()
                .position(|(i, b)| b == byte && offset + i >= from)
            {
                return Some(offset + i);
            }
            offset += chunk.len();
        }
        None
    }

    /// Lines of the document with their byte spans.
    pub fn lines(&self) -> impl Iterator<Item = LineRef> + '_ {
        lines_with_spans(&self.buffer)
    }

    /// Start of the character before `offset`, or 0.
    pub fn prev_char(&self, offset: usize) -> usize {
        let offset = offset.min(self.len());
        self.buffer.prev_codepoint_offset(offset).unwrap_or(0)
    }

    /// End of the character at `offset`, or the document length.
    pub fn next_char(&self, offset: usize) -> usize {
        let len = self.len();
        if offset >= len {
            return len;
        }
        self.buffer.next_codepoint_offset(offset).unwrap_or(len)
    }

    pub(crate) fn is_char_boundary(&self, offset: usize) -> bool {
        offset <= self.len() && self.buffer.is_codepoint_boundary(offset)
    }

    fn floor_char_boundary(&self, offset: usize) -> usize {
        if self.is_char_boundary(offset) {
            offset
        } else {
            self.buffer.prev_codepoint_offset(offset).unwrap_or(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marginalia_syntax::SyntaxKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn roundtrip_bytes() {
        let input = b"# Notes\n\nSee [Topic]{annotation=3}\n";
        let doc = Document::from_bytes(input).unwrap();
        assert_eq!(doc.to_bytes(), input);
        assert_eq!(doc.len(), input.len());
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let result = Document::from_bytes(&[b'a', 0xff, b'b']);
        assert!(matches!(result, Err(EngineError::InvalidUtf8(_))));
    }

    #[test]
    fn empty_document() {
        let doc = Document::from_text("");
        assert!(doc.is_empty());
        assert_eq!(doc.byte_at(0), None);
        assert_eq!(doc.find_byte(0, b'}'), None);
        assert_eq!(doc.slice(Span::new(0, 10)), "");
    }

    #[test]
    fn apply_reports_changed_range_and_version() {
        let mut doc = Document::from_text("[a]{}");
        let patch = doc
            .apply(Cmd::InsertText {
                at: 4,
                text: "annotation=9".to_string(),
            })
            .unwrap();
        assert_eq!(patch.changed, vec![Span::new(4, 16)]);
        assert_eq!(patch.version, 1);
        assert_eq!(doc.version(), 1);
        assert_eq!(doc.text(), "[a]{annotation=9}");
    }

    #[test]
    fn pure_delete_reports_no_inserted_ranges() {
        let mut doc = Document::from_text("abcdef");
        let patch = doc.apply(Cmd::DeleteRange { range: 1..3 }).unwrap();
        assert!(patch.changed.is_empty());
        assert_eq!(doc.text(), "adef");
    }

    #[test]
    fn syntax_tree_follows_edits() {
        let mut doc = Document::from_text("Topic{annotation=1}");
        let has_anchor = |doc: &Document| {
            doc.syntax()
                .descendants()
                .any(|n| n.kind() == SyntaxKind::BARE_LINK_TEXT)
        };
        assert!(!has_anchor(&doc));

        doc.apply(Cmd::InsertText {
            at: 5,
            text: "]".to_string(),
        })
        .unwrap();
        doc.apply(Cmd::InsertText {
            at: 0,
            text: "[".to_string(),
        })
        .unwrap();

        assert_eq!(doc.text(), "[Topic]{annotation=1}");
        assert!(has_anchor(&doc));
        assert_eq!(doc.syntax().text().to_string(), doc.text());
    }

    #[test]
    fn slice_clamps_out_of_range() {
        let doc = Document::from_text("hello");
        assert_eq!(doc.slice(Span::new(2, 100)), "llo");
        assert_eq!(doc.slice(Span::new(50, 100)), "");
    }

    #[test]
    fn slice_never_splits_a_character() {
        let doc = Document::from_text("aé b");
        // é occupies bytes 1..3
        assert_eq!(doc.slice(Span::new(0, 2)), "a");
        assert_eq!(doc.slice(Span::new(2, 5)), "é b");
    }

    #[test]
    fn byte_at_and_find_byte() {
        let doc = Document::from_text("[X]{annotation=2} and {more}");
        assert_eq!(doc.byte_at(3), Some(b'{'));
        assert_eq!(doc.byte_at(100), None);
        assert_eq!(doc.find_byte(5, b'}'), Some(16));
        assert_eq!(doc.find_byte(17, b'}'), Some(27));
        assert_eq!(doc.find_byte(28, b'}'), None);
    }

    #[test]
    fn find_byte_from_inside_a_character() {
        let doc = Document::from_text("é}");
        assert_eq!(doc.find_byte(1, b'}'), Some(2));

        // The byte right after a split character is still examined
        let doc = Document::from_text("aé}é}");
        assert_eq!(doc.find_byte(2, b'}'), Some(3));
        assert_eq!(doc.find_byte(5, b'}'), Some(6));
        // Nothing before `from` is reported, even when the scan starts earlier
        assert_eq!(doc.find_byte(2, 0xc3), Some(4));
    }

    #[test]
    fn char_stepping() {
        let doc = Document::from_text("aé\nb");
        assert_eq!(doc.next_char(0), 1);
        assert_eq!(doc.next_char(1), 3);
        assert_eq!(doc.prev_char(3), 1);
        assert_eq!(doc.prev_char(0), 0);
        assert_eq!(doc.next_char(doc.len()), doc.len());
        assert_eq!(doc.prev_char(100), 4);
    }

    #[test]
    fn lines_carry_spans() {
        let doc = Document::from_text("# T\n\n[a]{b}\n");
        let spans: Vec<_> = doc.lines().map(|l| l.content_span()).collect();
        assert_eq!(
            spans,
            vec![Span::new(0, 3), Span::new(4, 4), Span::new(5, 11)]
        );
    }

    #[test]
    fn find_byte_spans_rope_chunks() {
        // Large enough that xi-rope splits it over several leaves
        let mut text = "x".repeat(5000);
        text.push('}');
        let doc = Document::from_text(&text);
        assert_eq!(doc.find_byte(10, b'}'), Some(5000));
    }
}
