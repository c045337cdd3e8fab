//! The boundary between the engine and whatever parses the document.
//!
//! The scanner only needs "give me the nodes in this range, each with a type
//! tag and a byte span". Anything able to answer that can drive it, whether
//! the Rowan tree every [`Document`] carries or a fixed node list in a test.

use log::warn;
use marginalia_syntax::{TextRange, TextSize, nodes_in_range};

use crate::editing::Document;
use crate::span::Span;

/// A structural node as seen by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxNodeRef<'a> {
    pub type_name: &'a str,
    pub span: Span,
}

/// Yields structural nodes restricted to a byte range.
pub trait NodeSource {
    /// Calls `visitor` once per node touching `range` (inclusive at both
    /// ends), in document order.
    fn iterate(&self, range: Span, visitor: &mut dyn FnMut(SyntaxNodeRef<'_>));
}

impl NodeSource for Document {
    fn iterate(&self, range: Span, visitor: &mut dyn FnMut(SyntaxNodeRef<'_>)) {
        let Some(text_range) = to_text_range(range.clamp(self.len())) else {
            warn!("range {range} does not fit a syntax tree offset, skipping");
            return;
        };

        for node in nodes_in_range(self.syntax(), text_range) {
            let r = node.text_range();
            visitor(SyntaxNodeRef {
                type_name: node.kind().tag(),
                span: Span::new(r.start().into(), r.end().into()),
            });
        }
    }
}

fn to_text_range(span: Span) -> Option<TextRange> {
    let start = TextSize::try_from(span.start).ok()?;
    let end = TextSize::try_from(span.end).ok()?;
    Some(TextRange::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect(doc: &Document, range: Span) -> Vec<(String, Span)> {
        let mut nodes = Vec::new();
        doc.iterate(range, &mut |node| {
            nodes.push((node.type_name.to_string(), node.span));
        });
        nodes
    }

    #[test]
    fn document_yields_tagged_nodes() {
        let doc = Document::from_text("See [Topic]{annotation=3}\n");
        let nodes = collect(&doc, Span::new(0, doc.len()));
        assert_eq!(
            nodes,
            vec![
                ("ROOT".to_string(), Span::new(0, 26)),
                ("PARAGRAPH".to_string(), Span::new(0, 26)),
                ("BARE_LINK".to_string(), Span::new(4, 11)),
                ("BARE_LINK_TEXT".to_string(), Span::new(5, 10)),
            ]
        );
    }

    #[test]
    fn range_past_end_is_clamped() {
        let doc = Document::from_text("[a]{b}");
        let nodes = collect(&doc, Span::new(2, 500));
        assert!(nodes.iter().any(|(tag, _)| tag == "BARE_LINK_TEXT"));
    }

    #[test]
    fn empty_document_yields_only_root() {
        let doc = Document::from_text("");
        let nodes = collect(&doc, Span::new(0, 0));
        assert_eq!(nodes, vec![("ROOT".to_string(), Span::new(0, 0))]);
    }
}
