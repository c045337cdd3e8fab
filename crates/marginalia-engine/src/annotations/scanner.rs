//! # Marker Scanner
//!
//! Finds annotation markers in a range of the document.
//!
//! A marker is a bare link immediately followed by a brace payload:
//!
//! ```text
//! See [Topic]{annotation=3}
//!     ^     ^^            ^
//!     |     ||            closing brace
//!     |     |opening brace (to + 1)
//!     |     anchor end / `]` (to)
//!     `[` (from - 1)
//! ```
//!
//! Recognition is structural: the anchor must be a node carrying the
//! configured type tag. Only the brace that follows is checked lexically, by
//! looking at the single byte at `to + 1`. The payload runs to the first `}`
//! after the opening brace; there is no escaping, so a stray `}` in between
//! ends it early.

use log::{debug, trace};
use marginalia_syntax::SyntaxKind;

use crate::annotations::payload::parse_index;
use crate::editing::Document;
use crate::span::Span;
use crate::syntax::NodeSource;

/// What to do with a marker whose payload never closes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnclosedBrace {
    /// Drop the marker; the raw text renders untouched.
    #[default]
    Skip,
    /// Keep it, with the payload running to the end of the document.
    ToEndOfDocument,
}

/// What to do with a marker whose payload has no `annotation=<digits>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingIndex {
    /// Render a widget that can't be activated.
    #[default]
    Render,
    /// Drop the marker.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Type tag of the node that anchors a marker.
    pub anchor_tag: String,
    pub unclosed_brace: UnclosedBrace,
    pub missing_index: MissingIndex,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            anchor_tag: SyntaxKind::BARE_LINK_TEXT.tag().to_string(),
            unclosed_brace: UnclosedBrace::default(),
            missing_index: MissingIndex::default(),
        }
    }
}

/// One marker occurrence. Derived on every scan, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// The anchor node itself (`Topic`).
    pub anchor: Span,
    /// The byte before the anchor (`[`), hidden in live mode.
    pub open: Span,
    /// The anchor's closing bracket and the opening brace (`]{`), hidden.
    pub brace: Span,
    /// Text between the braces, excluding both.
    pub payload: Span,
    /// What the widget replaces: the payload plus the closing brace when
    /// there is one.
    pub widget: Span,
    pub anchor_text: String,
    pub payload_text: String,
    pub index: Option<u32>,
    /// False when the payload had no closing brace and was extended to the
    /// end of the document.
    pub closed: bool,
}

impl Marker {
    /// Everything the marker's decorations cover, from the hidden `[` through
    /// the widget.
    pub fn full_span(&self) -> Span {
        Span::new(self.open.start, self.widget.end.max(self.open.end))
    }
}

/// Scans `range` of `doc` for markers, using the document's own syntax tree.
pub fn scan(doc: &Document, range: Span, options: &ScanOptions) -> Vec<Marker> {
    scan_nodes(doc, doc, range, options)
}

/// Scans `range` for markers, taking structure from `nodes` and text from
/// `doc`.
///
/// Markers come back in the order `nodes` yields their anchors. A malformed
/// marker is skipped (or degraded, per `options`) without affecting the rest.
pub fn scan_nodes(
    nodes: &dyn NodeSource,
    doc: &Document,
    range: Span,
    options: &ScanOptions,
) -> Vec<Marker> {
    let mut markers = Vec::new();

    nodes.iterate(range, &mut |node| {
        if node.type_name != options.anchor_tag {
            return;
        }
        trace!("anchor candidate at {}", node.span);
        if let Some(marker) = marker_at(doc, node.span, options) {
            markers.push(marker);
        }
    });

    markers
}

fn marker_at(doc: &Document, anchor: Span, options: &ScanOptions) -> Option<Marker> {
    let Span { start: from, end: to } = anchor;

    if from == 0 || to > doc.len() {
        debug!("anchor at {anchor} has no room for an opening bracket, skipping");
        return None;
    }

    if doc.byte_at(to + 1) != Some(b'{') {
        return None;
    }

    let payload_start = to + 2;
    let (payload, widget, closed) = match doc.find_byte(payload_start, b'}') {
        Some(close) => (
            Span::new(payload_start, close),
            Span::new(payload_start, close + 1),
            true,
        ),
        None => match options.unclosed_brace {
            UnclosedBrace::Skip => {
                debug!("marker at {anchor} has no closing brace, skipping");
                return None;
            }
            UnclosedBrace::ToEndOfDocument => {
                debug!("marker at {anchor} has no closing brace, extending to end of document");
                let rest = Span::new(payload_start, doc.len()).clamp(doc.len());
                (rest, rest, false)
            }
        },
    };

    let payload_text = doc.slice(payload).into_owned();
    let index = parse_index(&payload_text);

    if index.is_none() && options.missing_index == MissingIndex::Skip {
        debug!("marker at {anchor} has no index, skipping");
        return None;
    }

    Some(Marker {
        anchor,
        open: Span::new(from - 1, from),
        brace: Span::new(to, payload_start),
        payload,
        widget,
        anchor_text: doc.slice(anchor).into_owned(),
        payload_text,
        index,
        closed,
    })
}
