use std::rc::Rc;

use log::{debug, trace, warn};

use crate::annotations::{AnnotationOpener, AnnotationWidget, Marker, ScanOptions, scan};
use crate::decorations::set::{Decoration, DecorationSet, DecorationSetBuilder};
use crate::editing::Document;
use crate::selection::Selection;
use crate::span::Span;

/// How the host is currently presenting the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorMode {
    /// Markers collapse into widgets.
    #[default]
    LivePreview,
    /// Raw text, no decorations at all.
    Source,
}

/// Everything a build reads, passed in explicitly on every call.
#[derive(Clone, Copy)]
pub struct ViewState<'a> {
    /// `None` when the host has no active document.
    pub document: Option<&'a Document>,
    pub visible_ranges: &'a [Span],
    /// `None` when the host has no selection state to offer.
    pub selection: Option<&'a Selection>,
    pub mode: EditorMode,
}

/// Computes the decorations for the visible part of the document.
///
/// Markers touched by the selection are left as raw text so the user can
/// edit them. The result is rebuilt from scratch; nothing from an earlier
/// call is reused.
pub fn build(
    view: &ViewState<'_>,
    options: &ScanOptions,
    opener: Option<&Rc<dyn AnnotationOpener>>,
) -> DecorationSet {
    if view.mode != EditorMode::LivePreview {
        trace!("source mode, no decorations");
        return DecorationSet::empty();
    }
    let (Some(doc), Some(selection)) = (view.document, view.selection) else {
        trace!("no document or selection, no decorations");
        return DecorationSet::empty();
    };

    let mut markers: Vec<Marker> = merge_ranges(view.visible_ranges, doc.len())
        .into_iter()
        .flat_map(|range| scan(doc, range, options))
        .collect();
    markers.sort_by_key(|m| m.full_span().start);

    let mut builder = DecorationSetBuilder::new(doc.len());
    let mut accepted_end: Option<usize> = None;

    for marker in &markers {
        let full = marker.full_span();

        if selection.overlaps(full.start, full.end) {
            trace!("selection touches marker at {full}, leaving it raw");
            continue;
        }
        if accepted_end.is_some_and(|end| full.start < end) {
            debug!("marker at {full} overlaps an earlier marker, dropping it");
            continue;
        }

        let widget = AnnotationWidget::new(marker, opener.cloned());
        match builder.push_all(decorations_for(marker, widget)) {
            Ok(()) => accepted_end = Some(full.end),
            Err(err) => warn!("skipping marker at {full}: {err}"),
        }
    }

    let set = builder.finish();
    debug!(
        "built {} decorations from {} markers at version {}",
        set.len(),
        markers.len(),
        doc.version()
    );
    set
}

/// Hide `[`, hide `]{`, widget over the payload and closing brace.
fn decorations_for(marker: &Marker, widget: AnnotationWidget) -> Vec<Decoration> {
    let mut group = Vec::with_capacity(3);
    for hidden in [marker.open, marker.brace] {
        if !hidden.is_empty() {
            group.push(Decoration::hide(hidden));
        }
    }
    group.push(Decoration::widget(marker.widget, widget));
    group
}

/// Clamps, sorts and merges touching ranges so no node is scanned twice
/// through overlapping viewports.
fn merge_ranges(ranges: &[Span], len: usize) -> Vec<Span> {
    let mut sorted: Vec<Span> = ranges.iter().map(|&r| r.clamp(len)).collect();
    sorted.sort();

    let mut merged: Vec<Span> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}
