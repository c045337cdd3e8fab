use crate::decorations::{DecorationKind, DecorationSet};

/// Asserts that every decoration lies inside a document of `doc_len` bytes,
/// that they are sorted by start, and that no two intersect.
pub fn check(doc_len: usize, set: &DecorationSet) {
    let mut previous = None;
    for d in set {
        assert!(
            d.span.start <= d.span.end && d.span.end <= doc_len,
            "decoration span out of bounds: {:?} (document len: {})",
            d.span,
            doc_len
        );
        if let DecorationKind::Hide = d.kind {
            assert!(!d.span.is_empty(), "empty hide decoration at {:?}", d.span);
        }
        if let Some(prev) = previous {
            assert!(
                !d.span.intersects(prev) && d.span.start >= prev.start,
                "decoration {:?} overlaps or precedes {:?}",
                d.span,
                prev
            );
        }
        previous = Some(d.span);
    }
}
