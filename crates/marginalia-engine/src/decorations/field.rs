use std::rc::Rc;

use log::debug;

use crate::annotations::{AnnotationOpener, ScanOptions};
use crate::decorations::build::{ViewState, build};
use crate::decorations::set::DecorationSet;

/// What changed since the last update. Any flag set triggers a rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    pub doc_changed: bool,
    pub viewport_changed: bool,
    pub selection_changed: bool,
    pub mode_changed: bool,
}

impl ViewUpdate {
    pub const DOC: Self = Self {
        doc_changed: true,
        viewport_changed: false,
        selection_changed: false,
        mode_changed: false,
    };
    pub const VIEWPORT: Self = Self {
        doc_changed: false,
        viewport_changed: true,
        selection_changed: false,
        mode_changed: false,
    };
    pub const SELECTION: Self = Self {
        doc_changed: false,
        viewport_changed: false,
        selection_changed: true,
        mode_changed: false,
    };
    pub const MODE: Self = Self {
        doc_changed: false,
        viewport_changed: false,
        selection_changed: false,
        mode_changed: true,
    };

    pub fn any(self) -> bool {
        self.doc_changed || self.viewport_changed || self.selection_changed || self.mode_changed
    }
}

impl std::ops::BitOr for ViewUpdate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            doc_changed: self.doc_changed || rhs.doc_changed,
            viewport_changed: self.viewport_changed || rhs.viewport_changed,
            selection_changed: self.selection_changed || rhs.selection_changed,
            mode_changed: self.mode_changed || rhs.mode_changed,
        }
    }
}

/// Owns the current [`DecorationSet`] for one view and rebuilds it when the
/// view changes.
///
/// The set is only ever replaced whole, so readers see either the previous
/// set or the new one.
pub struct AnnotationField {
    options: ScanOptions,
    opener: Option<Rc<dyn AnnotationOpener>>,
    decorations: DecorationSet,
}

impl AnnotationField {
    pub fn new(options: ScanOptions, opener: Option<Rc<dyn AnnotationOpener>>) -> Self {
        Self {
            options,
            opener,
            decorations: DecorationSet::empty(),
        }
    }

    /// Creates the field and computes its initial set.
    pub fn attach(
        options: ScanOptions,
        opener: Option<Rc<dyn AnnotationOpener>>,
        view: &ViewState<'_>,
    ) -> Self {
        let mut field = Self::new(options, opener);
        field.decorations = build(view, &field.options, field.opener.as_ref());
        field
    }

    /// Rebuilds from scratch if `update` has any flag set. Returns whether
    /// the decorations differ from before.
    pub fn update(&mut self, view: &ViewState<'_>, update: ViewUpdate) -> bool {
        if !update.any() {
            return false;
        }

        let next = build(view, &self.options, self.opener.as_ref());
        let changed = next != self.decorations;
        if changed {
            debug!("decorations changed after {update:?}");
        }
        self.decorations = next;
        changed
    }

    pub fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }
}
