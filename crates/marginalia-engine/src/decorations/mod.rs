//! # Decorations
//!
//! Turns scanned markers into rendering instructions for the visible part of
//! a document.
//!
//! Per marker, in live preview mode and with the selection elsewhere:
//!
//! ```text
//! See [Topic]{annotation=3}
//!     ^      ^^ ^^^^^^^^^^^^^
//!     hide   hide  widget {3}
//! ```
//!
//! The anchor text stays visible; the reader sees `See Topic{3}`. Putting
//! the caret on or next to a marker drops its decorations so the raw text can
//! be edited, and source mode drops all of them.
//!
//! - **`set`**: `Decoration`, `DecorationSet` and its checked builder
//! - **`build`**: one full recomputation from a `ViewState`
//! - **`field`**: `AnnotationField`, the holder of the current set

pub mod build;
pub mod field;
pub mod set;

pub use build::{EditorMode, ViewState, build};
pub use field::{AnnotationField, ViewUpdate};
pub use set::{Decoration, DecorationError, DecorationKind, DecorationSet, DecorationSetBuilder};
