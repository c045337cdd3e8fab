pub mod annotations;
pub mod decorations;
pub mod editing;
pub mod error;
pub mod invariants;
pub mod selection;
pub mod span;
pub mod syntax;

// Re-export key types for easier usage
pub use annotations::{
    AnnotationOpener, AnnotationWidget, Marker, MissingIndex, ScanOptions, UnclosedBrace,
    parse_index, scan, scan_nodes,
};
pub use decorations::{
    AnnotationField, Decoration, DecorationError, DecorationKind, DecorationSet,
    DecorationSetBuilder, EditorMode, ViewState, ViewUpdate, build,
};
pub use editing::{Cmd, Document, LineRef, Patch};
pub use error::EngineError;
pub use selection::Selection;
pub use span::Span;
pub use syntax::{NodeSource, SyntaxNodeRef};
