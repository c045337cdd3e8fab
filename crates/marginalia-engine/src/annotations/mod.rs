//! Annotation markers: finding them and turning them into widgets.

pub mod payload;
pub mod scanner;
pub mod widget;

pub use payload::parse_index;
pub use scanner::{Marker, MissingIndex, ScanOptions, UnclosedBrace, scan, scan_nodes};
pub use widget::{AnnotationOpener, AnnotationWidget};
