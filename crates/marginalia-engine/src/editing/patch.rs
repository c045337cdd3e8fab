use crate::span::Span;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Byte ranges of inserted text, in post-edit coordinates. Empty for
    /// pure deletions.
    pub changed: Vec<Span>,
    pub version: u64,
}
