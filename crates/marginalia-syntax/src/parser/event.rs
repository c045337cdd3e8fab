//! # Parser Events
//!
//! The parser doesn't build the tree directly. It emits a **flat sequence**
//! of events which the [`Sink`](super::sink::Sink) replays into a Rowan tree:
//!
//! ```text
//! Start(BARE_LINK)
//!   Token(LBRACKET)
//!   Start(BARE_LINK_TEXT)
//!     Token(TEXT)
//!   Finish
//!   Token(RBRACKET)
//! Finish
//! ```
//!
//! Start pushes a node, Finish pops it. Placeholders are left behind by
//! abandoned markers and ignored.

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a new composite node.
    Start { kind: SyntaxKind },

    /// Add a token to the current node.
    ///
    /// `n_raw_tokens` says how many lexer tokens this event consumes. Usually
    /// 1, but can be more when several raw tokens are glued together.
    Token { kind: SyntaxKind, n_raw_tokens: u8 },

    /// Finish the current node.
    Finish,

    /// Reserved slot for a node that hasn't been completed (yet).
    Placeholder,
}

impl Event {
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start { kind }
    }

    /// Create a token event for a single raw token.
    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token {
            kind,
            n_raw_tokens: 1,
        }
    }
}
