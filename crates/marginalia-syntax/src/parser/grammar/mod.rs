//! # Grammar Rules
//!
//! Each function takes a `&mut Parser`, inspects tokens (`p.current()`,
//! `p.at()`, `p.nth()`), consumes them (`p.bump()`, `p.eat()`) and builds
//! structure (`p.start()` → marker → `complete()`/`abandon()`).
//!
//! - [`block`] - paragraphs and fenced code
//! - [`inline`] - wikilinks, links, bare links, code spans, emphasis
//!
//! Grammar functions are lenient: they never fail, they produce a tree that
//! preserves all input bytes even for half-typed input.

mod block;
mod inline;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root document.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();

    while !p.at_end() {
        block::block(p);
    }

    m.complete(p, SyntaxKind::ROOT);
}
