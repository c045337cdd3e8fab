//! Block-level grammar rules.
//!
//! Only two kinds of block matter for finding markers: fenced code, whose
//! lines are never parsed inline, and paragraphs, which hold everything
//! else. Headings, quotes and list items are read as paragraph text, so a
//! marker inside them is found the same way as anywhere else.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::inline;

/// Parse one block, after any blank lines in front of it.
pub fn block(p: &mut Parser<'_, '_>) {
    // Blank lines between blocks belong to the root
    while p.eat(SyntaxKind::NEWLINE) {}

    if p.at_end() {
        return;
    }

    if fence_len(p) > 0 {
        fenced_code(p);
    } else {
        paragraph(p);
    }
}

/// Length of the fence opening at the current token, or 0 when the line
/// doesn't start with three or more backticks or tildes.
fn fence_len(p: &Parser<'_, '_>) -> usize {
    let marker = p.current();
    if !matches!(marker, SyntaxKind::BACKTICK | SyntaxKind::TILDE) {
        return 0;
    }

    let mut len = 0;
    while p.nth(len) == marker {
        len += 1;
    }

    if len >= 3 { len } else { 0 }
}

fn skip_rest_of_line(p: &mut Parser<'_, '_>) {
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        p.bump();
    }
    p.eat(SyntaxKind::NEWLINE);
}

/// Parse a fenced code block. Its lines are a raw zone: no inline parsing.
///
/// The block closes on a line starting with at least as many of the same
/// fence character. An unclosed fence runs to the end of the document.
fn fenced_code(p: &mut Parser<'_, '_>) {
    let m = p.start();

    let marker = p.current();
    let open = fence_len(p);

    // Opening fence plus info string
    skip_rest_of_line(p);

    while !p.at_end() {
        let closes = p.at(marker) && fence_len(p) >= open;
        skip_rest_of_line(p);
        if closes {
            break;
        }
    }

    m.complete(p, SyntaxKind::FENCED_CODE);
}

/// Parse a paragraph: lines of inline content up to a blank line, the end
/// of input, or a line opening a fence.
fn paragraph(p: &mut Parser<'_, '_>) {
    let m = p.start();

    loop {
        inline::inline_until_newline(p);

        if !p.eat(SyntaxKind::NEWLINE) {
            break;
        }
        if p.at_end() || p.at(SyntaxKind::NEWLINE) || fence_len(p) > 0 {
            break;
        }
    }

    m.complete(p, SyntaxKind::PARAGRAPH);
}
