//! # Inline-Level Grammar
//!
//! Inline elements are the formatting within blocks. Unlike blocks, inline
//! parsing is driven by **special characters** rather than line-start patterns.
//!
//! | Token | Possible Element |
//! |-------|-----------------|
//! | `[[` | Wikilink |
//! | `[` | Link `[text](url)` or bare link `[text]` |
//! | `` ` `` | Code span |
//! | `*` | Emphasis or strong |
//! | (other) | Plain text |
//!
//! ## Bare Links
//!
//! A `[text]` that isn't followed by `(` is a bare link. Its label gets its
//! own `BARE_LINK_TEXT` node, spanning exactly the bytes between the brackets.
//! Annotation markers hang off that node: `[Topic]{annotation=3}`. The braces
//! themselves are not structure, they stay plain tokens in the paragraph.
//!
//! ## Raw Zones
//!
//! Code spans suppress all other inline parsing inside them, so
//! `` `[x]{annotation=1}` `` never produces a bare link.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse inline content until newline or EOF.
pub fn inline_until_newline(p: &mut Parser<'_, '_>) {
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        inline_element(p);
    }
}

/// Parse a single inline element.
fn inline_element(p: &mut Parser<'_, '_>) {
    match p.current() {
        SyntaxKind::LBRACKET => bracketed(p),
        SyntaxKind::BACKTICK => code_span(p),
        SyntaxKind::STAR => emphasis_or_strong(p),
        _ => p.bump(),
    }
}

/// Dispatch on `[`: wikilink, link, bare link, or a lone bracket.
fn bracketed(p: &mut Parser<'_, '_>) {
    debug_assert!(p.at(SyntaxKind::LBRACKET));

    if p.nth(1) == SyntaxKind::LBRACKET {
        return wikilink(p);
    }

    match p.find_on_line(SyntaxKind::RBRACKET) {
        Some(close) if p.nth(close + 1) == SyntaxKind::LPAREN => link(p),
        Some(close) => bare_link(p, close),
        None => {
            // Unclosed `[` is just text
            let m = p.start();
            p.bump();
            m.complete(p, SyntaxKind::INLINE);
        }
    }
}

/// Parse a wikilink: [[target]] or [[target|alias]]
///
/// An unclosed wikilink still produces a WIKILINK node running to the end of
/// the line.
fn wikilink(p: &mut Parser<'_, '_>) {
    let m = p.start();

    p.bump(); // [
    p.bump(); // [

    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        if p.at(SyntaxKind::RBRACKET) && p.nth(1) == SyntaxKind::RBRACKET {
            p.bump(); // ]
            p.bump(); // ]
            break;
        }
        p.bump();
    }

    m.complete(p, SyntaxKind::WIKILINK);
}

/// Parse a bare link `[label]` whose `]` is `close` tokens ahead.
fn bare_link(p: &mut Parser<'_, '_>, close: usize) {
    let m = p.start();

    p.bump(); // [

    // The label node exists even when empty so `[]{...}` still has an anchor
    let label = p.start();
    for _ in 1..close {
        p.bump();
    }
    label.complete(p, SyntaxKind::BARE_LINK_TEXT);

    p.bump(); // ]

    m.complete(p, SyntaxKind::BARE_LINK);
}

/// Parse a standard link `[text](url)`.
fn link(p: &mut Parser<'_, '_>) {
    let m = p.start();

    p.bump(); // [

    let label = p.start();
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) && !p.at(SyntaxKind::RBRACKET) {
        match p.current() {
            SyntaxKind::BACKTICK => code_span(p),
            SyntaxKind::STAR => emphasis_or_strong(p),
            _ => p.bump(),
        }
    }
    label.complete(p, SyntaxKind::LINK_TEXT);

    // A nested code span may have swallowed the bracket we looked ahead to
    if !p.eat(SyntaxKind::RBRACKET) || !p.eat(SyntaxKind::LPAREN) {
        m.complete(p, SyntaxKind::INLINE);
        return;
    }

    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) && !p.at(SyntaxKind::RPAREN) {
        p.bump();
    }

    if p.eat(SyntaxKind::RPAREN) {
        m.complete(p, SyntaxKind::LINK);
    } else {
        m.complete(p, SyntaxKind::INLINE);
    }
}

/// Parse a code span. A backtick run with no matching run later on the same
/// line is plain text.
fn code_span(p: &mut Parser<'_, '_>) {
    let mut open = 0;
    while p.nth(open) == SyntaxKind::BACKTICK {
        open += 1;
    }

    if !has_closing_run(p, open) {
        for _ in 0..open {
            p.bump();
        }
        return;
    }

    let m = p.start();
    for _ in 0..open {
        p.bump();
    }

    while !p.at_end() {
        if p.at(SyntaxKind::BACKTICK) {
            let run = backtick_run(p, 0);
            for _ in 0..run {
                p.bump();
            }
            if run == open {
                break;
            }
        } else {
            p.bump();
        }
    }

    m.complete(p, SyntaxKind::CODE_SPAN);
}

fn backtick_run(p: &Parser<'_, '_>, from: usize) -> usize {
    let mut run = 0;
    while p.nth(from + run) == SyntaxKind::BACKTICK {
        run += 1;
    }
    run
}

fn has_closing_run(p: &Parser<'_, '_>, open: usize) -> bool {
    let mut i = open;
    loop {
        match p.nth(i) {
            SyntaxKind::EOF | SyntaxKind::NEWLINE => return false,
            SyntaxKind::BACKTICK => {
                let run = backtick_run(p, i);
                if run == open {
                    return true;
                }
                i += run;
            }
            _ => i += 1,
        }
    }
}

/// Parse emphasis *text* or strong **text**.
///
/// Brackets and code spans inside are still parsed, so a marker after an
/// unmatched `*` isn't lost.
fn emphasis_or_strong(p: &mut Parser<'_, '_>) {
    let m = p.start();

    let mut open_count = 0;
    while p.at(SyntaxKind::STAR) && open_count < 2 {
        p.bump();
        open_count += 1;
    }

    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        match p.current() {
            SyntaxKind::STAR => {
                let mut close_count = 0;
                while p.nth(close_count) == SyntaxKind::STAR && close_count < open_count {
                    close_count += 1;
                }

                if close_count >= open_count {
                    for _ in 0..open_count {
                        p.bump();
                    }
                    break;
                }
                p.bump();
            }
            SyntaxKind::LBRACKET => bracketed(p),
            SyntaxKind::BACKTICK => code_span(p),
            _ => p.bump(),
        }
    }

    let kind = if open_count >= 2 {
        SyntaxKind::STRONG
    } else {
        SyntaxKind::EMPHASIS
    };

    m.complete(p, kind);
}
