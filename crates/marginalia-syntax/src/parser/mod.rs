//! # Parser - Event-Based Tree Construction
//!
//! Transforms a token stream into a syntax tree using the event-based
//! architecture from rust-analyzer: grammar rules emit a flat list of
//! [`Event`]s and the [`Sink`] turns them into a Rowan tree afterwards.
//!
//! ## The Marker System
//!
//! `parser.start()` hands out a [`Marker`] which **must** be either completed
//! (`marker.complete(p, KIND)`) or abandoned (`marker.abandon(p)`). Dropping
//! it otherwise panics, so a half-built node can't slip into the tree.
//!
//! ```ignore
//! let m = parser.start();
//! parser.bump();
//! m.complete(parser, SyntaxKind::PARAGRAPH);
//! ```
//!
//! The main entry point is [`parse`]:
//!
//! ```
//! use marginalia_syntax::parse;
//!
//! let tree = parse("See [Topic]{annotation=3}\n");
//! assert_eq!(tree.text().to_string(), "See [Topic]{annotation=3}\n");
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// The parser state machine.
///
/// Holds the token stream, current position, and accumulated events.
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Parser<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
        }
    }

    /// Parse the tokens and return a syntax tree.
    pub fn parse(mut self) -> SyntaxNode {
        grammar::root(&mut self);
        Sink::new(self.tokens, self.events).finish()
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Lookahead distance to the first `kind` token before the end of the line.
    pub fn find_on_line(&self, kind: SyntaxKind) -> Option<usize> {
        let mut n = 0;
        loop {
            match self.nth(n) {
                SyntaxKind::EOF | SyntaxKind::NEWLINE => return None,
                k if k == kind => return Some(n),
                _ => n += 1,
            }
        }
    }
}

/// A marker for a node being constructed.
///
/// Points at the `Placeholder` event pushed by `parser.start()`. Completing
/// turns the placeholder into a `Start` and pushes a `Finish`; abandoning
/// removes the placeholder when nothing was pushed after it, otherwise leaves
/// it inert for the Sink to skip.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    pos: usize,
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::start(kind);
        p.events.push(Event::Finish);
    }

    /// Abandon this marker without creating a node.
    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// Parse markdown source into a syntax tree.
pub fn parse(source: &str) -> SyntaxNode {
    let tokens = lex(source);
    Parser::new(&tokens).parse()
}
