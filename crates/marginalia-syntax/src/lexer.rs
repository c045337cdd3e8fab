//! # Lexer - Tokenizing Markdown Source
//!
//! This module provides the first stage of parsing: breaking source text into
//! tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte in the input appears in exactly one token. We never skip or
//! discard characters, which is what makes round-tripping possible and keeps
//! node spans equal to document byte offsets:
//!
//! ```
//! use marginalia_syntax::lexer::lex;
//!
//! let input = "See [Topic]{annotation=3}\n";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Token Design
//!
//! Tokens are minimal and context-free. The lexer doesn't know whether `[`
//! opens a wikilink, a link or a bare link, or whether `{` starts an
//! annotation payload; that's the parser's (and the scanner's) job.
//!
//! Everything that isn't a special character becomes `TEXT`, grouped into
//! runs ("Hello" is one TEXT token, not five). Line-start punctuation like
//! `#` or `>` is plain text too. Only fences change how a line is read.

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// This enum exists separately from [`SyntaxKind`] because Logos needs to
/// derive on it. Each variant maps to a corresponding `SyntaxKind` token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    #[token("*")]
    Star,

    #[token("`")]
    Backtick,

    #[token("~")]
    Tilde,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("|")]
    Pipe,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    /// Plain text - anything not matched by other rules
    #[regex(r"[^\s\[\]()`*|~{}]+")]
    Text,
}

impl From<TokenKind> for SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Whitespace => Self::WHITESPACE,
            TokenKind::Newline => Self::NEWLINE,
            TokenKind::Star => Self::STAR,
            TokenKind::Backtick => Self::BACKTICK,
            TokenKind::Tilde => Self::TILDE,
            TokenKind::LBracket => Self::LBRACKET,
            TokenKind::RBracket => Self::RBRACKET,
            TokenKind::Pipe => Self::PIPE,
            TokenKind::LParen => Self::LPAREN,
            TokenKind::RParen => Self::RPAREN,
            TokenKind::LBrace => Self::LBRACE,
            TokenKind::RBrace => Self::RBRACE,
            TokenKind::Text => Self::TEXT,
        }
    }
}

/// A lexed token: its kind and the exact source text it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into tokens that tile it exactly, in order.
///
/// Bytes no rule matches (a lone `\r`, exotic whitespace) come out as `TEXT`
/// rather than being dropped.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    TokenKind::lexer(input)
        .spanned()
        .map(|(result, span)| Token {
            kind: result.map_or(SyntaxKind::TEXT, SyntaxKind::from),
            text: &input[span],
        })
        .collect()
}
