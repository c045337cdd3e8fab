//! SyntaxKind enum for all tokens and nodes in the Markdown CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// All syntax kinds for the Markdown CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser output).
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Horizontal whitespace (spaces, tabs)
    WHITESPACE,
    /// Line ending
    NEWLINE,
    /// Plain text content
    TEXT,
    /// `*` for emphasis
    STAR,
    /// Single backtick for code spans
    BACKTICK,
    /// `~` character for fenced code
    TILDE,
    /// `[` for links, bare links and wikilinks
    LBRACKET,
    /// `]` for links, bare links and wikilinks
    RBRACKET,
    /// `|` for wikilink aliases
    PIPE,
    /// `(` for link URLs
    LPAREN,
    /// `)` for link URLs
    RPAREN,
    /// `{` opening an annotation payload
    LBRACE,
    /// `}` closing an annotation payload
    RBRACE,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root document node
    ROOT,
    /// Run of text lines up to a blank line or a fence
    PARAGRAPH,
    /// Fenced code block
    FENCED_CODE,
    /// Inline content that didn't form a construct (e.g. an unclosed `[`)
    INLINE,
    /// Wikilink (`[[target]]` or `[[target|alias]]`)
    WIKILINK,
    /// Inline code span
    CODE_SPAN,
    /// Standard link `[text](url)`
    LINK,
    /// Label of a standard link, between the brackets
    LINK_TEXT,
    /// Bare link `[text]` with no URL part
    BARE_LINK,
    /// Label of a bare link, between the brackets. Anchors annotation markers.
    BARE_LINK_TEXT,
    /// Emphasis `*text*`
    EMPHASIS,
    /// Strong emphasis `**text**`
    STRONG,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace/newlines).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE)
    }

    /// Stable string tag for this kind.
    ///
    /// Consumers that only know the tree through a type-name query (such as
    /// the annotation scanner) match on these tags, so they must never change
    /// for an existing kind.
    pub fn tag(self) -> &'static str {
        match self {
            Self::WHITESPACE => "WHITESPACE",
            Self::NEWLINE => "NEWLINE",
            Self::TEXT => "TEXT",
            Self::STAR => "STAR",
            Self::BACKTICK => "BACKTICK",
            Self::TILDE => "TILDE",
            Self::LBRACKET => "LBRACKET",
            Self::RBRACKET => "RBRACKET",
            Self::PIPE => "PIPE",
            Self::LPAREN => "LPAREN",
            Self::RPAREN => "RPAREN",
            Self::LBRACE => "LBRACE",
            Self::RBRACE => "RBRACE",
            Self::EOF => "EOF",
            Self::ROOT => "ROOT",
            Self::PARAGRAPH => "PARAGRAPH",
            Self::FENCED_CODE => "FENCED_CODE",
            Self::INLINE => "INLINE",
            Self::WIKILINK => "WIKILINK",
            Self::CODE_SPAN => "CODE_SPAN",
            Self::LINK => "LINK",
            Self::LINK_TEXT => "LINK_TEXT",
            Self::BARE_LINK => "BARE_LINK",
            Self::BARE_LINK_TEXT => "BARE_LINK_TEXT",
            Self::EMPHASIS => "EMPHASIS",
            Self::STRONG => "STRONG",
            Self::ERROR => "ERROR",
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkdownLang {}

impl rowan::Language for MarkdownLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<MarkdownLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<MarkdownLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<MarkdownLang>;
