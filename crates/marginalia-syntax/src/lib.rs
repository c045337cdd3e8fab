//! # marginalia-syntax
//!
//! A lossless Markdown syntax tree using [Rowan] + [Logos], following the
//! [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! The tree preserves **every byte** of the source, so every node's text
//! range is a valid byte range into the document it was parsed from. That is
//! what lets the annotation engine treat node spans as document offsets.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! marginalia-syntax/
//! ├── lib.rs           # Public API and tree-shape tests
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes), string tags, Rowan glue
//! ├── lexer.rs         # Logos-based tokenizer
//! ├── query.rs         # Range-restricted walks (`nodes_in_range`)
//! └── parser/
//!     ├── mod.rs       # Parser struct, Marker system, public parse() function
//!     ├── event.rs     # Event enum (Start, Token, Finish, Placeholder)
//!     ├── sink.rs      # Converts events to Rowan GreenNode
//!     └── grammar/     # Block and inline rules
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use marginalia_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("See [Topic]{annotation=3}\n");
//! assert_eq!(tree.text().to_string(), "See [Topic]{annotation=3}\n");
//!
//! let label = tree
//!     .descendants()
//!     .find(|n| n.kind() == SyntaxKind::BARE_LINK_TEXT)
//!     .unwrap();
//! assert_eq!(label.text().to_string(), "Topic");
//! ```

pub mod lexer;
pub mod parser;
pub mod query;
pub mod syntax_kind;

pub use parser::parse;
pub use query::nodes_in_range;
pub use rowan::{TextRange, TextSize};
pub use syntax_kind::{MarkdownLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    /// Helper to format a syntax tree for snapshot testing.
    fn format_tree(node: &SyntaxNode, indent: usize) -> String {
        let mut result = String::new();
        let prefix = "  ".repeat(indent);

        result.push_str(&format!(
            "{}{:?}@{:?}\n",
            prefix,
            node.kind(),
            node.text_range()
        ));

        for child in node.children_with_tokens() {
            match child {
                rowan::NodeOrToken::Node(n) => {
                    result.push_str(&format_tree(&n, indent + 1));
                }
                rowan::NodeOrToken::Token(t) => {
                    let text = t.text().replace('\n', "\\n");
                    result.push_str(&format!(
                        "{}  {:?}@{:?} {:?}\n",
                        prefix,
                        t.kind(),
                        t.text_range(),
                        text
                    ));
                }
            }
        }

        result
    }

    #[test]
    fn snapshot_annotation_marker() {
        let tree = parse("See [Topic]{annotation=3}\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..26
          PARAGRAPH@0..26
            TEXT@0..3 "See"
            WHITESPACE@3..4 " "
            BARE_LINK@4..11
              LBRACKET@4..5 "["
              BARE_LINK_TEXT@5..10
                TEXT@5..10 "Topic"
              RBRACKET@10..11 "]"
            LBRACE@11..12 "{"
            TEXT@12..24 "annotation=3"
            RBRACE@24..25 "}"
            NEWLINE@25..26 "\\n"
        "#);
    }

    #[test]
    fn snapshot_unclosed_payload_after_line_prefix() {
        let tree = parse("# [X]{oops");
        assert_snapshot!(format_tree(&tree, 0), @r##"
        ROOT@0..10
          PARAGRAPH@0..10
            TEXT@0..1 "#"
            WHITESPACE@1..2 " "
            BARE_LINK@2..5
              LBRACKET@2..3 "["
              BARE_LINK_TEXT@3..4
                TEXT@3..4 "X"
              RBRACKET@4..5 "]"
            LBRACE@5..6 "{"
            TEXT@6..10 "oops"
        "##);
    }

    // Real-world notes are messy. A valid tree must come out of garbage
    // input, with all bytes preserved.

    #[test]
    fn messy_half_typed_markers() {
        let input = r#"# Draft notes

Check out [this page for more info

An [anchor]{annotation= with no digits
And one [closed]{annotation=7} after [[a wikilink

```
[inside]{annotation=1} a fence
```

* half done emphasis [x]{annotation=2}
TODO: fix [
"#;
        let tree = parse(input);
        assert_eq!(tree.text().to_string(), input);

        let anchors: Vec<String> = tree
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::BARE_LINK_TEXT)
            .map(|n| n.text().to_string())
            .collect();
        assert_eq!(anchors, vec!["anchor", "closed", "x"]);
    }

    #[test]
    fn roundtrip_preserves_text() {
        let inputs = [
            "Hello, world!\n",
            "# Heading\n",
            "> Quote [q]{annotation=1}\n",
            "- Item\n",
            "```\ncode\n```\n",
            "[[wikilink]]\n",
            "[link](url)\n",
            "[bare]{annotation=12}\n",
            "[]{}\n",
            "}{][\n",
        ];

        for input in inputs {
            let tree = parse(input);
            assert_eq!(
                tree.text().to_string(),
                input,
                "Roundtrip failed for: {:?}",
                input
            );
        }
    }
}
