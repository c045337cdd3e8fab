//! Range-restricted tree walks.
//!
//! Editors only care about the part of the tree that is on screen, so the
//! walk prunes every subtree lying entirely outside the requested range.

use rowan::{TextRange, WalkEvent};

use crate::syntax_kind::SyntaxNode;

/// Collects every node touching `range`, in document (preorder) order.
///
/// "Touching" is inclusive at both ends: a node ending exactly where the
/// range starts is still visited, as is a zero-width node at either edge.
pub fn nodes_in_range(root: &SyntaxNode, range: TextRange) -> Vec<SyntaxNode> {
    let mut nodes = Vec::new();
    let mut walk = root.preorder();

    while let Some(event) = walk.next() {
        let WalkEvent::Enter(node) = event else {
            continue;
        };
        let r = node.text_range();
        if r.start() > range.end() || r.end() < range.start() {
            walk.skip_subtree();
            continue;
        }
        nodes.push(node);
    }

    nodes
}
