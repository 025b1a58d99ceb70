use std::collections::VecDeque;
use tracing::instrument;

use crate::arena::TreeArena;
use crate::parser::Token;

/// Writes a tree back out in level-order notation.
///
/// Mirrors the builder: the root, then two slots per node in breadth-first
/// order. Empty trees serialize to nothing.
///
/// Trailing absent slots are dropped, so the output is the builder's consumed
/// prefix minus any sentinels at its end: `1 2 N` comes back as `1 2`. Both
/// rebuild to the same tree.
#[instrument(level = "debug", skip(tree))]
pub fn serialize(tree: &TreeArena) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(2 * tree.len() + 1);
    let Some(root) = tree.root() else {
        return tokens;
    };

    let mut queue = VecDeque::from([root]);
    let mut root_emitted = false;
    while let Some(idx) = queue.pop_front() {
        let Some(node) = tree.get_node(idx) else {
            continue;
        };
        if !root_emitted {
            tokens.push(Token::Value(node.data.value));
            root_emitted = true;
        }
        for slot in [node.left, node.right] {
            match slot.and_then(|c| tree.get_node(c).map(|n| (c, n))) {
                Some((child_idx, child)) => {
                    tokens.push(Token::Value(child.data.value));
                    queue.push_back(child_idx);
                }
                None => tokens.push(Token::Absent),
            }
        }
    }

    trim_trailing_absent(&mut tokens);
    tokens
}

/// Drops absent markers from the end of a token sequence.
pub fn trim_trailing_absent(tokens: &mut Vec<Token>) {
    while tokens.last().is_some_and(Token::is_absent) {
        tokens.pop();
    }
}
