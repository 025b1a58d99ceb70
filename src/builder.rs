use std::collections::VecDeque;
use tracing::{debug, instrument, warn};

use crate::arena::{NodeData, Side, TreeArena};
use crate::config::Settings;
use crate::parser::Token;

/// Result of a level-order build.
#[derive(Debug)]
pub struct BuildOutcome {
    pub tree: TreeArena,
    /// Tokens read before the builder stopped
    pub consumed: usize,
}

impl BuildOutcome {
    /// Number of trailing tokens the builder never reached.
    pub fn ignored(&self, total: usize) -> usize {
        total.saturating_sub(self.consumed)
    }
}

/// Builds binary trees from level-order token sequences.
///
/// Each dequeued node consumes exactly two slots, left then right, whether or
/// not a child is created. Children of absent slots are never enqueued, so once
/// the queue drains any remaining tokens are left unread.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    warn_on_trailing_tokens: bool,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            warn_on_trailing_tokens: true,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            warn_on_trailing_tokens: settings.warn_on_trailing_tokens,
        }
    }

    pub fn warn_on_trailing_tokens(mut self, enabled: bool) -> Self {
        self.warn_on_trailing_tokens = enabled;
        self
    }

    #[instrument(level = "debug", skip(self, tokens), fields(tokens = tokens.len()))]
    pub fn build(&self, tokens: &[Token]) -> BuildOutcome {
        let root_value = match tokens.first() {
            Some(Token::Value(v)) => *v,
            Some(Token::Absent) | None => {
                debug!("no root token, empty tree");
                return BuildOutcome {
                    tree: TreeArena::new(),
                    consumed: tokens.len().min(1),
                };
            }
        };

        let mut tree = TreeArena::with_capacity(tokens.len());
        let root = tree.insert_root(NodeData { value: root_value });
        let mut queue = VecDeque::from([root]);
        let mut cursor = 1;

        while cursor < tokens.len() {
            let Some(current) = queue.pop_front() else {
                break;
            };
            for side in [Side::Left, Side::Right] {
                if let Some(Token::Value(v)) = tokens.get(cursor) {
                    if let Some(child) = tree.insert_child(current, side, NodeData { value: *v }) {
                        queue.push_back(child);
                    }
                }
                cursor += 1;
            }
        }

        let consumed = cursor.min(tokens.len());
        let ignored = tokens.len() - consumed;
        if ignored > 0 && self.warn_on_trailing_tokens {
            warn!(
                "ignoring {} trailing token(s) with no parent to attach to",
                ignored
            );
        }
        debug!("built {} nodes from {} tokens", tree.len(), consumed);

        BuildOutcome { tree, consumed }
    }
}
