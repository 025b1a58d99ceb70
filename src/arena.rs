use generational_arena::{Arena, Index};
use std::collections::VecDeque;
use std::fmt;
use termtree::Tree;
use tracing::instrument;

/// Levels drawn by [`TreeArena::to_tree_string`].
pub const MAX_RENDER_DEPTH: usize = 64;

/// Data payload for tree nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeData {
    /// Integer carried by the node; never inspected by the cover solver
    pub value: i32,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Which child slot of a parent a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Binary tree node in the arena.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    pub left: Option<Index>,
    pub right: Option<Index>,
}

impl TreeNode {
    /// Children in left-to-right order, skipping absent slots.
    pub fn children(&self) -> impl Iterator<Item = Index> {
        self.left.into_iter().chain(self.right)
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Arena-based binary tree.
///
/// Nodes reference each other by arena index, so the tree is dropped in one
/// go with the arena and no node is ever shared between two parents.
#[derive(Debug)]
pub struct TreeArena {
    arena: Arena<TreeNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            arena: Arena::with_capacity(n),
            root: None,
        }
    }

    /// Starts a new tree: drops every existing node and inserts `data` as the root.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_root(&mut self, data: NodeData) -> Index {
        self.arena.clear();
        let idx = self.arena.insert(TreeNode {
            data,
            parent: None,
            left: None,
            right: None,
        });
        self.root = Some(idx);
        idx
    }

    /// Attaches a new node in the given slot of `parent`.
    ///
    /// Returns None if `parent` is not in the arena or the slot is taken.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_child(&mut self, parent: Index, side: Side, data: NodeData) -> Option<Index> {
        let occupied = match side {
            Side::Left => self.arena.get(parent)?.left.is_some(),
            Side::Right => self.arena.get(parent)?.right.is_some(),
        };
        if occupied {
            return None;
        }

        let node_idx = self.arena.insert(TreeNode {
            data,
            parent: Some(parent),
            left: None,
            right: None,
        });
        let parent_node = self.arena.get_mut(parent)?;
        match side {
            Side::Left => parent_node.left = Some(node_idx),
            Side::Right => parent_node.right = Some(node_idx),
        }
        Some(node_idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Number of levels, computed breadth-first so deep chains are safe.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut queue = VecDeque::new();
        if let Some(root) = self.root {
            queue.push_back((root, 1));
        }

        while let Some((idx, depth)) = queue.pop_front() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.get_node(idx) {
                for child in node.children() {
                    queue.push_back((child, depth + 1));
                }
            }
        }
        max_depth
    }

    /// Values of all leaf nodes, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_values(&self) -> Vec<i32> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.data.value)
            .collect()
    }

    /// Renders the tree for terminal display, at most [`MAX_RENDER_DEPTH`] levels deep.
    pub fn to_tree_string(&self) -> Tree<String> {
        self.to_tree_string_with_depth(MAX_RENDER_DEPTH)
    }

    /// Renders the top `max_depth` levels; deeper subtrees show as `...`.
    ///
    /// termtree builds, prints and drops its trees recursively, so the cut-off
    /// bounds stack use for long chains.
    pub fn to_tree_string_with_depth(&self, max_depth: usize) -> Tree<String> {
        fn build_tree(
            arena: &TreeArena,
            node_idx: Index,
            level: usize,
            max_depth: usize,
            parent_tree: &mut Tree<String>,
        ) {
            let Some(node) = arena.get_node(node_idx) else {
                return;
            };
            if node.is_leaf() {
                return;
            }
            if level >= max_depth {
                parent_tree.push(Tree::new("...".to_string()));
                return;
            }
            for child_idx in node.children() {
                if let Some(child) = arena.get_node(child_idx) {
                    let side = if Some(child_idx) == node.left { "L" } else { "R" };
                    let mut child_tree = Tree::new(format!("{} ({})", child.data, side));
                    build_tree(arena, child_idx, level + 1, max_depth, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        match self.root.and_then(|idx| self.get_node(idx).map(|n| (idx, n))) {
            Some((root_idx, root)) => {
                let mut tree = Tree::new(root.data.to_string());
                build_tree(self, root_idx, 1, max_depth.max(1), &mut tree);
                tree
            }
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

/// Pre-order traversal, left subtree before right.
pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // right first so left pops first
                self.stack.extend(node.right);
                self.stack.extend(node.left);
                return Some((current_idx, node));
            }
        }
        None
    }
}

/// Post-order traversal: both children are yielded before their parent.
pub struct PostOrderIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    if let Some(right) = node.right {
                        self.stack.push((right, false));
                    }
                    if let Some(left) = node.left {
                        self.stack.push((left, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //      1
    //     / \
    //    2   3
    //     \
    //      4
    fn sample() -> TreeArena {
        let mut tree = TreeArena::new();
        let root = tree.insert_root(NodeData { value: 1 });
        let two = tree
            .insert_child(root, Side::Left, NodeData { value: 2 })
            .unwrap();
        tree.insert_child(root, Side::Right, NodeData { value: 3 })
            .unwrap();
        tree.insert_child(two, Side::Right, NodeData { value: 4 })
            .unwrap();
        tree
    }

    fn values<'a>(it: impl Iterator<Item = (Index, &'a TreeNode)>) -> Vec<i32> {
        it.map(|(_, n)| n.data.value).collect()
    }

    #[test]
    fn test_preorder() {
        assert_eq!(values(sample().iter()), vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_postorder() {
        assert_eq!(values(sample().iter_postorder()), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_depth_and_leaves() {
        let tree = sample();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.leaf_values(), vec![4, 3]);
    }

    #[test]
    fn test_insert_child_rejects_occupied_slot() {
        let mut tree = sample();
        let root = tree.root().unwrap();
        assert!(tree
            .insert_child(root, Side::Left, NodeData { value: 9 })
            .is_none());
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_parent_links() {
        let tree = sample();
        let root = tree.root().unwrap();
        for (idx, node) in tree.iter() {
            for child in node.children() {
                assert_eq!(tree.get_node(child).unwrap().parent, Some(idx));
            }
        }
        assert_eq!(tree.get_node(root).unwrap().parent, None);
    }

    #[test]
    fn test_empty_tree() {
        let tree = TreeArena::new();
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.iter().count(), 0);
        assert_eq!(tree.iter_postorder().count(), 0);
        assert_eq!(tree.to_tree_string().to_string().trim(), "Empty tree");
    }

    #[test]
    fn test_insert_root_starts_a_new_tree() {
        let mut tree = sample();
        let root = tree.insert_root(NodeData { value: 7 });
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.iter().count(), 1);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_to_tree_string_cuts_off_deep_levels() {
        let mut tree = TreeArena::new();
        let mut parent = tree.insert_root(NodeData { value: 0 });
        for value in 1..10 {
            parent = tree
                .insert_child(parent, Side::Left, NodeData { value })
                .unwrap();
        }

        let rendered = tree.to_tree_string_with_depth(3).to_string();
        assert!(rendered.contains("2 (L)"));
        assert!(!rendered.contains("3 (L)"));
        assert!(rendered.contains("..."));

        let full = tree.to_tree_string().to_string();
        assert!(full.contains("9 (L)"));
        assert!(!full.contains("..."));
    }

    #[test]
    fn test_to_tree_string() {
        let rendered = sample().to_tree_string().to_string();
        assert!(rendered.starts_with("1\n"));
        assert!(rendered.contains("2 (L)"));
        assert!(rendered.contains("4 (R)"));
        assert!(rendered.contains("3 (R)"));
    }
}
