//! Minimum camera cover over an arena tree.
//!
//! A camera at a node watches the node, its parent and its children. Every
//! node gets three costs, one per coverage state, computed children-first:
//!
//! - `uncovered`: no camera here and no child camera; the parent must supply one
//! - `covered`: no camera here but at least one child holds a camera
//! - `camera`: a camera sits on this node
//!
//! An absent child is `(0, 0, Infeasible)`: it needs no coverage and can never
//! hold a camera.

use std::cmp::min;
use std::collections::HashMap;
use std::fmt;
use std::ops::Add;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::arena::TreeArena;
use crate::errors::{CoverError, CoverResult};

/// Camera count for a subtree, or `Infeasible` when the state cannot occur.
///
/// Every finite cost orders below `Infeasible` and addition saturates to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Cost {
    Finite(usize),
    Infeasible,
}

impl Cost {
    pub const ZERO: Cost = Cost::Finite(0);

    pub fn value(self) -> Option<usize> {
        match self {
            Cost::Finite(n) => Some(n),
            Cost::Infeasible => None,
        }
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        match (self, rhs) {
            (Cost::Finite(a), Cost::Finite(b)) => Cost::Finite(a + b),
            _ => Cost::Infeasible,
        }
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Finite(n) => write!(f, "{}", n),
            Cost::Infeasible => write!(f, "inf"),
        }
    }
}

/// Minimum cameras in a subtree for each coverage state of its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverState {
    pub uncovered: Cost,
    pub covered: Cost,
    pub camera: Cost,
}

impl CoverState {
    /// State of a missing child.
    pub const ABSENT: CoverState = CoverState {
        uncovered: Cost::ZERO,
        covered: Cost::ZERO,
        camera: Cost::Infeasible,
    };

    /// Cheapest way for this node to be watched without relying on its parent.
    pub fn self_sufficient(&self) -> Cost {
        min(self.covered, self.camera)
    }

    pub fn cheapest(&self) -> Cost {
        min(self.uncovered, self.self_sufficient())
    }

    /// Folds the states of both children into the state of their parent.
    pub fn combine(left: &CoverState, right: &CoverState) -> CoverState {
        let uncovered = left.self_sufficient() + right.self_sufficient();

        let covered = min(
            min(
                left.camera + right.self_sufficient(),
                right.camera + left.self_sufficient(),
            ),
            left.camera + right.camera,
        );

        let camera = Cost::Finite(1) + left.cheapest() + right.cheapest();

        CoverState {
            uncovered,
            covered,
            camera,
        }
    }
}

impl fmt::Display for CoverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.uncovered, self.covered, self.camera)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CoverSolver;

impl CoverSolver {
    pub fn new() -> Self {
        Self
    }

    /// Cover states of every node, keyed by arena index.
    ///
    /// Walks the tree post-order with an explicit stack, so the cost is linear
    /// in the node count and independent of tree height.
    #[instrument(level = "debug", skip(self, tree), fields(nodes = tree.len()))]
    pub fn states(&self, tree: &TreeArena) -> CoverResult<HashMap<Index, CoverState>> {
        let mut states: HashMap<Index, CoverState> = HashMap::with_capacity(tree.len());

        for (idx, node) in tree.iter_postorder() {
            let child_state = |child: Option<Index>| -> CoverResult<CoverState> {
                match child {
                    None => Ok(CoverState::ABSENT),
                    Some(c) => states.get(&c).copied().ok_or_else(|| {
                        CoverError::Internal(format!("child {:?} visited after its parent", c))
                    }),
                }
            };
            let left = child_state(node.left)?;
            let right = child_state(node.right)?;
            let state = CoverState::combine(&left, &right);
            trace!("node {} -> {}", node.data, state);
            states.insert(idx, state);
        }

        Ok(states)
    }

    /// Minimum number of cameras covering every node; 0 for an empty tree.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn solve(&self, tree: &TreeArena) -> CoverResult<usize> {
        let Some(root) = tree.root() else {
            debug!("empty tree needs no cameras");
            return Ok(0);
        };

        let states = self.states(tree)?;
        let root_state = states
            .get(&root)
            .ok_or_else(|| CoverError::Internal("root was never visited".to_string()))?;

        // the root has no parent, so it cannot stay uncovered
        let cameras = root_state
            .self_sufficient()
            .value()
            .ok_or_else(|| CoverError::Internal("root has no feasible cover".to_string()))?;
        debug!("root state {} -> {} camera(s)", root_state, cameras);
        Ok(cameras)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{NodeData, Side};

    #[test]
    fn test_cost_ordering_and_addition() {
        assert!(Cost::Finite(usize::MAX) < Cost::Infeasible);
        assert_eq!(Cost::Finite(2) + Cost::Finite(3), Cost::Finite(5));
        assert_eq!(Cost::Finite(2) + Cost::Infeasible, Cost::Infeasible);
        assert_eq!(min(Cost::Infeasible, Cost::Finite(7)), Cost::Finite(7));
    }

    #[test]
    fn test_leaf_state() {
        let leaf = CoverState::combine(&CoverState::ABSENT, &CoverState::ABSENT);
        assert_eq!(leaf.uncovered, Cost::Finite(0));
        assert_eq!(leaf.covered, Cost::Infeasible);
        assert_eq!(leaf.camera, Cost::Finite(1));
    }

    #[test]
    fn test_solve_empty() {
        assert_eq!(CoverSolver::new().solve(&TreeArena::new()).unwrap(), 0);
    }

    #[test]
    fn test_states_cover_every_node() {
        let mut tree = TreeArena::new();
        let root = tree.insert_root(NodeData { value: 0 });
        let left = tree
            .insert_child(root, Side::Left, NodeData { value: 0 })
            .unwrap();
        tree.insert_child(left, Side::Left, NodeData { value: 0 })
            .unwrap();

        let states = CoverSolver::new().states(&tree).unwrap();
        assert_eq!(states.len(), 3);
        // middle node holding the camera covers the whole path
        assert_eq!(states[&left].camera, Cost::Finite(1));
        assert_eq!(states[&root].covered, Cost::Finite(1));
        assert_eq!(CoverSolver::new().solve(&tree).unwrap(), 1);
    }
}
