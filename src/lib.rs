//! Minimum camera cover for binary trees.
//!
//! A tree arrives as a level-order line such as `0 0 N 0 0`, where `N` marks
//! an absent child. A camera on a node watches the node, its parent and its
//! children; [`min_camera_cover`] returns how many cameras are needed so that
//! every node is watched.

pub mod arena;
pub mod builder;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod parser;
pub mod serialize;
pub mod solver;
pub mod util;

use tracing::instrument;

pub use arena::{NodeData, Side, TreeArena, TreeNode};
pub use builder::{BuildOutcome, TreeBuilder};
pub use config::Settings;
pub use errors::{CoverError, CoverResult};
pub use parser::{parse_tokens, Token};
pub use serialize::serialize;
pub use solver::{Cost, CoverSolver, CoverState};

/// Minimum number of cameras for the tree encoded in `input`, using default settings.
///
/// Empty input, or input starting with the absent marker, is the empty tree
/// and needs 0 cameras.
pub fn min_camera_cover(input: &str) -> CoverResult<usize> {
    min_camera_cover_with(input, &Settings::default())
}

/// Like [`min_camera_cover`], with an explicit sentinel and builder settings.
#[instrument(level = "debug", skip(input, settings))]
pub fn min_camera_cover_with(input: &str, settings: &Settings) -> CoverResult<usize> {
    let tokens = parse_tokens(input, &settings.sentinel)?;
    let outcome = TreeBuilder::from_settings(settings).build(&tokens);
    CoverSolver::new().solve(&outcome.tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_camera_cover_smoke() {
        assert_eq!(min_camera_cover("").unwrap(), 0);
        assert_eq!(min_camera_cover("0 0 N 0 0").unwrap(), 1);
        assert!(matches!(
            min_camera_cover("0 zero"),
            Err(CoverError::MalformedInput { position: 1, .. })
        ));
    }

    #[test]
    fn test_min_camera_cover_with_custom_sentinel() {
        let settings = Settings {
            sentinel: "null".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            min_camera_cover_with("0 0 null 0 null null 0", &settings).unwrap(),
            2
        );
    }
}
