//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Minimum camera cover for binary trees in level-order notation
#[derive(Parser, Debug)]
#[command(name = "camcover")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Token marking an absent node (overrides config)
    #[arg(short, long, global = true, env = "CAMCOVER_SENTINEL")]
    pub sentinel: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the minimum camera count for each tree
    Solve {
        /// Level-order trees, e.g. "0 0 N 0 0" (default: one tree per stdin line)
        trees: Vec<String>,
    },

    /// Show a tree, its shape and its camera count
    Tree {
        /// Level-order tree
        tree: String,
    },

    /// Show effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
