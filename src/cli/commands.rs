//! Command dispatch

use std::io::{self, BufRead, Write};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::builder::TreeBuilder;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::errors::CoverError;
use crate::parser::{format_tokens, parse_tokens};
use crate::serialize::serialize;
use crate::solver::CoverSolver;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(cli, stdin.lock(), &mut stdout.lock())
}

/// Runs `cli` against explicit input and output streams.
pub fn run(cli: &Cli, input: impl BufRead, out: &mut impl Write) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Solve { trees }) => _solve(&settings(cli)?, trees, input, out),
        Some(Commands::Tree { tree }) => _tree(&settings(cli)?, tree, out),
        Some(Commands::Config) => _config(&settings(cli)?, out),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, out);
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(sentinel) = &cli.sentinel {
        settings.sentinel = sentinel.clone();
    }
    settings.validate()?;
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn write_err(e: io::Error) -> CliError {
    CoverError::io("write output", e).into()
}

#[instrument(skip(settings, input, out))]
fn _solve(
    settings: &Settings,
    trees: &[String],
    input: impl BufRead,
    out: &mut impl Write,
) -> CliResult<()> {
    let builder = TreeBuilder::from_settings(settings);
    let solver = CoverSolver::new();
    let mut solve_one = |line: &str| -> CliResult<()> {
        let tokens = parse_tokens(line, &settings.sentinel)?;
        let outcome = builder.build(&tokens);
        let cameras = solver.solve(&outcome.tree)?;
        writeln!(out, "{}", cameras).map_err(write_err)
    };

    if !trees.is_empty() {
        return trees.iter().try_for_each(|t| solve_one(t.as_str()));
    }

    for line in input.lines() {
        let line = line.map_err(|e| CoverError::io("read stdin", e))?;
        if line.trim().is_empty() {
            continue;
        }
        solve_one(&line)?;
    }
    Ok(())
}

#[instrument(skip(settings, tree, out), fields(bytes = tree.len()))]
fn _tree(settings: &Settings, tree: &str, out: &mut impl Write) -> CliResult<()> {
    let tokens = parse_tokens(tree, &settings.sentinel)?;
    let outcome = TreeBuilder::from_settings(settings).build(&tokens);
    let cameras = CoverSolver::new().solve(&outcome.tree)?;

    write!(out, "{}", outcome.tree.to_tree_string()).map_err(write_err)?;
    writeln!(out, "nodes:   {}", outcome.tree.len()).map_err(write_err)?;
    writeln!(out, "depth:   {}", outcome.tree.depth()).map_err(write_err)?;
    writeln!(
        out,
        "encoded: {}",
        format_tokens(&serialize(&outcome.tree), &settings.sentinel)
    )
    .map_err(write_err)?;
    let ignored = outcome.ignored(tokens.len());
    if ignored > 0 {
        writeln!(out, "ignored: {} trailing token(s)", ignored).map_err(write_err)?;
    }
    writeln!(out, "cameras: {}", cameras).map_err(write_err)
}

fn _config(settings: &Settings, out: &mut impl Write) -> CliResult<()> {
    write!(out, "{}", settings.to_toml()?).map_err(write_err)
}
