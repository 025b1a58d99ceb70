//! CLI dispatch against in-memory streams

use std::io::Cursor;

use clap::Parser;
use rstest::rstest;

use camcover::cli::commands::run;
use camcover::cli::{Cli, CliError};
use camcover::exitcode;

fn run_cli(args: &[&str], stdin: &str) -> Result<String, CliError> {
    let cli = Cli::parse_from(std::iter::once("camcover").chain(args.iter().copied()));
    let mut out = Vec::new();
    run(&cli, Cursor::new(stdin.to_string()), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[rstest]
#[case(&["solve", "5"], "1\n")]
#[case(&["solve", "0 0 N 0 0", "", "0 1 0"], "1\n0\n1\n")]
#[case(&["--sentinel", "null", "solve", "0 0 null 0"], "1\n")]
fn given_tree_arguments_when_solve_then_prints_one_count_per_tree(
    #[case] args: &[&str],
    #[case] expected: &str,
) {
    assert_eq!(run_cli(args, "").unwrap(), expected);
}

#[test]
fn given_no_arguments_when_solve_then_reads_stdin_lines() {
    let stdin = "0 0 N 0 0\n\n0 0 N 0 N 0 N N 0\nN\n";
    assert_eq!(run_cli(&["solve"], stdin).unwrap(), "1\n2\n0\n");
}

#[test]
fn given_malformed_tree_when_solve_then_data_error() {
    let err = run_cli(&["solve", "1 2 three"], "").unwrap_err();
    assert_eq!(err.exit_code(), exitcode::DATAERR);
    assert!(err.to_string().contains("three"));
}

#[test]
fn given_tree_command_when_run_then_shows_shape_and_count() {
    // 2 and 3 take all four slots as absent, so "9 9" never attaches
    let out = run_cli(&["tree", "1 2 3 N N N N 9 9"], "").unwrap();
    assert!(out.contains("2 (L)"));
    assert!(out.contains("3 (R)"));
    assert!(out.contains("nodes:   3"));
    assert!(out.contains("depth:   2"));
    assert!(out.contains("encoded: 1 2 3\n"));
    assert!(out.contains("ignored: 2 trailing token(s)"));
    assert!(out.contains("cameras: 1"));
}

#[test]
fn given_config_command_when_run_then_prints_toml() {
    let out = run_cli(&["--sentinel", "nil", "config"], "").unwrap();
    assert!(out.contains("sentinel = \"nil\""));
}

#[test]
fn given_numeric_sentinel_when_run_then_config_error() {
    let err = run_cli(&["--sentinel", "7", "solve", "1"], "").unwrap_err();
    assert_eq!(err.exit_code(), exitcode::CONFIG);
}

#[test]
fn given_no_command_when_run_then_usage_error() {
    let err = run_cli(&[], "").unwrap_err();
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_completion_command_when_run_then_emits_script() {
    let out = run_cli(&["completion", "bash"], "").unwrap();
    assert!(out.contains("camcover"));
}

#[test]
fn given_very_deep_chain_when_tree_command_then_drawing_is_cut_off() {
    let n: usize = 200_000;
    let mut chain = vec!["0".to_string()];
    chain.extend((1..n).map(|_| "0 N".to_string()));

    let input = chain.join(" ");

    let out = run_cli(&["tree", input.as_str()], "").unwrap();

    assert!(out.contains("..."));
    assert!(out.contains(&format!("nodes:   {}", n)));
    assert!(out.contains(&format!("depth:   {}", n)));
    assert!(out.contains(&format!("cameras: {}", n.div_ceil(3))));
}
