//! Small helpers shared across CLI tests.

use std::{fs, io, path::PathBuf};

use clap::Parser;
use tempfile::TempDir;

use super::{Cli, CliError, ExecutionSummary, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_graph6_file(dir: &TempDir, name: &str, lines: &[&str]) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut contents = lines.join("\n");
    contents.push('\n');
    fs::write(&path, contents)?;
    Ok(path)
}

pub(super) fn parse(args: &[&str]) -> Cli {
    let argv = std::iter::once("omosearch").chain(args.iter().copied());
    match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) => panic!("arguments must parse: {err}"),
    }
}

/// Runs `args` and returns the summary with everything written to stdout.
pub(super) fn run(args: &[&str]) -> Result<(ExecutionSummary, String), CliError> {
    let mut out = Vec::new();
    let summary = run_cli(parse(args), &mut out)?;
    let text = match String::from_utf8(out) {
        Ok(text) => text,
        Err(err) => panic!("output must be UTF-8: {err}"),
    };
    Ok((summary, text))
}

pub(super) fn run_expecting_error(args: &[&str], panic_msg: &str) -> CliError {
    match run(args) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
