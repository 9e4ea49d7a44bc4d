//! `omosearch` binary.
//!
//! Parses arguments, runs the command with stdout as the report stream, and
//! maps failures to a non-zero exit code after logging them with their
//! stable error code.

use std::{
    io::{self, BufWriter, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use omosearch_cli::{
    cli::{Cli, CliError, ExecutionSummary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field, info};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let mut writer = BufWriter::new(io::stdout());
    let summary = run_cli(cli, &mut writer).context("failed to execute command")?;
    writer.flush().context("failed to flush output")?;
    if let ExecutionSummary::Dispatch(summary) = summary {
        info!(
            evaluated = summary.evaluated,
            counterexamples = summary.counterexamples,
            cancelled = summary.cancelled,
            "run finished"
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let code = err
            .downcast_ref::<CliError>()
            .and_then(CliError::code)
            .map(field::display);
        error!(error = format!("{err:#}"), code, "command execution failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialised"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
