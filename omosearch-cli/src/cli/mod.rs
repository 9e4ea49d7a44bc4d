//! Command-line interface orchestration for omosearch.
//!
//! `search` enumerates a constrained family and reports counterexamples to
//! the chosen probe, `check` applies a probe to graph6 input such as the
//! output of nauty's `geng`, and `order` prints a witness ordering for a
//! single graph.

mod commands;

pub use commands::{
    CheckCommand, Cli, CliError, Command, DispatchArgs, ExecutionSummary, Family, KindArg,
    OrderCommand, ProbeArgs, ProbeKind, SearchCommand, render_ordering, run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
