//! Support library for the omosearch CLI binary.
//!
//! Exposes the command pipeline and logging set-up so doctests and tests can
//! drive commands without spawning a subprocess.

pub mod cli;
pub mod logging;
