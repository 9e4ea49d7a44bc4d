//! Property-based tests for the ordering search.
//!
//! Checks the pruned search against the plain skeleton and a brute-force
//! permutation oracle, validates every witness it returns, and asserts the
//! relationship between the OMO and OEO rules.

mod equivalence;
mod oracle;
mod witness;
