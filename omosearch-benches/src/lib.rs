//! Benchmark support crate for omosearch.
//!
//! Provides seeded graph fixtures and parameter labels for the Criterion
//! benchmarks of the ordering search, the bridge analyser, and the
//! enumeration dispatcher.

pub mod error;
pub mod params;
pub mod source;
