//! Shared test utilities for the omosearch crates.
//!
//! [`tracing::RecordingLayer`] captures spans and events so tests can assert
//! instrumentation, and [`ci::property_test_profile`] lets CI tune property
//! suites through environment variables.

pub mod ci;
pub mod tracing;
