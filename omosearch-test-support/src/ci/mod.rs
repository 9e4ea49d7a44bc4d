//! Configuration read by test suites when running under CI.

pub mod property_test_profile;
