//! Benchmark setup error type.

use omosearch_core::{ConstraintError, DispatchError, GraphError};

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// A fixture graph could not be built.
    #[error("fixture graph construction failed: {0}")]
    Graph(#[from] GraphError),
    /// A family specification was rejected.
    #[error("constraint specification rejected: {0}")]
    Constraint(#[from] ConstraintError),
    /// The dispatcher could not be built or failed.
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}
