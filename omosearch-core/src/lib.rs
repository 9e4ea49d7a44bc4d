//! Omosearch core library.
//!
//! Decision procedures for OMO/OEO vertex orderings and (even)
//! 2-edge-connectivity, a reference enumerator for constrained graph
//! families, and the parallel dispatcher that applies a probe to every
//! enumerated graph and reports counterexamples.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod bridge;
mod constraints;
mod dispatch;
mod enumerate;
mod error;
mod graph;
mod ordering;
mod probe;
mod report;

#[cfg(test)]
mod test_utils;

pub use crate::{
    bridge::{
        Bridge, BridgeAnalyzer, BridgeTolerance, ConnectivityReport, analyze,
        is_even_two_edge_connected, is_two_edge_connected,
    },
    constraints::ConstraintSpec,
    dispatch::{CancelToken, DEFAULT_BATCH_SIZE, DispatchConfig, DispatchSummary, Dispatcher},
    enumerate::{Graph6Reader, GraphEnumerator, MAX_ENUMERATED_VERTICES},
    error::{
        BridgeError, BridgeErrorCode, ConstraintError, ConstraintErrorCode, DispatchError,
        DispatchErrorCode, GraphError, GraphErrorCode, OrderingError, OrderingErrorCode,
        ReportError, ReportErrorCode, SourceError, SourceErrorCode,
    },
    graph::{Graph, MAX_VERTICES, Neighbours, Vertex},
    ordering::{
        OrderingKind, OrderingSearch, Pruning, SearchOutcome, is_oeo, is_omo, oeo_witness,
        omo_witness, verify_ordering,
    },
    probe::{Condition, Probe, Property},
    report::{ReportFormat, ReportSink},
};
