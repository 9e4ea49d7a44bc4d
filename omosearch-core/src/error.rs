//! Error types for the omosearch core library.
//!
//! Every decision procedure reports "no ordering" or "has a bridge" as an
//! ordinary boolean result. The enums here cover invalid usage only: malformed
//! graphs, unmet preconditions, and failures of the reporting sink or of the
//! graph stream feeding the dispatcher.

use std::{convert::Infallible, fmt, io, sync::Arc};

use thiserror::Error;

use crate::graph::Vertex;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while constructing or decoding a [`crate::Graph`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The requested vertex count exceeds the bitset representation.
    #[error("graph has {requested} vertices but at most {limit} are supported")]
    TooManyVertices {
        /// Number of vertices requested by the caller.
        requested: usize,
        /// Largest supported vertex count.
        limit: usize,
    },
    /// An edge endpoint does not name a vertex of the graph.
    #[error("vertex {vertex} is out of range for a graph on {vertex_count} vertices")]
    VertexOutOfRange {
        /// The offending endpoint.
        vertex: Vertex,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// An edge joined a vertex to itself.
    #[error("self-loop on vertex {vertex}")]
    SelfLoop {
        /// The looped vertex.
        vertex: Vertex,
    },
    /// The same undirected edge was supplied twice.
    #[error("edge {left}-{right} was supplied more than once")]
    DuplicateEdge {
        /// Smaller endpoint.
        left: Vertex,
        /// Larger endpoint.
        right: Vertex,
    },
    /// A graph6 string could not be decoded.
    #[error("malformed graph6 input: {reason}")]
    MalformedGraph6 {
        /// Human-readable description of the defect.
        reason: &'static str,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The requested vertex count exceeds the bitset representation.
        TooManyVertices => TooManyVertices { .. } => "GRAPH_TOO_MANY_VERTICES",
        /// An edge endpoint does not name a vertex of the graph.
        VertexOutOfRange => VertexOutOfRange { .. } => "GRAPH_VERTEX_OUT_OF_RANGE",
        /// An edge joined a vertex to itself.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// The same undirected edge was supplied twice.
        DuplicateEdge => DuplicateEdge { .. } => "GRAPH_DUPLICATE_EDGE",
        /// A graph6 string could not be decoded.
        MalformedGraph6 => MalformedGraph6 { .. } => "GRAPH_MALFORMED_GRAPH6",
    }
}

/// An error produced by [`crate::OrderingSearch`] and ordering verification.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum OrderingError {
    /// A witness was requested from a search that found no ordering.
    #[error("no solution: the graph admits no ordering of the requested kind")]
    NoSolution,
    /// A candidate ordering is not a permutation of the vertex set.
    #[error("ordering of length {len} is not a permutation of {vertex_count} vertices")]
    NotAPermutation {
        /// Length of the rejected ordering.
        len: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// A vertex was placed while its placed-neighbour count was not admissible.
    #[error(
        "vertex {vertex} at position {position} has {placed_neighbours} placed neighbours, which is not admissible"
    )]
    Inadmissible {
        /// Position of the offending vertex in the ordering.
        position: usize,
        /// The offending vertex.
        vertex: Vertex,
        /// Number of its neighbours placed before it.
        placed_neighbours: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`OrderingError`] variants.
    enum OrderingErrorCode for OrderingError {
        /// A witness was requested from a search that found no ordering.
        NoSolution => NoSolution => "ORDERING_NO_SOLUTION",
        /// A candidate ordering is not a permutation of the vertex set.
        NotAPermutation => NotAPermutation { .. } => "ORDERING_NOT_A_PERMUTATION",
        /// A vertex was placed while its placed-neighbour count was not admissible.
        Inadmissible => Inadmissible { .. } => "ORDERING_INADMISSIBLE",
    }
}

/// An error produced when [`crate::BridgeAnalyzer`] preconditions are not met.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum BridgeError {
    /// The graph has no vertices.
    #[error("bridge analysis requires at least one vertex")]
    EmptyGraph,
    /// The graph has more than one connected component.
    #[error("bridge analysis requires a connected graph ({vertex_count} vertices, {reached} reachable from vertex 0)")]
    Disconnected {
        /// Number of vertices in the graph.
        vertex_count: usize,
        /// Number of vertices reachable from vertex 0.
        reached: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`BridgeError`] variants.
    enum BridgeErrorCode for BridgeError {
        /// The graph has no vertices.
        EmptyGraph => EmptyGraph => "BRIDGE_EMPTY_GRAPH",
        /// The graph has more than one connected component.
        Disconnected => Disconnected { .. } => "BRIDGE_DISCONNECTED",
    }
}

/// An error produced when a [`crate::ConstraintSpec`] cannot be enumerated.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConstraintError {
    /// The minimum vertex count was zero.
    #[error("minimum vertex count must be at least 1")]
    ZeroMinVertices,
    /// The vertex range is empty.
    #[error("vertex range {min}..={max} is empty")]
    EmptyVertexRange {
        /// Requested minimum vertex count.
        min: usize,
        /// Requested maximum vertex count.
        max: usize,
    },
    /// The maximum vertex count exceeds what the enumerator supports.
    #[error("maximum vertex count {max} exceeds the enumerator limit of {limit}")]
    TooManyVertices {
        /// Requested maximum vertex count.
        max: usize,
        /// Largest supported vertex count.
        limit: usize,
    },
    /// The minimum degree exceeds the maximum degree.
    #[error("minimum degree {min} exceeds maximum degree {max}")]
    InvertedDegreeBounds {
        /// Requested minimum degree.
        min: usize,
        /// Requested maximum degree.
        max: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`ConstraintError`] variants.
    enum ConstraintErrorCode for ConstraintError {
        /// The minimum vertex count was zero.
        ZeroMinVertices => ZeroMinVertices => "CONSTRAINT_ZERO_MIN_VERTICES",
        /// The vertex range is empty.
        EmptyVertexRange => EmptyVertexRange { .. } => "CONSTRAINT_EMPTY_VERTEX_RANGE",
        /// The maximum vertex count exceeds what the enumerator supports.
        TooManyVertices => TooManyVertices { .. } => "CONSTRAINT_TOO_MANY_VERTICES",
        /// The minimum degree exceeds the maximum degree.
        InvertedDegreeBounds => InvertedDegreeBounds { .. } => "CONSTRAINT_INVERTED_DEGREE_BOUNDS",
    }
}

/// An error produced while reading graphs from an external stream.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading from the underlying stream failed.
    #[error("failed to read graph stream: {source}")]
    Io {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A line of the stream did not decode to a graph.
    #[error("line {line}: {error}")]
    Decode {
        /// One-based line number of the offending input.
        line: usize,
        /// Decoding failure.
        #[source]
        error: GraphError,
    },
}

define_error_codes! {
    /// Stable codes describing [`SourceError`] variants.
    enum SourceErrorCode for SourceError {
        /// Reading from the underlying stream failed.
        Io => Io { .. } => "SOURCE_IO",
        /// A line of the stream did not decode to a graph.
        Decode => Decode { .. } => "SOURCE_DECODE",
    }
}

/// An error produced by [`crate::ReportSink`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing the report failed.
    #[error("failed to write report: {source}")]
    Io {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A worker panicked while holding the sink lock.
    #[error("lock for {resource} is poisoned")]
    LockPoisoned {
        /// Name of the poisoned resource.
        resource: &'static str,
    },
}

define_error_codes! {
    /// Stable codes describing [`ReportError`] variants.
    enum ReportErrorCode for ReportError {
        /// Writing the report failed.
        Io => Io { .. } => "REPORT_IO",
        /// A worker panicked while holding the sink lock.
        LockPoisoned => LockPoisoned { .. } => "REPORT_LOCK_POISONED",
    }
}

/// Error type produced by [`crate::Dispatcher`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The configuration asked for zero worker threads.
    #[error("worker count must be at least 1")]
    ZeroWorkers,
    /// The configuration asked for empty batches.
    #[error("batch size must be at least 1")]
    ZeroBatchSize,
    /// The worker pool could not be created.
    #[error("failed to build worker pool with {workers} threads: {message}")]
    PoolBuild {
        /// Requested worker count.
        workers: usize,
        /// Message reported by the thread pool builder.
        message: Arc<str>,
    },
    /// The constraint specification cannot be enumerated.
    #[error(transparent)]
    Constraint {
        /// Underlying validation failure.
        #[from]
        source: ConstraintError,
    },
    /// The graph stream failed.
    #[error(transparent)]
    Source {
        /// Underlying stream failure.
        #[from]
        source: SourceError,
    },
    /// Reporting a counterexample failed.
    #[error(transparent)]
    Report {
        /// Underlying sink failure.
        #[from]
        source: ReportError,
    },
}

define_error_codes! {
    /// Stable codes describing [`DispatchError`] variants.
    enum DispatchErrorCode for DispatchError {
        /// The configuration asked for zero worker threads.
        ZeroWorkers => ZeroWorkers => "DISPATCH_ZERO_WORKERS",
        /// The configuration asked for empty batches.
        ZeroBatchSize => ZeroBatchSize => "DISPATCH_ZERO_BATCH_SIZE",
        /// The worker pool could not be created.
        PoolBuild => PoolBuild { .. } => "DISPATCH_POOL_BUILD",
        /// The constraint specification cannot be enumerated.
        ConstraintFailure => Constraint { .. } => "DISPATCH_CONSTRAINT_FAILURE",
        /// The graph stream failed.
        SourceFailure => Source { .. } => "DISPATCH_SOURCE_FAILURE",
        /// Reporting a counterexample failed.
        ReportFailure => Report { .. } => "DISPATCH_REPORT_FAILURE",
    }
}

impl DispatchError {
    /// Retrieve the inner [`ConstraintErrorCode`] when the specification was rejected.
    pub const fn constraint_code(&self) -> Option<ConstraintErrorCode> {
        match self {
            Self::Constraint { source } => Some(source.code()),
            _ => None,
        }
    }

    /// Retrieve the inner [`SourceErrorCode`] when the graph stream failed.
    pub const fn source_code(&self) -> Option<SourceErrorCode> {
        match self {
            Self::Source { source } => Some(source.code()),
            _ => None,
        }
    }

    /// Retrieve the inner [`ReportErrorCode`] when reporting failed.
    pub const fn report_code(&self) -> Option<ReportErrorCode> {
        match self {
            Self::Report { source } => Some(source.code()),
            _ => None,
        }
    }
}

impl From<Infallible> for DispatchError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
