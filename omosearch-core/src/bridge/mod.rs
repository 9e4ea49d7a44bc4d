//! Low-link bridge analysis.
//!
//! A single depth-first traversal from vertex 0 assigns each vertex a
//! discovery time (`preorder`) and the smallest discovery time reachable
//! from its subtree through at most one back edge (`low`). A tree edge
//! `(parent, child)` is a bridge iff `low[child] == preorder[child]`.
//!
//! The plain check stops at the first bridge. The parity check tolerates a
//! bridge with at least one odd-degree endpoint and stops at the first one
//! whose endpoints both have even degree.

use std::{fmt, ops::ControlFlow};

use tracing::{debug, instrument};

use crate::{
    error::BridgeError,
    graph::{Graph, Vertex},
};

/// A bridge stored with its smaller endpoint first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bridge {
    left: Vertex,
    right: Vertex,
}

impl Bridge {
    /// Creates a bridge between `a` and `b` in canonical orientation.
    #[must_use]
    pub fn new(a: Vertex, b: Vertex) -> Self {
        Self {
            left: a.min(b),
            right: a.max(b),
        }
    }

    /// Returns the smaller endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub fn left(&self) -> Vertex { self.left }

    /// Returns the larger endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub fn right(&self) -> Vertex { self.right }

    /// Returns both endpoints as a tuple.
    #[must_use]
    #[rustfmt::skip]
    pub fn endpoints(&self) -> (Vertex, Vertex) { (self.left, self.right) }
}

impl fmt::Display for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.left, self.right)
    }
}

/// Decides which bridges do not falsify a connectivity property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BridgeTolerance {
    /// Every bridge falsifies the property.
    None,
    /// A bridge with at least one odd-degree endpoint is tolerated.
    OddEndpoint,
}

impl BridgeTolerance {
    fn tolerates(self, graph: &Graph, bridge: Bridge) -> bool {
        match self {
            Self::None => false,
            Self::OddEndpoint => {
                graph.degree(bridge.left) % 2 == 1 || graph.degree(bridge.right) % 2 == 1
            }
        }
    }
}

/// Bridge analysis over a non-empty connected graph.
///
/// # Examples
/// ```
/// use omosearch_core::{Bridge, BridgeAnalyzer, Graph};
///
/// let path = Graph::from_edges(3, [(0, 1), (1, 2)])?;
/// let analyzer = BridgeAnalyzer::new(&path)?;
/// assert!(!analyzer.is_two_edge_connected());
/// assert_eq!(analyzer.bridges(), [Bridge::new(0, 1), Bridge::new(1, 2)]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct BridgeAnalyzer<'g> {
    graph: &'g Graph,
}

impl<'g> BridgeAnalyzer<'g> {
    /// Validates the traversal precondition and wraps `graph`.
    ///
    /// # Errors
    /// Returns [`BridgeError::EmptyGraph`] when the graph has no vertices and
    /// [`BridgeError::Disconnected`] when some vertex is unreachable from
    /// vertex 0.
    pub fn new(graph: &'g Graph) -> Result<Self, BridgeError> {
        if graph.is_empty() {
            return Err(BridgeError::EmptyGraph);
        }
        let reached = graph.reachable_within(0, graph.vertex_mask()).count_ones() as usize;
        if reached != graph.vertex_count() {
            return Err(BridgeError::Disconnected {
                vertex_count: graph.vertex_count(),
                reached,
            });
        }
        Ok(Self { graph })
    }

    /// Returns the first bridge, in traversal order, that `tolerance` does
    /// not accept.
    #[must_use]
    pub fn first_intolerable_bridge(&self, tolerance: BridgeTolerance) -> Option<Bridge> {
        let mut traversal = LowLink::new(self.graph);
        let outcome = traversal.visit(0, None, &mut |bridge| {
            if tolerance.tolerates(self.graph, bridge) {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(bridge)
            }
        });
        match outcome {
            ControlFlow::Break(bridge) => Some(bridge),
            ControlFlow::Continue(()) => None,
        }
    }

    /// Returns `true` when the graph has no bridge.
    #[must_use]
    pub fn is_two_edge_connected(&self) -> bool {
        self.first_intolerable_bridge(BridgeTolerance::None)
            .is_none()
    }

    /// Returns `true` when every bridge has an odd-degree endpoint.
    #[must_use]
    pub fn is_even_two_edge_connected(&self) -> bool {
        match self.first_intolerable_bridge(BridgeTolerance::OddEndpoint) {
            Some(bridge) => {
                debug!(%bridge, "bridge with two even-degree endpoints");
                false
            }
            None => true,
        }
    }

    /// Lists every bridge, sorted.
    #[must_use]
    pub fn bridges(&self) -> Vec<Bridge> {
        let mut found = Vec::new();
        let mut traversal = LowLink::new(self.graph);
        let _ = traversal.visit(0, None, &mut |bridge| {
            found.push(bridge);
            ControlFlow::<Bridge>::Continue(())
        });
        found.sort_unstable();
        found
    }
}

/// Per-call traversal state. A zero `preorder` marks an unvisited vertex.
struct LowLink<'g> {
    graph: &'g Graph,
    preorder: Vec<usize>,
    low: Vec<usize>,
    counter: usize,
}

impl<'g> LowLink<'g> {
    fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            preorder: vec![0; graph.vertex_count()],
            low: vec![0; graph.vertex_count()],
            counter: 0,
        }
    }

    fn visit<F>(
        &mut self,
        vertex: Vertex,
        parent: Option<Vertex>,
        on_bridge: &mut F,
    ) -> ControlFlow<Bridge>
    where
        F: FnMut(Bridge) -> ControlFlow<Bridge>,
    {
        self.counter += 1;
        self.preorder[vertex] = self.counter;
        self.low[vertex] = self.counter;

        for next in self.graph.neighbours(vertex) {
            if self.preorder[next] == 0 {
                self.visit(next, Some(vertex), on_bridge)?;
                self.low[vertex] = self.low[vertex].min(self.low[next]);
                if self.low[next] == self.preorder[next] {
                    on_bridge(Bridge::new(vertex, next))?;
                }
            } else if Some(next) != parent {
                self.low[vertex] = self.low[vertex].min(self.preorder[next]);
            }
        }
        ControlFlow::Continue(())
    }
}

/// Both connectivity verdicts for one graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectivityReport {
    is_two_edge_connected: bool,
    is_even_two_edge_connected: bool,
}

impl ConnectivityReport {
    /// Returns `true` when the graph has no bridge.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_two_edge_connected(&self) -> bool { self.is_two_edge_connected }

    /// Returns `true` when every bridge has an odd-degree endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_even_two_edge_connected(&self) -> bool { self.is_even_two_edge_connected }
}

/// Runs both traversals over `graph`.
///
/// # Errors
/// Propagates the [`BridgeAnalyzer::new`] precondition failures.
///
/// # Examples
/// ```
/// use omosearch_core::{Graph, analyze};
///
/// let square = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)])?;
/// let report = analyze(&square)?;
/// assert!(report.is_two_edge_connected());
/// assert!(report.is_even_two_edge_connected());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.bridge_analysis",
    level = "trace",
    err,
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn analyze(graph: &Graph) -> Result<ConnectivityReport, BridgeError> {
    let analyzer = BridgeAnalyzer::new(graph)?;
    Ok(ConnectivityReport {
        is_two_edge_connected: analyzer.is_two_edge_connected(),
        is_even_two_edge_connected: analyzer.is_even_two_edge_connected(),
    })
}

/// Returns `true` when `graph` is connected and bridgeless.
///
/// # Errors
/// Propagates the [`BridgeAnalyzer::new`] precondition failures.
pub fn is_two_edge_connected(graph: &Graph) -> Result<bool, BridgeError> {
    Ok(BridgeAnalyzer::new(graph)?.is_two_edge_connected())
}

/// Returns `true` when every bridge of `graph` has an odd-degree endpoint.
///
/// # Errors
/// Propagates the [`BridgeAnalyzer::new`] precondition failures.
pub fn is_even_two_edge_connected(graph: &Graph) -> Result<bool, BridgeError> {
    Ok(BridgeAnalyzer::new(graph)?.is_even_two_edge_connected())
}

#[cfg(test)]
mod tests;
