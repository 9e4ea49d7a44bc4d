//! Declarative constraints on the graph families to enumerate.
//!
//! A [`ConstraintSpec`] names a vertex range plus structural requirements.
//! Connectivity is required unless switched off. The hereditary subset of
//! the constraints (bipartite, triangle-free, maximum degree, forest) is
//! also checked on partial graphs so the enumerator can prune early.

use crate::{enumerate::MAX_ENUMERATED_VERTICES, error::ConstraintError, graph::Graph};

/// Constraint specification consumed by [`crate::GraphEnumerator`].
///
/// # Examples
/// ```
/// use omosearch_core::{ConstraintSpec, Graph};
///
/// let spec = ConstraintSpec::cubic_graphs(6);
/// assert_eq!(spec.min_vertices(), 4);
/// assert_eq!(spec.min_degree_bound(), Some(3));
///
/// let k4 = Graph::from_edges(4, [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)])?;
/// assert!(spec.accepts(&k4));
/// # Ok::<(), omosearch_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstraintSpec {
    min_vertices: usize,
    max_vertices: usize,
    tree: bool,
    connected: bool,
    biconnected: bool,
    bipartite: bool,
    triangle_free: bool,
    min_degree: Option<usize>,
    max_degree: Option<usize>,
}

impl ConstraintSpec {
    /// Creates a specification for connected graphs on
    /// `min_vertices..=max_vertices` vertices.
    #[must_use]
    pub fn new(min_vertices: usize, max_vertices: usize) -> Self {
        Self {
            min_vertices,
            max_vertices,
            tree: false,
            connected: true,
            biconnected: false,
            bipartite: false,
            triangle_free: false,
            min_degree: None,
            max_degree: None,
        }
    }

    /// Connected graphs on `1..=max_vertices` vertices.
    #[must_use]
    pub fn all_graphs(max_vertices: usize) -> Self {
        Self::new(1, max_vertices)
    }

    /// Connected 3-regular graphs on `4..=max_vertices` vertices.
    #[must_use]
    pub fn cubic_graphs(max_vertices: usize) -> Self {
        Self::new(4, max_vertices).regular(3)
    }

    /// Connected bipartite graphs on `3..=max_vertices` vertices.
    #[must_use]
    pub fn bipartite_graphs(max_vertices: usize) -> Self {
        Self::new(3, max_vertices).bipartite(true)
    }

    /// Connected triangle-free graphs on `3..=max_vertices` vertices.
    #[must_use]
    pub fn triangle_free_graphs(max_vertices: usize) -> Self {
        Self::new(3, max_vertices).triangle_free(true)
    }

    /// Requires the graph to be a tree (or a forest when connectivity is
    /// not required).
    #[must_use]
    pub fn tree(mut self, flag: bool) -> Self {
        self.tree = flag;
        self
    }

    /// Requires the graph to be connected.
    #[must_use]
    pub fn connected(mut self, flag: bool) -> Self {
        self.connected = flag;
        self
    }

    /// Requires the graph to be biconnected.
    #[must_use]
    pub fn biconnected(mut self, flag: bool) -> Self {
        self.biconnected = flag;
        self
    }

    /// Requires the graph to be bipartite.
    #[must_use]
    pub fn bipartite(mut self, flag: bool) -> Self {
        self.bipartite = flag;
        self
    }

    /// Requires the graph to contain no triangle.
    #[must_use]
    pub fn triangle_free(mut self, flag: bool) -> Self {
        self.triangle_free = flag;
        self
    }

    /// Sets a lower bound on every vertex degree.
    #[must_use]
    pub fn min_degree(mut self, degree: usize) -> Self {
        self.min_degree = Some(degree);
        self
    }

    /// Sets an upper bound on every vertex degree.
    #[must_use]
    pub fn max_degree(mut self, degree: usize) -> Self {
        self.max_degree = Some(degree);
        self
    }

    /// Requires every vertex to have degree `degree`.
    #[must_use]
    pub fn regular(self, degree: usize) -> Self {
        self.min_degree(degree).max_degree(degree)
    }

    /// Returns the smallest vertex count to emit.
    #[must_use]
    #[rustfmt::skip]
    pub fn min_vertices(&self) -> usize { self.min_vertices }

    /// Returns the largest vertex count to emit.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_vertices(&self) -> usize { self.max_vertices }

    /// Returns the configured minimum degree, if any.
    #[must_use]
    pub fn min_degree_bound(&self) -> Option<usize> {
        self.min_degree
    }

    /// Returns the configured maximum degree, if any.
    #[must_use]
    pub fn max_degree_bound(&self) -> Option<usize> {
        self.max_degree
    }

    /// Returns `true` when accepted graphs must be connected.
    #[must_use]
    #[rustfmt::skip]
    pub fn requires_connected(&self) -> bool { self.connected }

    /// Checks that the specification can be enumerated.
    ///
    /// # Errors
    /// Returns [`ConstraintError::ZeroMinVertices`],
    /// [`ConstraintError::EmptyVertexRange`],
    /// [`ConstraintError::TooManyVertices`], or
    /// [`ConstraintError::InvertedDegreeBounds`].
    pub fn validate(&self) -> Result<(), ConstraintError> {
        if self.min_vertices == 0 {
            return Err(ConstraintError::ZeroMinVertices);
        }
        if self.min_vertices > self.max_vertices {
            return Err(ConstraintError::EmptyVertexRange {
                min: self.min_vertices,
                max: self.max_vertices,
            });
        }
        if self.max_vertices > MAX_ENUMERATED_VERTICES {
            return Err(ConstraintError::TooManyVertices {
                max: self.max_vertices,
                limit: MAX_ENUMERATED_VERTICES,
            });
        }
        if let (Some(min), Some(max)) = (self.min_degree, self.max_degree)
            && min > max
        {
            return Err(ConstraintError::InvertedDegreeBounds { min, max });
        }
        Ok(())
    }

    /// Returns `true` when `graph` satisfies every constraint.
    #[must_use]
    pub fn accepts(&self, graph: &Graph) -> bool {
        let n = graph.vertex_count();
        if n < self.min_vertices || n > self.max_vertices || !self.admits_subgraph(graph) {
            return false;
        }
        if let Some(min) = self.min_degree
            && graph.degrees().into_iter().any(|degree| degree < min)
        {
            return false;
        }
        (!self.connected || graph.is_connected()) && (!self.biconnected || graph.is_biconnected())
    }

    /// Returns `true` when `graph` satisfies every hereditary constraint,
    /// so some supergraph built by adding vertices may still be accepted.
    #[must_use]
    pub fn admits_subgraph(&self, graph: &Graph) -> bool {
        if let Some(max) = self.max_degree
            && graph.degrees().into_iter().any(|degree| degree > max)
        {
            return false;
        }
        (!self.bipartite || graph.is_bipartite())
            && (!self.triangle_free || graph.is_triangle_free())
            && (!self.tree || graph.is_forest())
    }

    /// Returns `true` when `partial` may still grow into an accepted graph
    /// by adding vertices, up to the maximum vertex count.
    pub(crate) fn may_extend(&self, partial: &Graph) -> bool {
        if !self.admits_subgraph(partial) {
            return false;
        }
        let Some(min_degree) = self.min_degree else {
            return true;
        };
        let headroom = self.max_vertices.saturating_sub(partial.vertex_count());
        partial
            .degrees()
            .into_iter()
            .all(|degree| degree + headroom >= min_degree)
    }
}

impl Default for ConstraintSpec {
    fn default() -> Self {
        Self::all_graphs(MAX_ENUMERATED_VERTICES)
    }
}
