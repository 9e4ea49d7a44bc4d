//! Simple undirected graphs stored as adjacency bitsets.
//!
//! Each vertex owns one `u64` row whose set bits name its neighbours. The
//! decision procedures lean on this layout: counting placed neighbours is a
//! single `AND` plus `count_ones`, and connectivity tests run as mask
//! fixpoints.

mod graph6;
mod structure;

use std::{collections::BTreeMap, fmt};

use crate::error::GraphError;

/// Vertex identifier in `0..graph.vertex_count()`.
pub type Vertex = usize;

/// Largest vertex count representable by [`Graph`].
pub const MAX_VERTICES: usize = 64;

/// Immutable simple undirected graph on at most [`MAX_VERTICES`] vertices.
///
/// # Examples
/// ```
/// use omosearch_core::Graph;
///
/// let path = Graph::from_edges(3, [(0, 1), (1, 2)])?;
/// assert_eq!(path.vertex_count(), 3);
/// assert_eq!(path.edge_count(), 2);
/// assert_eq!(path.degree(1), 2);
/// assert!(path.has_edge(2, 1));
/// # Ok::<(), omosearch_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Graph {
    rows: Vec<u64>,
    edge_count: usize,
}

impl Graph {
    /// Creates a graph with `vertex_count` vertices and no edges.
    ///
    /// # Errors
    /// Returns [`GraphError::TooManyVertices`] when `vertex_count` exceeds
    /// [`MAX_VERTICES`].
    pub fn empty(vertex_count: usize) -> Result<Self, GraphError> {
        if vertex_count > MAX_VERTICES {
            return Err(GraphError::TooManyVertices {
                requested: vertex_count,
                limit: MAX_VERTICES,
            });
        }
        Ok(Self {
            rows: vec![0; vertex_count],
            edge_count: 0,
        })
    }

    /// Creates a graph from an undirected edge list.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] for endpoints outside the
    /// vertex set, [`GraphError::SelfLoop`] for loops, and
    /// [`GraphError::DuplicateEdge`] when an edge is listed twice in either
    /// orientation.
    ///
    /// # Examples
    /// ```
    /// use omosearch_core::{Graph, GraphError};
    ///
    /// let err = Graph::from_edges(2, [(0, 1), (1, 0)]).unwrap_err();
    /// assert_eq!(err, GraphError::DuplicateEdge { left: 0, right: 1 });
    /// ```
    pub fn from_edges(
        vertex_count: usize,
        edges: impl IntoIterator<Item = (Vertex, Vertex)>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::empty(vertex_count)?;
        for (left, right) in edges {
            for vertex in [left, right] {
                if vertex >= vertex_count {
                    return Err(GraphError::VertexOutOfRange {
                        vertex,
                        vertex_count,
                    });
                }
            }
            if left == right {
                return Err(GraphError::SelfLoop { vertex: left });
            }
            if graph.has_edge(left, right) {
                return Err(GraphError::DuplicateEdge {
                    left: left.min(right),
                    right: left.max(right),
                });
            }
            graph.insert_edge(left, right);
        }
        Ok(graph)
    }

    /// Builds a graph from validated rows. Callers guarantee symmetry, an
    /// empty diagonal, and no bits at or above `rows.len()`.
    pub(crate) fn from_rows(rows: Vec<u64>) -> Self {
        let degree_sum: usize = rows.iter().map(|row| row.count_ones() as usize).sum();
        Self {
            rows,
            edge_count: degree_sum / 2,
        }
    }

    /// Returns a copy of this graph with one extra vertex adjacent to every
    /// vertex in `neighbours`. Bits outside the current vertex set are ignored.
    pub(crate) fn with_vertex(&self, neighbours: u64) -> Self {
        let new_vertex = self.rows.len();
        let neighbours = neighbours & self.vertex_mask();
        let mut rows = Vec::with_capacity(new_vertex + 1);
        rows.extend(self.rows.iter().enumerate().map(|(vertex, row)| {
            if neighbours & bit(vertex) == 0 {
                *row
            } else {
                row | bit(new_vertex)
            }
        }));
        rows.push(neighbours);
        Self {
            rows,
            edge_count: self.edge_count + neighbours.count_ones() as usize,
        }
    }

    fn insert_edge(&mut self, left: Vertex, right: Vertex) {
        self.rows[left] |= bit(right);
        self.rows[right] |= bit(left);
        self.edge_count += 1;
    }

    /// Returns the number of vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.rows.len() }

    /// Returns the number of undirected edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edge_count }

    /// Returns `true` when the graph has no vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Returns `true` when `left` and `right` are adjacent. Out-of-range
    /// vertices are never adjacent to anything.
    #[must_use]
    pub fn has_edge(&self, left: Vertex, right: Vertex) -> bool {
        right < MAX_VERTICES && self.rows.get(left).is_some_and(|row| row & bit(right) != 0)
    }

    /// Returns the degree of `vertex`.
    ///
    /// # Panics
    /// Panics when `vertex` is out of range.
    #[must_use]
    pub fn degree(&self, vertex: Vertex) -> usize {
        self.rows[vertex].count_ones() as usize
    }

    /// Returns the degree of every vertex in vertex order.
    #[must_use]
    pub fn degrees(&self) -> Vec<usize> {
        self.rows
            .iter()
            .map(|row| row.count_ones() as usize)
            .collect()
    }

    /// Iterates over the neighbours of `vertex` in ascending order.
    ///
    /// # Panics
    /// Panics when `vertex` is out of range.
    pub fn neighbours(&self, vertex: Vertex) -> Neighbours {
        Neighbours {
            remaining: self.rows[vertex],
        }
    }

    /// Iterates over every edge once as `(u, v)` with `u < v`, ordered
    /// lexicographically.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.rows.iter().enumerate().flat_map(|(left, row)| {
            let above = row & !low_mask(left + 1);
            Neighbours { remaining: above }.map(move |right| (left, right))
        })
    }

    /// Counts vertices per degree value, ordered by degree.
    ///
    /// # Examples
    /// ```
    /// use omosearch_core::Graph;
    ///
    /// let star = Graph::from_edges(4, [(0, 1), (0, 2), (0, 3)])?;
    /// let histogram: Vec<_> = star.degree_distribution().into_iter().collect();
    /// assert_eq!(histogram, [(1, 3), (3, 1)]);
    /// # Ok::<(), omosearch_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn degree_distribution(&self) -> BTreeMap<usize, usize> {
        let mut histogram = BTreeMap::new();
        for row in &self.rows {
            *histogram.entry(row.count_ones() as usize).or_insert(0) += 1;
        }
        histogram
    }

    /// Returns the number of vertices of odd degree.
    #[must_use]
    pub fn odd_degree_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.count_ones() % 2 == 1)
            .count()
    }

    /// Returns `true` when at least one vertex has odd degree.
    #[must_use]
    pub fn has_odd_degree(&self) -> bool {
        self.rows.iter().any(|row| row.count_ones() % 2 == 1)
    }

    /// Returns the adjacency row of `vertex` as a bitset.
    pub(crate) fn row(&self, vertex: Vertex) -> u64 {
        self.rows[vertex]
    }

    /// Returns the bitset containing every vertex of the graph.
    pub(crate) fn vertex_mask(&self) -> u64 {
        low_mask(self.rows.len())
    }
}

/// Ascending iterator over the neighbours of one vertex.
#[derive(Clone, Debug)]
pub struct Neighbours {
    remaining: u64,
}

impl Iterator for Neighbours {
    type Item = Vertex;

    fn next(&mut self) -> Option<Vertex> {
        if self.remaining == 0 {
            return None;
        }
        let vertex = self.remaining.trailing_zeros() as Vertex;
        self.remaining &= self.remaining - 1;
        Some(vertex)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Neighbours {}

/// Renders the graph as `n=V {u-v, ...}`.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={} {{", self.vertex_count())?;
        for (index, (left, right)) in self.edges().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{left}-{right}")?;
        }
        f.write_str("}")
    }
}

pub(crate) const fn bit(vertex: Vertex) -> u64 {
    1 << vertex
}

/// Bitset of the vertices `0..count`.
pub(crate) const fn low_mask(count: usize) -> u64 {
    if count >= MAX_VERTICES {
        u64::MAX
    } else {
        (1 << count) - 1
    }
}
