//! Seeded fixture graphs for benchmarks.
//!
//! Random graphs use a `SmallRng` seeded per call so every run measures the
//! same inputs.

use omosearch_core::{Graph, Vertex};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Edge density of a random fixture, as a fraction `numerator / 100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeDensity(u32);

impl EdgeDensity {
    /// Roughly one edge in five.
    pub const SPARSE: Self = Self(20);
    /// Roughly one edge in two.
    pub const HALF: Self = Self(50);
    /// Roughly four edges in five.
    pub const DENSE: Self = Self(80);

    /// Returns the percentage of vertex pairs joined by an edge.
    #[must_use]
    pub const fn percent(self) -> u32 {
        self.0
    }
}

/// Builds a random graph where each pair is joined with probability
/// `density`.
///
/// # Errors
/// Returns [`BenchSetupError::Graph`] when `vertex_count` exceeds the
/// graph representation.
pub fn random_graph(
    vertex_count: usize,
    density: EdgeDensity,
    seed: u64,
) -> Result<Graph, BenchSetupError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut edges = Vec::new();
    for right in 1..vertex_count {
        for left in 0..right {
            if rng.gen_ratio(density.percent(), 100) {
                edges.push((left, right));
            }
        }
    }
    Ok(Graph::from_edges(vertex_count, edges)?)
}

/// Builds `count` cliques of `size` vertices chained by single bridges,
/// the worst case for bridge discovery depth.
///
/// # Errors
/// Returns [`BenchSetupError::Graph`] when the chain exceeds the graph
/// representation.
pub fn bridged_cliques(count: usize, size: usize) -> Result<Graph, BenchSetupError> {
    let mut edges: Vec<(Vertex, Vertex)> = Vec::new();
    for clique in 0..count {
        let base = clique * size;
        for right in 1..size {
            edges.extend((0..right).map(|left| (base + left, base + right)));
        }
        if clique > 0 {
            edges.push((base - size, base));
        }
    }
    Ok(Graph::from_edges(count * size, edges)?)
}
