//! Benchmark parameter labels.

use std::fmt;

/// Parameters for a single-graph decision benchmark.
#[derive(Clone, Debug)]
pub struct GraphBenchParams {
    /// Fixture family label.
    pub family: &'static str,
    /// Number of vertices.
    pub vertex_count: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},n={}", self.family, self.vertex_count)
    }
}

/// Parameters for a dispatch benchmark run.
#[derive(Clone, Debug)]
pub struct DispatchBenchParams {
    /// Largest enumerated vertex count.
    pub max_vertices: usize,
    /// Worker threads.
    pub workers: usize,
}

impl fmt::Display for DispatchBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n<={},workers={}", self.max_vertices, self.workers)
    }
}
