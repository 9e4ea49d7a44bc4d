//! Shared test utilities for `omosearch-core`.

use omosearch_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::graph::Graph;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `OMOSEARCH_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Topology family for generated graphs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GraphShape {
    /// Edge probability between 0.15 and 0.4.
    Sparse,
    /// Edge probability between 0.6 and 0.95.
    Dense,
    /// Random labelled tree built by attaching each vertex to an earlier one.
    Tree,
    /// Two sparse halves with no edge between them.
    Split,
}

/// Fixture for graph property tests. Keeps the generation context for
/// failure diagnosis.
#[derive(Clone, Debug)]
pub(crate) struct GraphFixture {
    pub graph: Graph,
    pub shape: GraphShape,
    pub seed: u64,
}

/// Generates fixtures with between one and `max_vertices` vertices across
/// every [`GraphShape`].
pub(crate) fn graph_fixture_strategy(max_vertices: usize) -> impl Strategy<Value = GraphFixture> {
    let shape = prop_oneof![
        Just(GraphShape::Sparse),
        Just(GraphShape::Dense),
        Just(GraphShape::Tree),
        Just(GraphShape::Split),
    ];
    (shape, any::<u64>()).prop_map(move |(shape, seed)| GraphFixture {
        graph: generate_graph(shape, max_vertices, seed),
        shape,
        seed,
    })
}

/// Generates one graph of `shape` deterministically from `seed`.
pub(crate) fn generate_graph(shape: GraphShape, max_vertices: usize, seed: u64) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let vertex_count = rng.gen_range(1..=max_vertices.max(1));
    let edges = match shape {
        GraphShape::Sparse => random_edges(&mut rng, 0..vertex_count, 0.15..=0.4),
        GraphShape::Dense => random_edges(&mut rng, 0..vertex_count, 0.6..=0.95),
        GraphShape::Tree => (1..vertex_count)
            .map(|vertex| (rng.gen_range(0..vertex), vertex))
            .collect(),
        GraphShape::Split => {
            let cut = vertex_count / 2;
            let mut edges = random_edges(&mut rng, 0..cut, 0.3..=0.6);
            edges.extend(random_edges(&mut rng, cut..vertex_count, 0.3..=0.6));
            edges
        }
    };
    Graph::from_edges(vertex_count, edges).expect("generated edges are simple and in range")
}

fn random_edges(
    rng: &mut SmallRng,
    vertices: std::ops::Range<usize>,
    probability: std::ops::RangeInclusive<f64>,
) -> Vec<(usize, usize)> {
    let probability = rng.gen_range(probability);
    let mut edges = Vec::new();
    for right in vertices.clone() {
        for left in vertices.start..right {
            if rng.gen_bool(probability) {
                edges.push((left, right));
            }
        }
    }
    edges
}
