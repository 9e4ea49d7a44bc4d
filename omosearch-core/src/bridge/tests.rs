//! Unit and property tests for the bridge analysis.

use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;
use rstest::rstest;

use super::{
    Bridge, BridgeAnalyzer, BridgeTolerance, analyze, is_even_two_edge_connected,
    is_two_edge_connected,
};
use crate::{
    error::BridgeError,
    graph::Graph,
    test_utils::{GraphFixture, graph_fixture_strategy, suite_proptest_config},
};

fn graph(vertex_count: usize, edges: &[(usize, usize)]) -> Graph {
    Graph::from_edges(vertex_count, edges.iter().copied()).expect("fixture edges must be valid")
}

fn cycle(vertex_count: usize) -> Graph {
    let edges: Vec<_> = (0..vertex_count)
        .map(|vertex| (vertex, (vertex + 1) % vertex_count))
        .collect();
    graph(vertex_count, &edges)
}

/// Two copies of K4 joined by the edge 0-4. Both endpoints have degree 4.
fn k4_pair_with_even_bridge() -> Graph {
    graph(
        8,
        &[
            (0, 1),
            (0, 2),
            (0, 3),
            (1, 2),
            (1, 3),
            (2, 3),
            (4, 5),
            (4, 6),
            (4, 7),
            (5, 6),
            (5, 7),
            (6, 7),
            (0, 4),
        ],
    )
}

/// K4 joined by the edge 0-4 to a triangle. Vertex 4 has degree 3.
fn k4_and_triangle_with_odd_bridge() -> Graph {
    graph(
        7,
        &[
            (0, 1),
            (0, 2),
            (0, 3),
            (1, 2),
            (1, 3),
            (2, 3),
            (4, 5),
            (5, 6),
            (6, 4),
            (0, 4),
        ],
    )
}

#[rstest]
#[case::single_vertex(graph(1, &[]), true, true)]
#[case::square(cycle(4), true, true)]
#[case::path(graph(3, &[(0, 1), (1, 2)]), false, true)]
#[case::single_edge(graph(2, &[(0, 1)]), false, true)]
#[case::even_bridge(k4_pair_with_even_bridge(), false, false)]
#[case::odd_bridge(k4_and_triangle_with_odd_bridge(), false, true)]
#[case::bowtie(graph(5, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)]), true, true)]
fn decides_connectivity(#[case] g: Graph, #[case] plain: bool, #[case] even: bool) {
    let report = analyze(&g).expect("fixture is connected");
    assert_eq!(report.is_two_edge_connected(), plain, "plain for {g}");
    assert_eq!(report.is_even_two_edge_connected(), even, "even for {g}");
    assert_eq!(is_two_edge_connected(&g), Ok(plain));
    assert_eq!(is_even_two_edge_connected(&g), Ok(even));
}

#[test]
fn path_reports_both_edges() {
    let path = graph(3, &[(0, 1), (1, 2)]);
    let analyzer = BridgeAnalyzer::new(&path).expect("path is connected");
    assert_eq!(analyzer.bridges(), vec![Bridge::new(0, 1), Bridge::new(1, 2)]);
}

#[test]
fn even_variant_returns_offending_bridge() {
    let g = k4_pair_with_even_bridge();
    let analyzer = BridgeAnalyzer::new(&g).expect("graph is connected");
    let bridge = analyzer
        .first_intolerable_bridge(BridgeTolerance::OddEndpoint)
        .expect("0-4 has two even endpoints");
    assert_eq!(bridge.endpoints(), (0, 4));
    assert_eq!(bridge.to_string(), "0-4");
    assert_eq!(analyzer.bridges(), vec![Bridge::new(4, 0)]);
}

#[test]
fn repeated_calls_reset_traversal_state() {
    let g = k4_and_triangle_with_odd_bridge();
    let analyzer = BridgeAnalyzer::new(&g).expect("graph is connected");
    for _ in 0..3 {
        assert!(!analyzer.is_two_edge_connected());
        assert!(analyzer.is_even_two_edge_connected());
    }
}

#[test]
fn rejects_empty_graph() {
    let empty = Graph::empty(0).expect("zero vertices are allowed");
    assert_eq!(analyze(&empty), Err(BridgeError::EmptyGraph));
}

#[test]
fn rejects_disconnected_graph() {
    let split = graph(5, &[(0, 1), (1, 2), (3, 4)]);
    assert_eq!(
        BridgeAnalyzer::new(&split).map(|_| ()),
        Err(BridgeError::Disconnected {
            vertex_count: 5,
            reached: 3
        })
    );
}

/// Oracle: an edge is a bridge iff removing it disconnects the graph.
fn brute_force_bridges(g: &Graph) -> Vec<Bridge> {
    let edges: Vec<_> = g.edges().collect();
    edges
        .iter()
        .filter(|&&removed| {
            let rest = edges.iter().copied().filter(|&edge| edge != removed);
            let without = Graph::from_edges(g.vertex_count(), rest).expect("subset of valid edges");
            !without.is_connected()
        })
        .map(|&(left, right)| Bridge::new(left, right))
        .collect()
}

fn run_bridge_oracle_property(fixture: &GraphFixture) -> TestCaseResult {
    let g = &fixture.graph;
    let Ok(analyzer) = BridgeAnalyzer::new(g) else {
        prop_assert!(!g.is_connected(), "rejected a connected graph: {g}");
        return Ok(());
    };
    let expected = brute_force_bridges(g);
    prop_assert_eq!(
        analyzer.bridges(),
        expected.clone(),
        "shape={:?} seed={}",
        fixture.shape,
        fixture.seed
    );
    prop_assert_eq!(analyzer.is_two_edge_connected(), expected.is_empty());

    let even_expected = expected
        .iter()
        .all(|bridge| g.degree(bridge.left()) % 2 == 1 || g.degree(bridge.right()) % 2 == 1);
    prop_assert_eq!(analyzer.is_even_two_edge_connected(), even_expected);
    if analyzer.is_two_edge_connected() {
        prop_assert!(analyzer.is_even_two_edge_connected());
    }
    Ok(())
}

proptest! {
    #![proptest_config(suite_proptest_config(256))]

    #[test]
    fn bridges_match_removal_oracle(fixture in graph_fixture_strategy(16)) {
        run_bridge_oracle_property(&fixture)?;
    }
}
