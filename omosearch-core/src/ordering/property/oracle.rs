//! Brute-force ordering oracle.
//!
//! Enumerates permutations in lexicographic order and returns the first one
//! satisfying the placement rule. Only suitable for very small graphs.

use crate::{
    OrderingKind,
    graph::{Graph, Vertex},
};

/// Returns the lexicographically first admissible ordering, if any.
pub(super) fn first_admissible(graph: &Graph, kind: OrderingKind) -> Option<Vec<Vertex>> {
    let mut prefix = Vec::with_capacity(graph.vertex_count());
    let mut used = vec![false; graph.vertex_count()];
    place(graph, kind, &mut prefix, &mut used).then_some(prefix)
}

fn place(graph: &Graph, kind: OrderingKind, prefix: &mut Vec<Vertex>, used: &mut [bool]) -> bool {
    if prefix.len() == graph.vertex_count() {
        return true;
    }
    for vertex in 0..graph.vertex_count() {
        if used[vertex] {
            continue;
        }
        let placed = prefix
            .iter()
            .filter(|&&earlier| graph.has_edge(earlier, vertex))
            .count();
        if !kind.admits(placed, graph.degree(vertex)) {
            continue;
        }
        used[vertex] = true;
        prefix.push(vertex);
        if place(graph, kind, prefix, used) {
            return true;
        }
        prefix.pop();
        used[vertex] = false;
    }
    false
}
