//! Canonical labelling by individualisation and refinement.
//!
//! Colours start uniform and are refined until stable: a vertex's new colour
//! is the rank of `(old colour, sorted neighbour colours)` among all such
//! signatures, so the first round separates vertices by degree. While a
//! colour class holds more than one vertex, each of its vertices is
//! individualised in turn and the colouring is refined again. Every discrete
//! leaf labels vertex `v` with its colour; the canonical key is the largest
//! upper-triangle adjacency code over all leaves.
//!
//! Swapping two twins (vertices with the same neighbours apart from each
//! other) is an automorphism that fixes every other vertex, so a twin of an
//! already individualised vertex yields the same leaves and is skipped.

use crate::graph::{Graph, Vertex, bit};

/// Returns the canonical key of `graph`. Two graphs on the same number of
/// vertices are isomorphic iff their keys are equal.
pub(crate) fn canonical_key(graph: &Graph) -> u128 {
    let mut colours = vec![0; graph.vertex_count()];
    refine(graph, &mut colours);
    let mut best = 0;
    search(graph, &colours, &mut best);
    best
}

/// Rebuilds the graph whose upper-triangle code on `vertex_count` vertices
/// is `key`.
pub(crate) fn graph_from_key(vertex_count: usize, key: u128) -> Graph {
    let mut rows = vec![0_u64; vertex_count];
    let mut remaining = vertex_count * vertex_count.saturating_sub(1) / 2;
    for right in 1..vertex_count {
        for left in 0..right {
            remaining -= 1;
            if (key >> remaining) & 1 == 1 {
                rows[left] |= bit(right);
                rows[right] |= bit(left);
            }
        }
    }
    Graph::from_rows(rows)
}

fn search(graph: &Graph, colours: &[usize], best: &mut u128) {
    let Some(target) = first_shared_colour(colours) else {
        *best = (*best).max(leaf_code(graph, colours));
        return;
    };

    let mut tried: Vec<Vertex> = Vec::new();
    for vertex in (0..colours.len()).filter(|&vertex| colours[vertex] == target) {
        if tried.iter().any(|&other| are_twins(graph, other, vertex)) {
            continue;
        }
        tried.push(vertex);
        let mut individualised: Vec<usize> = colours
            .iter()
            .enumerate()
            .map(|(other, &colour)| 2 * colour + usize::from(colour == target && other != vertex))
            .collect();
        refine(graph, &mut individualised);
        search(graph, &individualised, best);
    }
}

/// Refines `colours` to a stable, order-preserving partition with colours
/// renumbered densely from zero.
fn refine(graph: &Graph, colours: &mut [usize]) {
    let mut classes = distinct(colours);
    loop {
        let signatures: Vec<(usize, Vec<usize>)> = (0..colours.len())
            .map(|vertex| {
                let mut around: Vec<usize> =
                    graph.neighbours(vertex).map(|next| colours[next]).collect();
                around.sort_unstable();
                (colours[vertex], around)
            })
            .collect();
        let mut ranked = signatures.clone();
        ranked.sort_unstable();
        ranked.dedup();
        for (colour, signature) in colours.iter_mut().zip(&signatures) {
            *colour = ranked.binary_search(signature).unwrap_or_default();
        }
        if ranked.len() == classes {
            return;
        }
        classes = ranked.len();
    }
}

fn distinct(colours: &[usize]) -> usize {
    let mut sorted = colours.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.len()
}

/// Smallest colour held by more than one vertex. Colours are dense.
fn first_shared_colour(colours: &[usize]) -> Option<usize> {
    let mut counts = vec![0_usize; colours.len()];
    for &colour in colours {
        counts[colour] += 1;
    }
    counts.iter().position(|&count| count > 1)
}

fn are_twins(graph: &Graph, left: Vertex, right: Vertex) -> bool {
    graph.row(left) & !bit(right) == graph.row(right) & !bit(left)
}

fn leaf_code(graph: &Graph, colours: &[usize]) -> u128 {
    let mut at = vec![0; colours.len()];
    for (vertex, &colour) in colours.iter().enumerate() {
        at[colour] = vertex;
    }
    let mut code = 0_u128;
    for right in 1..at.len() {
        for left in 0..right {
            code = (code << 1) | u128::from(graph.has_edge(at[left], at[right]));
        }
    }
    code
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{canonical_key, graph_from_key};
    use crate::graph::Graph;

    fn graph(vertex_count: usize, edges: &[(usize, usize)]) -> Graph {
        Graph::from_edges(vertex_count, edges.iter().copied())
            .expect("fixture edges must be valid")
    }

    #[rstest]
    #[case::path(
        graph(4, &[(0, 1), (1, 2), (2, 3)]),
        graph(4, &[(2, 0), (0, 3), (3, 1)])
    )]
    #[case::paw(
        graph(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]),
        graph(4, &[(3, 1), (1, 0), (0, 3), (0, 2)])
    )]
    #[case::petersen_relabelled(
        graph(10, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 5), (1, 6), (2, 7), (3, 8), (4, 9), (5, 7), (7, 9), (9, 6), (6, 8), (8, 5)]),
        graph(10, &[(9, 8), (8, 7), (7, 6), (6, 5), (5, 9), (9, 4), (8, 3), (7, 2), (6, 1), (5, 0), (4, 2), (2, 0), (0, 3), (3, 1), (1, 4)])
    )]
    fn isomorphic_graphs_share_a_key(#[case] left: Graph, #[case] right: Graph) {
        assert_eq!(canonical_key(&left), canonical_key(&right));
    }

    #[test]
    fn non_isomorphic_graphs_differ() {
        let path = graph(4, &[(0, 1), (1, 2), (2, 3)]);
        let star = graph(4, &[(0, 1), (0, 2), (0, 3)]);
        assert_ne!(canonical_key(&path), canonical_key(&star));

        let hexagon = graph(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]);
        let two_triangles = graph(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
        assert_ne!(canonical_key(&hexagon), canonical_key(&two_triangles));
    }

    #[test]
    fn key_rebuilds_an_isomorphic_graph() {
        let paw = graph(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]);
        let key = canonical_key(&paw);
        let rebuilt = graph_from_key(4, key);
        assert_eq!(rebuilt.edge_count(), 4);
        assert_eq!(canonical_key(&rebuilt), key);
    }

    #[test]
    fn complete_graph_is_cheap_to_label() {
        let edges: Vec<_> = (0..16)
            .flat_map(|left| ((left + 1)..16).map(move |right| (left, right)))
            .collect();
        let k16 = graph(16, &edges);
        assert_eq!(canonical_key(&k16).count_ones(), 120);
    }
}
