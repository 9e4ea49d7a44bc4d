use std::{collections::BTreeSet, sync::Mutex};

use omosearch_core::{DispatchError, Dispatcher, Graph, Vertex};

const K4: [(Vertex, Vertex); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

#[must_use]
pub fn graph(vertex_count: usize, edges: &[(Vertex, Vertex)]) -> Graph {
    Graph::from_edges(vertex_count, edges.iter().copied()).expect("fixture edges must be valid")
}

#[must_use]
pub fn cycle(vertex_count: usize) -> Graph {
    let edges: Vec<_> = (0..vertex_count)
        .map(|vertex| (vertex, (vertex + 1) % vertex_count))
        .collect();
    graph(vertex_count, &edges)
}

#[must_use]
pub fn path(vertex_count: usize) -> Graph {
    let edges: Vec<_> = (1..vertex_count).map(|vertex| (vertex - 1, vertex)).collect();
    graph(vertex_count, &edges)
}

#[must_use]
pub fn star(leaves: usize) -> Graph {
    let edges: Vec<_> = (1..=leaves).map(|leaf| (0, leaf)).collect();
    graph(leaves + 1, &edges)
}

/// Two copies of K4 joined by the bridge 0-4. Both endpoints have degree 4.
#[must_use]
pub fn k4_pair() -> Graph {
    let mut edges = K4.to_vec();
    edges.extend(K4.iter().map(|&(left, right)| (left + 4, right + 4)));
    edges.push((0, 4));
    graph(8, &edges)
}

/// K4 joined to a triangle by the bridge 0-4. Vertex 4 has degree 3.
#[must_use]
pub fn k4_and_triangle() -> Graph {
    let mut edges = K4.to_vec();
    edges.extend([(4, 5), (5, 6), (6, 4), (0, 4)]);
    graph(7, &edges)
}

/// Dispatches `graphs` and returns the graph6 strings of every
/// counterexample.
pub fn counterexamples<P>(
    dispatcher: &Dispatcher,
    graphs: Vec<Graph>,
    predicate: P,
) -> Result<BTreeSet<String>, DispatchError>
where
    P: Fn(&Graph) -> bool + Sync,
{
    let found = Mutex::new(BTreeSet::new());
    dispatcher.dispatch(graphs, predicate, |graph| {
        found.lock().expect("collector lock").insert(graph.to_graph6());
        Ok(())
    })?;
    Ok(found.into_inner().expect("collector lock"))
}
