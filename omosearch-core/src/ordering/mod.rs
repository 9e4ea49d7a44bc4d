//! Backtracking search for OMO and OEO vertex orderings.
//!
//! An ordering places every vertex exactly once. When vertex `v` is placed at
//! position `idx`, its `d_minus` is the number of neighbours among the
//! vertices already placed. An OMO ordering requires every `d_minus` to be
//! zero or odd; an OEO ordering additionally accepts `d_minus == degree(v)`.
//!
//! Both kinds share one depth-first skeleton. The placement rule is a value
//! ([`OrderingKind`]) rather than a type parameter, and the reference OMO
//! search adds two sound cuts:
//!
//! - Anchor exhaustion: the last vertex placed always sees all of its
//!   neighbours, so under OMO it must have odd degree or degree zero. Once
//!   every such anchor is placed while vertices remain, the branch is dead.
//! - Frozen vertex: an unplaced vertex whose neighbours are all placed has
//!   a fixed `d_minus`. If that value is inadmissible the branch is dead.
//!
//! [`Pruning::Disabled`] runs the plain skeleton; property tests check that
//! both agree.

use tracing::{instrument, trace};

use crate::{
    error::OrderingError,
    graph::{Graph, Vertex, bit},
};

/// Placement rule applied to every vertex of an ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderingKind {
    /// `d_minus` must be zero or odd.
    Omo,
    /// `d_minus` must be zero, odd, or equal to the vertex degree.
    Oeo,
}

impl OrderingKind {
    /// Returns `true` when a vertex of `degree` may be placed after
    /// `placed_neighbours` of its neighbours.
    ///
    /// # Examples
    /// ```
    /// use omosearch_core::OrderingKind;
    ///
    /// assert!(OrderingKind::Omo.admits(0, 2));
    /// assert!(OrderingKind::Omo.admits(3, 4));
    /// assert!(!OrderingKind::Omo.admits(2, 2));
    /// assert!(OrderingKind::Oeo.admits(2, 2));
    /// assert!(!OrderingKind::Oeo.admits(2, 4));
    /// ```
    #[must_use]
    pub const fn admits(self, placed_neighbours: usize, degree: usize) -> bool {
        let zero_or_odd = placed_neighbours == 0 || placed_neighbours % 2 == 1;
        match self {
            Self::Omo => zero_or_odd,
            Self::Oeo => zero_or_odd || placed_neighbours == degree,
        }
    }

    /// Short lowercase label used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Omo => "omo",
            Self::Oeo => "oeo",
        }
    }
}

/// Selects whether OMO searches apply the anchor and frozen-vertex cuts.
///
/// OEO searches ignore this setting: a frozen vertex always satisfies the
/// OEO rule, and the last vertex is always admissible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Pruning {
    /// Apply both cuts. This is the reference behaviour.
    #[default]
    Enabled,
    /// Plain backtracking without cuts.
    Disabled,
}

/// Configured ordering search over one borrowed graph.
///
/// # Examples
/// ```
/// use omosearch_core::{Graph, OrderingKind, OrderingSearch};
///
/// let star = Graph::from_edges(4, [(0, 1), (0, 2), (0, 3)])?;
/// let outcome = OrderingSearch::new(&star, OrderingKind::Omo).run();
/// assert!(outcome.found());
/// assert_eq!(outcome.witness()?, &[0, 1, 2, 3]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct OrderingSearch<'g> {
    graph: &'g Graph,
    kind: OrderingKind,
    pruning: Pruning,
}

impl<'g> OrderingSearch<'g> {
    /// Creates a search using the reference pruning.
    #[must_use]
    pub fn new(graph: &'g Graph, kind: OrderingKind) -> Self {
        Self {
            graph,
            kind,
            pruning: Pruning::Enabled,
        }
    }

    /// Overrides the pruning mode.
    #[must_use]
    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    /// Returns the placement rule.
    #[must_use]
    #[rustfmt::skip]
    pub fn kind(&self) -> OrderingKind { self.kind }

    /// Returns the pruning mode.
    #[must_use]
    #[rustfmt::skip]
    pub fn pruning(&self) -> Pruning { self.pruning }

    /// Runs the search to completion.
    ///
    /// The result is deterministic: candidates are tried in ascending vertex
    /// order, so the witness is the lexicographically first admissible
    /// ordering reachable under the configured pruning.
    #[instrument(
        name = "core.ordering_search",
        level = "trace",
        skip(self),
        fields(
            kind = self.kind.as_str(),
            vertices = self.graph.vertex_count(),
            pruning = ?self.pruning
        ),
    )]
    pub fn run(&self) -> SearchOutcome {
        let mut state = SearchState::new(self);
        let found = state.extend(0);
        trace!(found, nodes = state.nodes, "ordering search finished");
        SearchOutcome {
            kind: self.kind,
            ordering: found.then_some(state.prefix),
        }
    }
}

/// Mutable scratch space for one search. `taken` holds exactly the vertices
/// in `prefix`.
struct SearchState<'s> {
    graph: &'s Graph,
    kind: OrderingKind,
    cuts: bool,
    degrees: Vec<usize>,
    anchors: u64,
    anchor_total: usize,
    taken: u64,
    prefix: Vec<Vertex>,
    nodes: u64,
}

impl<'s> SearchState<'s> {
    fn new(search: &OrderingSearch<'s>) -> Self {
        let graph = search.graph;
        let degrees = graph.degrees();
        let anchors = degrees
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0 || **degree % 2 == 1)
            .fold(0_u64, |mask, (vertex, _)| mask | bit(vertex));
        Self {
            graph,
            kind: search.kind,
            cuts: search.kind == OrderingKind::Omo && search.pruning == Pruning::Enabled,
            degrees,
            anchors,
            anchor_total: anchors.count_ones() as usize,
            taken: 0,
            prefix: Vec::with_capacity(graph.vertex_count()),
            nodes: 0,
        }
    }

    fn extend(&mut self, anchors_placed: usize) -> bool {
        self.nodes += 1;
        let vertex_count = self.graph.vertex_count();
        if self.prefix.len() == vertex_count {
            return true;
        }
        if self.cuts && anchors_placed == self.anchor_total {
            return false;
        }

        for vertex in 0..vertex_count {
            let mask = bit(vertex);
            if self.taken & mask != 0 {
                continue;
            }
            let row = self.graph.row(vertex);
            let placed = (row & self.taken).count_ones() as usize;
            if !self.kind.admits(placed, self.degrees[vertex]) {
                if self.cuts && row & !self.taken == 0 {
                    return false;
                }
                continue;
            }

            self.taken |= mask;
            self.prefix.push(vertex);
            let anchor = usize::from(self.anchors & mask != 0);
            if self.extend(anchors_placed + anchor) {
                return true;
            }
            self.prefix.pop();
            self.taken &= !mask;
        }
        false
    }
}

/// Result of an [`OrderingSearch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    kind: OrderingKind,
    ordering: Option<Vec<Vertex>>,
}

impl SearchOutcome {
    /// Returns `true` when an ordering exists.
    #[must_use]
    pub fn found(&self) -> bool {
        self.ordering.is_some()
    }

    /// Returns the placement rule the search used.
    #[must_use]
    #[rustfmt::skip]
    pub fn kind(&self) -> OrderingKind { self.kind }

    /// Returns the witnessing ordering.
    ///
    /// # Errors
    /// Returns [`OrderingError::NoSolution`] when the search failed. Check
    /// [`Self::found`] first when failure is an expected outcome.
    pub fn witness(&self) -> Result<&[Vertex], OrderingError> {
        self.ordering.as_deref().ok_or(OrderingError::NoSolution)
    }

    /// Consumes the outcome and returns the ordering, if any.
    #[must_use]
    pub fn into_ordering(self) -> Option<Vec<Vertex>> {
        self.ordering
    }
}

/// Checks that `ordering` is a permutation of the vertices of `graph` and
/// that every placement satisfies `kind`.
///
/// # Errors
/// Returns [`OrderingError::NotAPermutation`] when vertices are missing,
/// repeated, or out of range, and [`OrderingError::Inadmissible`] for the
/// first placement violating `kind`.
///
/// # Examples
/// ```
/// use omosearch_core::{Graph, OrderingError, OrderingKind, verify_ordering};
///
/// let square = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)])?;
/// assert!(verify_ordering(&square, OrderingKind::Oeo, &[0, 1, 2, 3]).is_ok());
/// assert_eq!(
///     verify_ordering(&square, OrderingKind::Omo, &[0, 1, 2, 3]),
///     Err(OrderingError::Inadmissible { position: 3, vertex: 3, placed_neighbours: 2 }),
/// );
/// # Ok::<(), omosearch_core::GraphError>(())
/// ```
pub fn verify_ordering(
    graph: &Graph,
    kind: OrderingKind,
    ordering: &[Vertex],
) -> Result<(), OrderingError> {
    let vertex_count = graph.vertex_count();
    let not_a_permutation = OrderingError::NotAPermutation {
        len: ordering.len(),
        vertex_count,
    };
    if ordering.len() != vertex_count {
        return Err(not_a_permutation);
    }

    let mut placed = 0_u64;
    for (position, &vertex) in ordering.iter().enumerate() {
        if vertex >= vertex_count || placed & bit(vertex) != 0 {
            return Err(not_a_permutation);
        }
        let placed_neighbours = (graph.row(vertex) & placed).count_ones() as usize;
        if !kind.admits(placed_neighbours, graph.degree(vertex)) {
            return Err(OrderingError::Inadmissible {
                position,
                vertex,
                placed_neighbours,
            });
        }
        placed |= bit(vertex);
    }
    Ok(())
}

/// Returns `true` when `graph` admits an OMO ordering.
#[must_use]
pub fn is_omo(graph: &Graph) -> bool {
    OrderingSearch::new(graph, OrderingKind::Omo).run().found()
}

/// Returns `true` when `graph` admits an OEO ordering.
#[must_use]
pub fn is_oeo(graph: &Graph) -> bool {
    OrderingSearch::new(graph, OrderingKind::Oeo).run().found()
}

/// Returns an OMO ordering of `graph`, or `None` when none exists.
#[must_use]
pub fn omo_witness(graph: &Graph) -> Option<Vec<Vertex>> {
    OrderingSearch::new(graph, OrderingKind::Omo)
        .run()
        .into_ordering()
}

/// Returns an OEO ordering of `graph`, or `None` when none exists.
#[must_use]
pub fn oeo_witness(graph: &Graph) -> Option<Vec<Vertex>> {
    OrderingSearch::new(graph, OrderingKind::Oeo)
        .run()
        .into_ordering()
}

#[cfg(test)]
mod property;
