//! Properties under test and the filters selecting candidate graphs.
//!
//! A [`Probe`] pairs a list of [`Condition`]s with a [`Property`]. A graph
//! is a counterexample when it matches every condition and the property
//! fails, so [`Probe::passes`] is the predicate handed to the dispatcher.

use std::fmt;

use crate::{
    bridge::BridgeAnalyzer,
    graph::Graph,
    ordering::{is_oeo, is_omo},
};

/// Graph property decided by one of the core procedures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// The graph admits an OMO ordering.
    Omo,
    /// The graph admits an OEO ordering.
    Oeo,
    /// The graph is connected and bridgeless.
    TwoEdgeConnected,
    /// The graph is connected and every bridge has an odd-degree endpoint.
    EvenTwoEdgeConnected,
    /// Some vertex has odd degree.
    HasOddDegree,
    /// At least this many vertices have odd degree.
    OddVerticesAtLeast(usize),
}

impl Property {
    /// Decides the property for `graph`.
    ///
    /// Bridge properties are `false` for graphs that are empty or
    /// disconnected.
    ///
    /// # Examples
    /// ```
    /// use omosearch_core::{Graph, Property};
    ///
    /// let path = Graph::from_edges(3, [(0, 1), (1, 2)])?;
    /// assert!(Property::Omo.holds(&path));
    /// assert!(!Property::TwoEdgeConnected.holds(&path));
    /// assert!(Property::OddVerticesAtLeast(2).holds(&path));
    /// # Ok::<(), omosearch_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn holds(self, graph: &Graph) -> bool {
        match self {
            Self::Omo => is_omo(graph),
            Self::Oeo => is_oeo(graph),
            Self::TwoEdgeConnected => BridgeAnalyzer::new(graph)
                .is_ok_and(|analyzer| analyzer.is_two_edge_connected()),
            Self::EvenTwoEdgeConnected => BridgeAnalyzer::new(graph)
                .is_ok_and(|analyzer| analyzer.is_even_two_edge_connected()),
            Self::HasOddDegree => graph.has_odd_degree(),
            Self::OddVerticesAtLeast(count) => graph.odd_degree_count() >= count,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Omo => f.write_str("omo"),
            Self::Oeo => f.write_str("oeo"),
            Self::TwoEdgeConnected => f.write_str("two-edge-connected"),
            Self::EvenTwoEdgeConnected => f.write_str("even-two-edge-connected"),
            Self::HasOddDegree => f.write_str("has-odd-degree"),
            Self::OddVerticesAtLeast(count) => write!(f, "odd-vertices>={count}"),
        }
    }
}

/// Requirement that a property evaluates to `expected`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Condition {
    /// Property to evaluate.
    pub property: Property,
    /// Required outcome.
    pub expected: bool,
}

impl Condition {
    /// Requires `property` to hold.
    #[must_use]
    pub const fn require(property: Property) -> Self {
        Self {
            property,
            expected: true,
        }
    }

    /// Requires `property` to fail.
    #[must_use]
    pub const fn exclude(property: Property) -> Self {
        Self {
            property,
            expected: false,
        }
    }

    /// Returns `true` when `graph` meets the requirement.
    #[must_use]
    pub fn matches(&self, graph: &Graph) -> bool {
        self.property.holds(graph) == self.expected
    }
}

/// Property under test together with its candidate filter.
///
/// # Examples
/// ```
/// use omosearch_core::{Graph, Probe};
///
/// let square = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)])?;
/// // No odd-degree vertex, so the square is filtered out rather than failing.
/// assert!(Probe::omo().passes(&square));
/// assert!(Probe::oeo().passes(&square));
/// # Ok::<(), omosearch_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Probe {
    conditions: Vec<Condition>,
    property: Property,
}

impl Probe {
    /// Tests `property` on every graph.
    #[must_use]
    pub fn new(property: Property) -> Self {
        Self {
            conditions: Vec::new(),
            property,
        }
    }

    /// Adds a filter condition.
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// OMO ordering on graphs with at least one odd-degree vertex.
    #[must_use]
    pub fn omo() -> Self {
        Self::new(Property::Omo).with_condition(Condition::require(Property::HasOddDegree))
    }

    /// OEO ordering on every graph.
    #[must_use]
    pub fn oeo() -> Self {
        Self::new(Property::Oeo)
    }

    /// Even 2-edge-connectivity on graphs that have an odd-degree vertex,
    /// are not 2-edge-connected, and admit no OMO ordering.
    #[must_use]
    pub fn even_bridges() -> Self {
        Self::new(Property::EvenTwoEdgeConnected)
            .with_condition(Condition::require(Property::HasOddDegree))
            .with_condition(Condition::exclude(Property::TwoEdgeConnected))
            .with_condition(Condition::exclude(Property::Omo))
    }

    /// Returns the filter conditions.
    #[must_use]
    #[rustfmt::skip]
    pub fn conditions(&self) -> &[Condition] { &self.conditions }

    /// Returns the property under test.
    #[must_use]
    #[rustfmt::skip]
    pub fn property(&self) -> Property { self.property }

    /// Returns `true` when `graph` matches every condition.
    #[must_use]
    pub fn selects(&self, graph: &Graph) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.matches(graph))
    }

    /// Returns `false` exactly when `graph` is a counterexample.
    #[must_use]
    pub fn passes(&self, graph: &Graph) -> bool {
        !self.selects(graph) || self.property.holds(graph)
    }
}
