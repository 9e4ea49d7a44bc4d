//! Property 1: pruning is sound.
//!
//! The pruned search, the plain skeleton, and the brute-force oracle agree
//! on whether an ordering exists. The plain skeleton and the oracle try
//! candidates in the same order, so their witnesses match exactly.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{OrderingKind, OrderingSearch, Pruning, test_utils::GraphFixture};

use super::oracle::first_admissible;

/// Runs the equivalence property for both placement rules.
pub(super) fn run_pruning_equivalence_property(fixture: &GraphFixture) -> TestCaseResult {
    for kind in [OrderingKind::Omo, OrderingKind::Oeo] {
        let pruned = OrderingSearch::new(&fixture.graph, kind).run();
        let plain = OrderingSearch::new(&fixture.graph, kind)
            .with_pruning(Pruning::Disabled)
            .run();
        let oracle = first_admissible(&fixture.graph, kind);

        if pruned.found() != plain.found() {
            return Err(TestCaseError::fail(format!(
                "{kind:?}: pruned={} plain={} (shape={:?}, seed={}, graph={})",
                pruned.found(),
                plain.found(),
                fixture.shape,
                fixture.seed,
                fixture.graph,
            )));
        }
        if plain.clone().into_ordering() != oracle {
            return Err(TestCaseError::fail(format!(
                "{kind:?}: plain={:?} oracle={oracle:?} (shape={:?}, seed={}, graph={})",
                plain.into_ordering(),
                fixture.shape,
                fixture.seed,
                fixture.graph,
            )));
        }
    }
    Ok(())
}
