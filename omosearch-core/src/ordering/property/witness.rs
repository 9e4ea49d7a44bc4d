//! Property 2: witnesses are valid and the rules nest.
//!
//! Every returned ordering verifies under its rule, an OMO ordering is also
//! an OEO ordering, and repeated runs return the same witness.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{OrderingKind, OrderingSearch, test_utils::GraphFixture, verify_ordering};

/// Runs the witness validity property.
pub(super) fn run_witness_property(fixture: &GraphFixture) -> TestCaseResult {
    let graph = &fixture.graph;
    let omo = OrderingSearch::new(graph, OrderingKind::Omo).run();
    let oeo = OrderingSearch::new(graph, OrderingKind::Oeo).run();

    for outcome in [&omo, &oeo] {
        if let Ok(witness) = outcome.witness() {
            verify_ordering(graph, outcome.kind(), witness).map_err(|err| {
                TestCaseError::fail(format!(
                    "{:?} witness {witness:?} rejected: {err} (shape={:?}, seed={})",
                    outcome.kind(),
                    fixture.shape,
                    fixture.seed,
                ))
            })?;
        }
    }

    if let Ok(witness) = omo.witness() {
        verify_ordering(graph, OrderingKind::Oeo, witness).map_err(|err| {
            TestCaseError::fail(format!(
                "OMO witness {witness:?} is not OEO: {err} (seed={})",
                fixture.seed,
            ))
        })?;
        if !oeo.found() {
            return Err(TestCaseError::fail(format!(
                "OMO found but OEO did not (seed={}, graph={graph})",
                fixture.seed,
            )));
        }
    }

    let rerun = OrderingSearch::new(graph, OrderingKind::Omo).run();
    if rerun != omo {
        return Err(TestCaseError::fail(format!(
            "non-deterministic witness: {:?} then {:?} (seed={})",
            omo.into_ordering(),
            rerun.into_ordering(),
            fixture.seed,
        )));
    }
    Ok(())
}
