//! Reference graph generation engine.
//!
//! [`GraphEnumerator`] lists every graph satisfying a [`ConstraintSpec`]
//! once per isomorphism class. Level `n + 1` is grown from the classes of
//! level `n` by adding one vertex adjacent to each subset of the existing
//! vertices, dropping children that break a hereditary constraint and
//! merging duplicates by canonical key. Every connected graph has a vertex
//! whose removal leaves it connected, so growing only connected levels
//! still reaches every connected graph.
//!
//! Externally generated graphs (for example from nauty's `geng`) can be fed
//! through [`Graph6Reader`] instead.

mod canon;
mod reader;

use rayon::prelude::*;
use tracing::debug;

pub use self::reader::Graph6Reader;
use self::canon::{canonical_key, graph_from_key};
use crate::{constraints::ConstraintSpec, error::ConstraintError, graph::Graph};

/// Largest vertex count the enumerator supports. The canonical key of a
/// graph on this many vertices fills 120 bits of a `u128`.
pub const MAX_ENUMERATED_VERTICES: usize = 16;

/// Lazy, finite iterator over the isomorphism classes admitted by a
/// [`ConstraintSpec`], in increasing vertex count.
///
/// Within one vertex count the order is fixed by the canonical keys, so two
/// runs yield identical sequences.
///
/// # Examples
/// ```
/// use omosearch_core::{ConstraintSpec, GraphEnumerator};
///
/// let trees = GraphEnumerator::new(ConstraintSpec::new(5, 5).tree(true))?;
/// assert_eq!(trees.count(), 3);
/// # Ok::<(), omosearch_core::ConstraintError>(())
/// ```
#[derive(Debug)]
pub struct GraphEnumerator {
    spec: ConstraintSpec,
    vertex_count: usize,
    level: Vec<u128>,
    cursor: usize,
}

impl GraphEnumerator {
    /// Creates an enumerator for `spec`.
    ///
    /// # Errors
    /// Returns the [`ConstraintSpec::validate`] failure for unusable specs.
    pub fn new(spec: ConstraintSpec) -> Result<Self, ConstraintError> {
        spec.validate()?;
        Ok(Self {
            spec,
            vertex_count: 1,
            level: vec![0],
            cursor: 0,
        })
    }

    /// Returns the specification being enumerated.
    #[must_use]
    #[rustfmt::skip]
    pub fn spec(&self) -> &ConstraintSpec { &self.spec }

    fn expand(&mut self) {
        let parent_count = self.vertex_count;
        let child_count = parent_count + 1;
        let spec = &self.spec;
        let first_mask = u64::from(spec.requires_connected());

        let mut next: Vec<u128> = self
            .level
            .par_iter()
            .flat_map_iter(|&key| {
                let parent = graph_from_key(parent_count, key);
                (first_mask..(1_u64 << parent_count)).filter_map(move |neighbours| {
                    let child = parent.with_vertex(neighbours);
                    spec.may_extend(&child).then(|| canonical_key(&child))
                })
            })
            .collect();
        next.par_sort_unstable();
        next.dedup();

        debug!(
            vertices = child_count,
            classes = next.len(),
            "expanded enumeration level"
        );
        self.level = next;
        self.vertex_count = child_count;
        self.cursor = 0;
    }
}

impl Iterator for GraphEnumerator {
    type Item = Graph;

    fn next(&mut self) -> Option<Graph> {
        loop {
            while let Some(&key) = self.level.get(self.cursor) {
                self.cursor += 1;
                if self.vertex_count < self.spec.min_vertices() {
                    continue;
                }
                let graph = graph_from_key(self.vertex_count, key);
                if self.spec.accepts(&graph) {
                    return Some(graph);
                }
            }
            if self.vertex_count >= self.spec.max_vertices() || self.level.is_empty() {
                return None;
            }
            self.expand();
        }
    }
}
