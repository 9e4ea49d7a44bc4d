//! Structural predicates used by constraint checking.

use super::{Graph, Vertex, bit};

impl Graph {
    /// Returns the set of vertices reachable from `start` using only vertices
    /// in `within`. `start` must belong to `within`.
    pub(crate) fn reachable_within(&self, start: Vertex, within: u64) -> u64 {
        let mut seen = bit(start) & within;
        let mut frontier = seen;
        while frontier != 0 {
            let vertex = frontier.trailing_zeros() as Vertex;
            frontier &= frontier - 1;
            let fresh = self.row(vertex) & within & !seen;
            seen |= fresh;
            frontier |= fresh;
        }
        seen
    }

    /// Returns `true` when every vertex is reachable from vertex 0. The empty
    /// graph counts as connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.is_empty() || self.reachable_within(0, self.vertex_mask()) == self.vertex_mask()
    }

    /// Returns `true` when the graph is connected, has at least three
    /// vertices, and no single vertex removal disconnects it.
    #[must_use]
    pub fn is_biconnected(&self) -> bool {
        let all = self.vertex_mask();
        if self.vertex_count() < 3 || !self.is_connected() {
            return false;
        }
        (0..self.vertex_count()).all(|removed| {
            let rest = all & !bit(removed);
            let start = rest.trailing_zeros() as Vertex;
            self.reachable_within(start, rest) == rest
        })
    }

    /// Returns `true` when the vertices admit a proper two-colouring.
    #[must_use]
    pub fn is_bipartite(&self) -> bool {
        let mut uncoloured = self.vertex_mask();
        while uncoloured != 0 {
            let root = uncoloured.trailing_zeros() as Vertex;
            let mut sides = [bit(root), 0_u64];
            let mut frontier = bit(root);
            let mut side = 0;
            uncoloured &= !bit(root);
            while frontier != 0 {
                let mut next = 0;
                let mut pending = frontier;
                while pending != 0 {
                    let vertex = pending.trailing_zeros() as Vertex;
                    pending &= pending - 1;
                    if self.row(vertex) & sides[side] != 0 {
                        return false;
                    }
                    next |= self.row(vertex) & uncoloured;
                }
                side = 1 - side;
                sides[side] |= next;
                uncoloured &= !next;
                frontier = next;
            }
        }
        true
    }

    /// Returns `true` when no three vertices are pairwise adjacent.
    #[must_use]
    pub fn is_triangle_free(&self) -> bool {
        self.edges()
            .all(|(left, right)| self.row(left) & self.row(right) == 0)
    }

    /// Returns `true` when the graph contains no cycle.
    #[must_use]
    pub fn is_forest(&self) -> bool {
        let mut unvisited = self.vertex_mask();
        let mut components = 0;
        while unvisited != 0 {
            let start = unvisited.trailing_zeros() as Vertex;
            unvisited &= !self.reachable_within(start, unvisited);
            components += 1;
        }
        self.edge_count() + components == self.vertex_count()
    }
}
