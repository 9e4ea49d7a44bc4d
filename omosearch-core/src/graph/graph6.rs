//! graph6 encoding as produced by nauty's `geng` and `showg`.
//!
//! The vertex count is one printable byte (`n + 63`) for `n <= 62`, or `~`
//! followed by three bytes of 18 big-endian bits. The upper triangle follows
//! column by column (`x(0,1), x(0,2), x(1,2), x(0,3), ...`), six bits per
//! byte, most significant bit first, zero padded.

use super::{Graph, MAX_VERTICES, bit};
use crate::error::GraphError;

const OFFSET: u8 = 63;
const SHORT_LIMIT: usize = 62;
const HEADER: &str = ">>graph6<<";

impl Graph {
    /// Encodes the graph in graph6 format.
    ///
    /// # Examples
    /// ```
    /// use omosearch_core::Graph;
    ///
    /// let path = Graph::from_edges(3, [(0, 1), (1, 2)])?;
    /// assert_eq!(path.to_graph6(), "Bg");
    /// # Ok::<(), omosearch_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn to_graph6(&self) -> String {
        let n = self.vertex_count();
        let mut out = Vec::with_capacity(4 + (n * n.saturating_sub(1) / 2).div_ceil(6));
        if n <= SHORT_LIMIT {
            out.push(n as u8 + OFFSET);
        } else {
            out.push(b'~');
            for shift in [12, 6, 0] {
                out.push(((n >> shift) & 0x3f) as u8 + OFFSET);
            }
        }

        let mut chunk = 0_u8;
        let mut filled = 0;
        for right in 1..n {
            for left in 0..right {
                chunk = (chunk << 1) | u8::from(self.has_edge(left, right));
                filled += 1;
                if filled == 6 {
                    out.push(chunk + OFFSET);
                    chunk = 0;
                    filled = 0;
                }
            }
        }
        if filled > 0 {
            out.push((chunk << (6 - filled)) + OFFSET);
        }
        out.into_iter().map(char::from).collect()
    }

    /// Decodes a single graph6 line. A leading `>>graph6<<` header and
    /// surrounding whitespace are ignored.
    ///
    /// # Errors
    /// Returns [`GraphError::MalformedGraph6`] when the input is empty,
    /// contains bytes outside the printable graph6 range, or has the wrong
    /// length, and [`GraphError::TooManyVertices`] when the encoded vertex
    /// count exceeds [`MAX_VERTICES`].
    ///
    /// # Examples
    /// ```
    /// use omosearch_core::Graph;
    ///
    /// let cycle = Graph::from_graph6("Cr")?;
    /// assert_eq!(cycle.vertex_count(), 4);
    /// assert_eq!(cycle.edge_count(), 4);
    /// # Ok::<(), omosearch_core::GraphError>(())
    /// ```
    pub fn from_graph6(line: &str) -> Result<Self, GraphError> {
        let trimmed = line.trim();
        let body = trimmed.strip_prefix(HEADER).unwrap_or(trimmed).as_bytes();
        if body
            .iter()
            .any(|byte| !(OFFSET..=OFFSET + 63).contains(byte))
        {
            return Err(GraphError::MalformedGraph6 {
                reason: "byte outside the printable graph6 range",
            });
        }

        let (n, data) = match body {
            [] => {
                return Err(GraphError::MalformedGraph6 {
                    reason: "empty input",
                });
            }
            [b'~', b'~', ..] => {
                return Err(GraphError::MalformedGraph6 {
                    reason: "vertex counts above 258047 are not supported",
                });
            }
            [b'~', a, b, c, rest @ ..] => {
                let n = [a, b, c]
                    .into_iter()
                    .fold(0_usize, |acc, byte| (acc << 6) | usize::from(byte - OFFSET));
                (n, rest)
            }
            [b'~', ..] => {
                return Err(GraphError::MalformedGraph6 {
                    reason: "truncated vertex count",
                });
            }
            [first, rest @ ..] => (usize::from(first - OFFSET), rest),
        };

        if n > MAX_VERTICES {
            return Err(GraphError::TooManyVertices {
                requested: n,
                limit: MAX_VERTICES,
            });
        }
        let expected = (n * n.saturating_sub(1) / 2).div_ceil(6);
        if data.len() != expected {
            return Err(GraphError::MalformedGraph6 {
                reason: "edge data length does not match the vertex count",
            });
        }

        let mut rows = vec![0_u64; n];
        let mut bits = data.iter().flat_map(|byte| {
            let value = byte - OFFSET;
            (0..6).rev().map(move |shift| (value >> shift) & 1 == 1)
        });
        for right in 1..n {
            for left in 0..right {
                if bits.next() == Some(true) {
                    rows[left] |= bit(right);
                    rows[right] |= bit(left);
                }
            }
        }
        Ok(Self::from_rows(rows))
    }
}
