//! Line-oriented graph6 stream decoding.

use std::io::{BufRead, Lines};

use crate::{error::SourceError, graph::Graph};

const HEADER: &str = ">>graph6<<";

/// Iterator over the graphs of a newline-separated graph6 stream, such as
/// the output of `geng`.
///
/// Blank lines and bare `>>graph6<<` headers are skipped. Each failure
/// carries its one-based line number.
///
/// # Examples
/// ```
/// use omosearch_core::Graph6Reader;
///
/// let input = ">>graph6<<\nBg\n\nCl\n";
/// let graphs: Vec<_> = Graph6Reader::new(input.as_bytes()).collect::<Result<_, _>>()?;
/// assert_eq!(graphs.len(), 2);
/// assert_eq!(graphs[1].edge_count(), 4);
/// # Ok::<(), omosearch_core::SourceError>(())
/// ```
#[derive(Debug)]
pub struct Graph6Reader<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> Graph6Reader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for Graph6Reader<R> {
    type Item = Result<Graph, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = match self.lines.next()? {
                Ok(raw) => raw,
                Err(source) => return Some(Err(SourceError::Io { source })),
            };
            self.line += 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed == HEADER {
                continue;
            }
            return Some(Graph::from_graph6(trimmed).map_err(|error| SourceError::Decode {
                line: self.line,
                error,
            }));
        }
    }
}
