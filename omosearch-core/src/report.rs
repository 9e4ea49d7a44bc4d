//! Serialised counterexample reporting.

use std::{
    io::Write,
    str::FromStr,
    sync::{Mutex, MutexGuard},
};

use crate::{error::ReportError, graph::Graph};

/// Rendering used for reported graphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    /// `n=V {u-v, ...}`.
    #[default]
    EdgeList,
    /// One graph6 string, readable by nauty tools and [`crate::Graph6Reader`].
    Graph6,
}

impl ReportFormat {
    /// Renders `graph` in this format.
    #[must_use]
    pub fn render(self, graph: &Graph) -> String {
        match self {
            Self::EdgeList => graph.to_string(),
            Self::Graph6 => graph.to_graph6(),
        }
    }

    /// Returns the lowercase name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EdgeList => "edges",
            Self::Graph6 => "graph6",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "edges" | "edge-list" => Ok(Self::EdgeList),
            "graph6" | "g6" => Ok(Self::Graph6),
            other => Err(format!("unsupported report format '{other}'")),
        }
    }
}

/// Shared, lock-guarded sink for counterexample reports.
///
/// Each report is rendered before the lock is taken and written with a
/// single `write_all` followed by a flush while the lock is held, so
/// concurrent reports never interleave.
///
/// # Examples
/// ```
/// use omosearch_core::{Graph, ReportFormat, ReportSink};
///
/// let sink = ReportSink::new(Vec::new(), ReportFormat::Graph6);
/// let path = Graph::from_edges(3, [(0, 1), (1, 2)])?;
/// sink.report("\t", &path)?;
/// assert_eq!(sink.into_inner()?, b"\tBg\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct ReportSink<W> {
    writer: Mutex<W>,
    format: ReportFormat,
}

impl<W: Write> ReportSink<W> {
    /// Wraps `writer`.
    pub fn new(writer: W, format: ReportFormat) -> Self {
        Self {
            writer: Mutex::new(writer),
            format,
        }
    }

    /// Returns the rendering format.
    #[must_use]
    #[rustfmt::skip]
    pub fn format(&self) -> ReportFormat { self.format }

    /// Writes `prefix` followed by the rendered graph and a newline.
    ///
    /// # Errors
    /// Returns [`ReportError::Io`] when writing or flushing fails and
    /// [`ReportError::LockPoisoned`] when another reporter panicked while
    /// holding the sink.
    pub fn report(&self, prefix: &str, graph: &Graph) -> Result<(), ReportError> {
        let line = format!("{prefix}{}\n", self.format.render(graph));
        let mut writer = self.lock()?;
        writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|source| ReportError::Io { source })
    }

    /// Consumes the sink and returns the writer.
    ///
    /// # Errors
    /// Returns [`ReportError::LockPoisoned`] when a reporter panicked while
    /// holding the sink.
    pub fn into_inner(self) -> Result<W, ReportError> {
        self.writer.into_inner().map_err(|_| ReportError::LockPoisoned {
            resource: "report sink",
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, W>, ReportError> {
        self.writer.lock().map_err(|_| ReportError::LockPoisoned {
            resource: "report sink",
        })
    }
}
