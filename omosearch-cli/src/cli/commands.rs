//! Command implementations and argument parsing for the omosearch CLI.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use omosearch_core::{
    Condition, ConstraintError, ConstraintSpec, DEFAULT_BATCH_SIZE, DispatchConfig, DispatchError,
    DispatchSummary, Dispatcher, Graph, Graph6Reader, GraphError, OrderingKind, OrderingSearch,
    Probe, Property, ReportFormat, ReportSink, Vertex,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_MAX_VERTICES: usize = 8;
const REPORT_PREFIX: &str = "\t";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "omosearch",
    about = "Search graph families for OMO, OEO, and even-bridge counterexamples."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Enumerate a constrained graph family and report counterexamples.
    Search(SearchCommand),
    /// Apply a probe to graph6 input, one graph per line.
    Check(CheckCommand),
    /// Print an ordering witness for a single graph6 graph.
    Order(OrderCommand),
}

/// Options accepted by the `search` command.
#[derive(Debug, Args, Clone)]
pub struct SearchCommand {
    /// Graph family to enumerate.
    #[arg(long, value_enum, default_value_t = Family::All)]
    pub family: Family,

    /// Smallest vertex count (defaults to the family's smallest member).
    #[arg(long = "min-vertices")]
    pub min_vertices: Option<usize>,

    /// Largest vertex count.
    #[arg(long = "max-vertices", default_value_t = DEFAULT_MAX_VERTICES)]
    pub max_vertices: usize,

    /// Only enumerate trees (forests with `--disconnected`).
    #[arg(long)]
    pub tree: bool,

    /// Also enumerate disconnected graphs.
    #[arg(long)]
    pub disconnected: bool,

    /// Only enumerate biconnected graphs.
    #[arg(long)]
    pub biconnected: bool,

    /// Only enumerate bipartite graphs.
    #[arg(long)]
    pub bipartite: bool,

    /// Only enumerate triangle-free graphs.
    #[arg(long = "triangle-free")]
    pub triangle_free: bool,

    /// Lower bound on every vertex degree.
    #[arg(long = "min-degree")]
    pub min_degree: Option<usize>,

    /// Upper bound on every vertex degree.
    #[arg(long = "max-degree")]
    pub max_degree: Option<usize>,

    /// Property under test and its filters.
    #[command(flatten)]
    pub probe: ProbeArgs,

    /// Dispatch and reporting settings.
    #[command(flatten)]
    pub dispatch: DispatchArgs,
}

/// Options accepted by the `check` command.
#[derive(Debug, Args, Clone)]
pub struct CheckCommand {
    /// graph6 file to read; standard input when omitted.
    pub input: Option<PathBuf>,

    /// Property under test and its filters.
    #[command(flatten)]
    pub probe: ProbeArgs,

    /// Dispatch and reporting settings.
    #[command(flatten)]
    pub dispatch: DispatchArgs,
}

/// Options accepted by the `order` command.
#[derive(Debug, Args, Clone)]
pub struct OrderCommand {
    /// Graph in graph6 format.
    pub graph6: String,

    /// Ordering kind to search for.
    #[arg(long, value_enum, default_value_t = KindArg::Omo)]
    pub kind: KindArg,
}

/// Probe selection shared by `search` and `check`.
#[derive(Debug, Args, Clone)]
pub struct ProbeArgs {
    /// Property to test.
    #[arg(long, value_enum, default_value_t = ProbeKind::Omo)]
    pub probe: ProbeKind,

    /// Only test graphs with at least this many odd-degree vertices.
    #[arg(long = "min-odd-vertices")]
    pub min_odd_vertices: Option<usize>,
}

/// Worker pool and output settings shared by `search` and `check`.
#[derive(Debug, Args, Clone)]
pub struct DispatchArgs {
    /// Worker threads (defaults to the available parallelism).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Graphs handed to a worker at a time.
    #[arg(long = "batch-size", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Counterexample rendering: `edges` or `graph6`.
    #[arg(long, default_value = "edges")]
    pub format: ReportFormat,
}

/// Graph families with a dedicated preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Family {
    /// Every connected graph.
    All,
    /// Connected 3-regular graphs.
    Cubic,
    /// Connected bipartite graphs.
    Bipartite,
    /// Connected triangle-free graphs.
    TriangleFree,
}

impl Family {
    fn spec(self, max_vertices: usize) -> ConstraintSpec {
        match self {
            Self::All => ConstraintSpec::all_graphs(max_vertices),
            Self::Cubic => ConstraintSpec::cubic_graphs(max_vertices),
            Self::Bipartite => ConstraintSpec::bipartite_graphs(max_vertices),
            Self::TriangleFree => ConstraintSpec::triangle_free_graphs(max_vertices),
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Cubic => "cubic",
            Self::Bipartite => "bipartite",
            Self::TriangleFree => "triangle-free",
        }
    }
}

/// Probe presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProbeKind {
    /// OMO ordering on graphs with an odd-degree vertex.
    Omo,
    /// OEO ordering on every graph.
    Oeo,
    /// Even 2-edge-connectivity on odd, bridged, non-OMO graphs.
    EvenBridges,
}

/// Ordering kinds accepted by `order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Placed-neighbour counts must be zero or odd.
    Omo,
    /// As OMO, but a vertex may also be placed after all its neighbours.
    Oeo,
}

impl From<KindArg> for OrderingKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Omo => Self::Omo,
            KindArg::Oeo => Self::Oeo,
        }
    }
}

impl ProbeArgs {
    fn build(&self) -> Probe {
        let probe = match self.probe {
            ProbeKind::Omo => Probe::omo(),
            ProbeKind::Oeo => Probe::oeo(),
            ProbeKind::EvenBridges => Probe::even_bridges(),
        };
        match self.min_odd_vertices {
            Some(count) => {
                probe.with_condition(Condition::require(Property::OddVerticesAtLeast(count)))
            }
            None => probe,
        }
    }
}

impl DispatchArgs {
    fn dispatcher(&self) -> Result<Dispatcher, CliError> {
        let mut config = DispatchConfig::default().with_batch_size(self.batch_size);
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        Ok(Dispatcher::new(config)?)
    }
}

impl SearchCommand {
    /// Builds the constraint specification described by the arguments.
    #[must_use]
    pub fn constraint_spec(&self) -> ConstraintSpec {
        let preset = self.family.spec(self.max_vertices);
        let min_vertices = self.min_vertices.unwrap_or_else(|| preset.min_vertices());
        let mut spec = ConstraintSpec::new(min_vertices, self.max_vertices)
            .tree(self.tree)
            .connected(!self.disconnected)
            .biconnected(self.biconnected)
            .bipartite(self.bipartite || self.family == Family::Bipartite)
            .triangle_free(self.triangle_free || self.family == Family::TriangleFree);
        if let Some(degree) = self.min_degree.or(preset.min_degree_bound()) {
            spec = spec.min_degree(degree);
        }
        if let Some(degree) = self.max_degree.or(preset.max_degree_bound()) {
            spec = spec.max_degree(degree);
        }
        spec
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Writing to the output stream failed.
    #[error("failed to write output: {source}")]
    Output {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A graph argument did not decode.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The requested family cannot be enumerated.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
    /// Dispatch failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl CliError {
    /// Returns the most specific stable code of the underlying core error.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Io { .. } | Self::Output { .. } => None,
            Self::Graph(error) => Some(error.code().as_str()),
            Self::Constraint(error) => Some(error.code().as_str()),
            Self::Dispatch(error) => Some(
                error
                    .constraint_code()
                    .map(|code| code.as_str())
                    .or_else(|| error.source_code().map(|code| code.as_str()))
                    .or_else(|| error.report_code().map(|code| code.as_str()))
                    .unwrap_or_else(|| error.code().as_str()),
            ),
        }
    }
}

/// Outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionSummary {
    /// `search` or `check` finished.
    Dispatch(DispatchSummary),
    /// `order` finished; `ordering` is `None` when no witness exists.
    Order {
        /// Ordering kind searched for.
        kind: OrderingKind,
        /// Witness ordering.
        ordering: Option<Vec<Vertex>>,
    },
}

/// Executes the CLI command represented by `cli`, writing counterexamples
/// or the witness ordering to `writer`.
///
/// # Errors
/// Returns [`CliError`] when input cannot be read, the arguments describe
/// an unusable family or pool, or writing fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use clap::Parser;
/// # use omosearch_cli::cli::{Cli, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli::try_parse_from(["omosearch", "search", "--max-vertices", "4", "--format", "graph6"])?;
/// let mut out = Vec::new();
/// run_cli(cli, &mut out)?;
/// // K4 is the only counterexample on at most four vertices.
/// assert_eq!(String::from_utf8(out)?, "\tC~\n");
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip_all, fields(command = field::Empty))]
pub fn run_cli<W: Write + Send>(cli: Cli, writer: &mut W) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Search(search) => {
            span.record("command", "search");
            run_search(&search, writer).map(ExecutionSummary::Dispatch)
        }
        Command::Check(check) => {
            span.record("command", "check");
            run_check(&check, writer).map(ExecutionSummary::Dispatch)
        }
        Command::Order(order) => {
            span.record("command", "order");
            run_order(&order, writer)
        }
    }
}

#[instrument(
    name = "cli.search",
    err,
    skip_all,
    fields(family = command.family.label(), max_vertices = command.max_vertices, probe = field::Empty),
)]
pub(super) fn run_search<W: Write + Send>(
    command: &SearchCommand,
    writer: &mut W,
) -> Result<DispatchSummary, CliError> {
    let probe = command.probe.build();
    Span::current().record("probe", field::display(probe.property()));
    let spec = command.constraint_spec();
    spec.validate()?;
    let dispatcher = command.dispatch.dispatcher()?;
    let sink = ReportSink::new(writer, command.dispatch.format);
    let summary = dispatcher.dispatch_family(
        spec,
        |graph| probe.passes(graph),
        |graph| sink.report(REPORT_PREFIX, graph),
    )?;
    info!(
        evaluated = summary.evaluated,
        counterexamples = summary.counterexamples,
        "search completed"
    );
    Ok(summary)
}

#[instrument(name = "cli.check", err, skip_all, fields(input = field::Empty))]
pub(super) fn run_check<W: Write + Send>(
    command: &CheckCommand,
    writer: &mut W,
) -> Result<DispatchSummary, CliError> {
    let input: Box<dyn BufRead + Send> = match &command.input {
        Some(path) => {
            Span::current().record("input", field::display(path.display()));
            Box::new(open_graph6(path)?)
        }
        None => {
            Span::current().record("input", "<stdin>");
            Box::new(BufReader::new(io::stdin()))
        }
    };
    let probe = command.probe.build();
    let dispatcher = command.dispatch.dispatcher()?;
    let sink = ReportSink::new(writer, command.dispatch.format);
    let summary = dispatcher.try_dispatch(
        Graph6Reader::new(input),
        |graph| probe.passes(graph),
        |graph| sink.report(REPORT_PREFIX, graph),
    )?;
    info!(
        evaluated = summary.evaluated,
        counterexamples = summary.counterexamples,
        "check completed"
    );
    Ok(summary)
}

#[instrument(name = "cli.order", err, skip_all, fields(kind = field::Empty))]
pub(super) fn run_order<W: Write>(
    command: &OrderCommand,
    writer: &mut W,
) -> Result<ExecutionSummary, CliError> {
    let kind = OrderingKind::from(command.kind);
    Span::current().record("kind", kind.as_str());
    let graph = Graph::from_graph6(&command.graph6)?;
    let ordering = OrderingSearch::new(&graph, kind).run().into_ordering();
    render_ordering(kind, ordering.as_deref(), writer)
        .map_err(|source| CliError::Output { source })?;
    Ok(ExecutionSummary::Order { kind, ordering })
}

#[instrument(name = "cli.open_graph6", err, fields(path = %path.display()))]
pub(super) fn open_graph6(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Writes `kind: v0 v1 ...`, or `kind: none` when no ordering exists.
///
/// # Errors
/// Returns [`io::Error`] if writing fails.
///
/// # Examples
/// ```
/// # use omosearch_cli::cli::render_ordering;
/// # use omosearch_core::OrderingKind;
/// let mut out = Vec::new();
/// render_ordering(OrderingKind::Omo, Some(&[0, 1, 3, 2][..]), &mut out)?;
/// render_ordering(OrderingKind::Oeo, None, &mut out)?;
/// assert_eq!(out, b"omo: 0 1 3 2\noeo: none\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render_ordering(
    kind: OrderingKind,
    ordering: Option<&[Vertex]>,
    mut writer: impl Write,
) -> io::Result<()> {
    let Some(ordering) = ordering else {
        return writeln!(writer, "{}: none", kind.as_str());
    };
    let rendered: Vec<String> = ordering.iter().map(ToString::to_string).collect();
    writeln!(writer, "{}: {}", kind.as_str(), rendered.join(" "))
}
