//! Unit tests for argument parsing and the CLI commands.

use omosearch_core::{
    ConstraintError, DispatchError, Graph, GraphError, OrderingKind, SourceError,
    verify_ordering,
};
use omosearch_test_support::tracing::RecordingLayer;
use rstest::rstest;
use tracing_subscriber::layer::SubscriberExt;

use super::test_helpers::{parse, run, run_expecting_error, temp_dir, write_graph6_file};
use super::{CliError, Command, ExecutionSummary, Family, ProbeKind, render_ordering};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const K4_GRAPH6: &str = "C~";

fn graph6(vertex_count: usize, edges: &[(usize, usize)]) -> String {
    Graph::from_edges(vertex_count, edges.iter().copied())
        .expect("fixture edges must be valid")
        .to_graph6()
}

fn paw() -> String {
    graph6(4, &[(0, 1), (1, 2), (2, 0), (2, 3)])
}

#[test]
fn search_defaults() {
    let cli = parse(&["search"]);
    let Command::Search(search) = cli.command else {
        panic!("expected the search command");
    };
    assert_eq!(search.family, Family::All);
    assert_eq!(search.max_vertices, 8);
    assert_eq!(search.probe.probe, ProbeKind::Omo);
    assert_eq!(search.dispatch.batch_size, omosearch_core::DEFAULT_BATCH_SIZE);
    assert_eq!(search.constraint_spec(), omosearch_core::ConstraintSpec::all_graphs(8));
}

#[rstest]
#[case::cubic(&["search", "--family", "cubic", "--max-vertices", "8"], 4, Some(3), Some(3))]
#[case::bipartite_min(&["search", "--family", "bipartite", "--min-vertices", "5"], 5, None, None)]
#[case::degree_override(&["search", "--min-degree", "2", "--max-degree", "4"], 1, Some(2), Some(4))]
fn search_builds_constraint_spec(
    #[case] args: &[&str],
    #[case] min_vertices: usize,
    #[case] min_degree: Option<usize>,
    #[case] max_degree: Option<usize>,
) {
    let Command::Search(search) = parse(args).command else {
        panic!("expected the search command");
    };
    let spec = search.constraint_spec();
    assert_eq!(spec.min_vertices(), min_vertices);
    assert_eq!(spec.min_degree_bound(), min_degree);
    assert_eq!(spec.max_degree_bound(), max_degree);
}

#[rstest]
#[case::edges("edges", "\tn=4 {0-1, 0-2, 0-3, 1-2, 1-3, 2-3}\n")]
#[case::graph6("graph6", "\tC~\n")]
fn search_reports_k4_as_the_only_small_omo_counterexample(
    #[case] format: &str,
    #[case] expected: &str,
) -> TestResult {
    let (summary, out) = run(&["search", "--max-vertices", "4", "--workers", "2", "--format", format])?;
    assert_eq!(out, expected);
    let ExecutionSummary::Dispatch(summary) = summary else {
        panic!("search must return a dispatch summary");
    };
    assert_eq!(summary.evaluated, 10);
    assert_eq!(summary.counterexamples, 1);
    Ok(())
}

#[test]
fn search_min_odd_vertices_narrows_the_filter() -> TestResult {
    // K4 has four odd vertices, so requiring five filters it out.
    let (_, out) = run(&["search", "--max-vertices", "4", "--min-odd-vertices", "5"])?;
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn search_rejects_oversized_families() {
    let err = run_expecting_error(&["search", "--max-vertices", "40"], "40 vertices exceed the limit");
    assert!(matches!(err, CliError::Constraint(ConstraintError::TooManyVertices { .. })));
    assert_eq!(err.code(), Some("CONSTRAINT_TOO_MANY_VERTICES"));
}

#[test]
fn search_rejects_zero_workers() {
    let err = run_expecting_error(&["search", "--workers", "0"], "zero workers must fail");
    assert!(matches!(err, CliError::Dispatch(DispatchError::ZeroWorkers)));
    assert_eq!(err.code(), Some("DISPATCH_ZERO_WORKERS"));
}

#[test]
fn check_reports_counterexamples_from_a_file() -> TestResult {
    let dir = temp_dir();
    let path = write_graph6_file(&dir, "graphs.g6", &[K4_GRAPH6, &paw()])?;
    let path_arg = path.to_string_lossy().into_owned();
    let (summary, out) = run(&["check", &path_arg, "--format", "graph6"])?;
    assert_eq!(out, format!("\t{K4_GRAPH6}\n"));
    assert_eq!(
        summary,
        ExecutionSummary::Dispatch(omosearch_core::DispatchSummary {
            evaluated: 2,
            counterexamples: 1,
            cancelled: false,
        })
    );
    Ok(())
}

#[test]
fn check_even_bridges_probe() -> TestResult {
    let dir = temp_dir();
    let mut k4_pair: Vec<(usize, usize)> = vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
    let copy: Vec<_> = k4_pair.iter().map(|&(left, right)| (left + 4, right + 4)).collect();
    k4_pair.extend(copy);
    k4_pair.push((0, 4));
    let pair = graph6(8, &k4_pair);
    let path = write_graph6_file(&dir, "bridged.g6", &[&pair, &paw()])?;
    let path_arg = path.to_string_lossy().into_owned();
    let (_, out) = run(&["check", &path_arg, "--probe", "even-bridges", "--format", "graph6"])?;
    assert_eq!(out, format!("\t{pair}\n"));
    Ok(())
}

#[test]
fn check_surfaces_decode_errors_with_line_numbers() -> TestResult {
    let dir = temp_dir();
    let path = write_graph6_file(&dir, "broken.g6", &[K4_GRAPH6, "C"])?;
    let path_arg = path.to_string_lossy().into_owned();
    let err = run_expecting_error(&["check", &path_arg], "truncated graph6 must fail");
    assert!(matches!(
        err,
        CliError::Dispatch(DispatchError::Source {
            source: SourceError::Decode { line: 2, .. }
        })
    ));
    assert_eq!(err.code(), Some("SOURCE_DECODE"));
    Ok(())
}

#[test]
fn check_reports_missing_files() {
    let dir = temp_dir();
    let missing = dir.path().join("absent.g6").to_string_lossy().into_owned();
    let err = run_expecting_error(&["check", &missing], "missing input must fail");
    assert!(matches!(err, CliError::Io { .. }));
    assert_eq!(err.code(), None);
}

#[rstest]
#[case::paw_omo(paw(), "omo", true)]
#[case::k4_omo(K4_GRAPH6.to_owned(), "omo", false)]
#[case::square_omo(graph6(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]), "omo", false)]
#[case::square_oeo(graph6(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]), "oeo", true)]
fn order_prints_a_verified_witness(
    #[case] input: String,
    #[case] kind: &str,
    #[case] found: bool,
) -> TestResult {
    let (summary, out) = run(&["order", &input, "--kind", kind])?;
    let ExecutionSummary::Order { kind, ordering } = summary else {
        panic!("order must return an ordering summary");
    };
    assert_eq!(ordering.is_some(), found);
    match ordering {
        Some(ordering) => {
            let graph = Graph::from_graph6(&input)?;
            assert_eq!(verify_ordering(&graph, kind, &ordering), Ok(()));
            assert!(out.starts_with(&format!("{}: ", kind.as_str())));
        }
        None => assert_eq!(out, format!("{}: none\n", kind.as_str())),
    }
    Ok(())
}

#[test]
fn order_rejects_malformed_graph6() {
    let err = run_expecting_error(&["order", "~"], "a lone marker is not a graph");
    assert!(matches!(err, CliError::Graph(GraphError::MalformedGraph6 { .. })));
    assert_eq!(err.code(), Some("GRAPH_MALFORMED_GRAPH6"));
}

#[test]
fn render_ordering_joins_vertices() -> TestResult {
    let mut out = Vec::new();
    render_ordering(OrderingKind::Oeo, Some(&[2, 0, 1][..]), &mut out)?;
    assert_eq!(String::from_utf8(out)?, "oeo: 2 0 1\n");
    Ok(())
}

#[test]
fn run_span_records_the_command() -> TestResult {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, || run(&["order", K4_GRAPH6]))?;

    let run_span = layer.span("cli.run").expect("cli.run span must close");
    assert_eq!(run_span.field("command"), Some("order"));
    let order_span = layer.span("cli.order").expect("cli.order span must close");
    assert_eq!(order_span.field("kind"), Some("omo"));
    Ok(())
}

#[test]
fn search_span_records_family_and_probe() -> TestResult {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, || {
        run(&["search", "--family", "cubic", "--max-vertices", "6", "--probe", "oeo"])
    })?;

    let span = layer.span("cli.search").expect("cli.search span must close");
    assert_eq!(span.field("family"), Some("cubic"));
    assert_eq!(span.field("max_vertices"), Some("6"));
    assert_eq!(span.field("probe"), Some("oeo"));
    assert!(layer.span("core.dispatch").is_some());
    Ok(())
}
