//! Unit tests for the CLI commands and graph file parsing.

use super::commands::{derive_graph_name, load_graph_file, run_command};
use super::{
    Cli, CliError, Command, ExecutionSummary, FileArgs, GraphFileError, PresetArgs, PresetGraph,
    RunCommand, RunSource, parse_graph, render_summary, run_cli,
};

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use oligo_core::{GraphError, OligoError, Outcome};
use rstest::rstest;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use oligo_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const LOVE_DNA: &str = include_str!("../../graphs/love_dna.txt");

fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

fn create_graph_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

fn run(source: RunSource, repetitions: usize, seed: u64) -> RunCommand {
    RunCommand {
        strand_length: 10,
        repetitions,
        seed: Some(seed),
        source,
    }
}

fn preset(preset: PresetGraph) -> RunSource {
    RunSource::Preset(PresetArgs { preset })
}

fn run_command_expecting_error(command: RunCommand, panic_msg: &str) -> CliError {
    match run_command(command) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

fn parse_expecting_error(contents: &str) -> GraphFileError {
    match parse_graph(contents.as_bytes()) {
        Ok(graph) => panic!("graph must be rejected: {graph:?}"),
        Err(err) => err,
    }
}

#[rstest]
#[case::stem_with_extension("/tmp/love_dna.txt", "love_dna")]
#[case::stem_without_extension("/tmp/chain", "chain")]
#[case::missing_stem("", "graph")]
fn derive_graph_name_uses_the_file_stem(#[case] raw_path: &str, #[case] expected: &str) {
    assert_eq!(derive_graph_name(Path::new(raw_path)), expected);
}

#[rstest]
fn shipped_graph_file_matches_the_preset() -> TestResult {
    let parsed = parse_graph(LOVE_DNA.as_bytes())?;
    let preset = oligo_core::GraphPreset::LoveDna.build()?;
    assert_eq!(parsed, preset);
    Ok(())
}

#[rstest]
fn parse_graph_skips_comments_and_blank_lines() -> TestResult {
    let graph = parse_graph("# header\n\n  A B  C # names\n0 1 # first\n\n1 2\n".as_bytes())?;
    let names: Vec<&str> = graph.vertex_names().iter().map(AsRef::as_ref).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert!(graph.has_edge(0, 1));
    assert!(graph.has_edge(1, 2));
    assert_eq!(graph.edges().len(), 2);
    Ok(())
}

#[rstest]
#[case::only_comments("# nothing here\n\n")]
#[case::empty("")]
fn parse_graph_requires_a_vertex_line(#[case] contents: &str) {
    let err = parse_expecting_error(contents);
    assert!(matches!(err, GraphFileError::MissingVertices));
}

#[rstest]
#[case::one_field("A B\n0\n", 2, "0")]
#[case::three_fields("A B\n\n0 1 1\n", 3, "0 1 1")]
fn parse_graph_rejects_malformed_edges(
    #[case] contents: &str,
    #[case] expected_line: usize,
    #[case] expected_content: &str,
) {
    match parse_expecting_error(contents) {
        GraphFileError::MalformedEdge { line, content } => {
            assert_eq!(line, expected_line);
            assert_eq!(content, expected_content);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
#[case::word("A B\n0 x\n", "x")]
#[case::negative("A B\n-1 0\n", "-1")]
fn parse_graph_rejects_bad_indices(#[case] contents: &str, #[case] expected: &str) {
    match parse_expecting_error(contents) {
        GraphFileError::InvalidIndex { line, value } => {
            assert_eq!(line, 2);
            assert_eq!(value, expected);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn parse_graph_surfaces_graph_validation() {
    let err = parse_expecting_error("A B\n0 5\n");
    assert!(matches!(
        err,
        GraphFileError::Graph(GraphError::EdgeOutOfRange {
            from: 0,
            to: 5,
            vertices: 2
        })
    ));
}

#[rstest]
fn run_preset_chain_finds_the_path() -> TestResult {
    let summary = run_command(run(preset(PresetGraph::Chain), 500, 42))?;
    assert_eq!(summary.graph_name, "chain");
    assert_eq!(summary.report.seed, Some(42));
    let path = summary
        .report
        .outcome
        .solution()
        .ok_or("chain must be solved")?;
    let names: Vec<&str> = path.names().iter().map(AsRef::as_ref).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    Ok(())
}

#[rstest]
fn run_preset_disconnected_reports_no_solution() -> TestResult {
    let summary = run_command(run(preset(PresetGraph::Disconnected), 100, 1))?;
    assert_eq!(summary.report.outcome, Outcome::NoSolution);
    Ok(())
}

#[rstest]
fn run_file_uses_the_parsed_graph() -> TestResult {
    let dir = temp_dir();
    let path = create_graph_file(&dir, "triple.txt", "X Y Z\n0 1\n1 2\n")?;
    let summary = run_cli(Cli {
        command: Command::Run(run(RunSource::File(FileArgs { path }), 500, 9)),
    })?;
    assert_eq!(summary.graph_name, "triple");
    assert_eq!(summary.graph.vertex_count(), 3);
    assert!(summary.report.outcome.solution().is_some());
    Ok(())
}

#[rstest]
fn run_file_reports_missing_files() {
    let dir = temp_dir();
    let path = dir.path().join("missing.txt");
    let err = run_command_expecting_error(
        run(RunSource::File(FileArgs { path: path.clone() }), 10, 1),
        "missing file must fail",
    );
    match err {
        CliError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn run_file_reports_invalid_graphs_with_their_code() -> TestResult {
    let dir = temp_dir();
    let path = create_graph_file(&dir, "dupes.txt", "A A\n0 1\n")?;
    let err = run_command_expecting_error(
        run(RunSource::File(FileArgs { path }), 10, 1),
        "duplicate vertex names must fail",
    );
    assert!(matches!(err, CliError::GraphFile { .. }));
    assert_eq!(err.codes(), (Some("GRAPH_DUPLICATE_VERTEX"), None));
    Ok(())
}

#[rstest]
#[case::odd_strand_length(9, 10, OligoError::InvalidStrandLength { got: 9 })]
#[case::zero_repetitions(10, 0, OligoError::InvalidRepetitions { got: 0 })]
fn run_command_rejects_invalid_configuration(
    #[case] strand_length: usize,
    #[case] repetitions: usize,
    #[case] expected: OligoError,
) {
    let command = RunCommand {
        strand_length,
        repetitions,
        seed: None,
        source: preset(PresetGraph::Chain),
    };
    let err = run_command_expecting_error(command, "invalid configuration must fail");
    let (code, source_code) = err.codes();
    assert!(matches!(&err, CliError::Core(core) if *core == expected));
    assert_eq!(code, Some(expected.code().as_str()));
    assert_eq!(source_code, None);
}

#[rstest]
fn render_summary_lists_every_stage() -> TestResult {
    let summary = run_command(run(preset(PresetGraph::Chain), 500, 42))?;
    let text = render(&summary)?;

    assert!(text.starts_with("graph: chain (3 vertices, 2 edges)\n"));
    assert!(text.contains("seed: 42\n"));
    assert!(text.contains("strand length: 10\n"));
    for vertex in ["A", "B", "C"] {
        assert!(text.contains(&format!("  {vertex}\t")));
    }
    assert!(text.contains("  A -> B\t"));
    assert!(text.contains("  B -> C\t"));
    assert!(text.contains("assembly: pool 1000, "));
    assert!(text.contains("includes A: "));
    assert!(
        text.lines()
            .filter(|line| line.ends_with("(already checked)"))
            .count()
            == 2
    );
    assert!(text.ends_with("solution: A -> B -> C (hamiltonian: true)\n"));
    Ok(())
}

#[rstest]
fn render_summary_reports_missing_solutions() -> TestResult {
    let summary = run_command(run(preset(PresetGraph::Disconnected), 50, 3))?;
    let text = render(&summary)?;
    assert!(text.contains("candidates: 0\n"));
    assert!(text.ends_with("no solution found\n"));
    Ok(())
}

fn render(summary: &ExecutionSummary) -> Result<String, Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    render_summary(summary, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[rstest]
fn clap_parses_run_flags() -> TestResult {
    let cli = Cli::try_parse_from([
        "oligo",
        "run",
        "--strand-length",
        "6",
        "--repetitions",
        "25",
        "--seed",
        "7",
        "preset",
        "love-dna",
    ])?;
    let Command::Run(command) = cli.command;
    assert_eq!(command.strand_length, 6);
    assert_eq!(command.repetitions, 25);
    assert_eq!(command.seed, Some(7));
    assert!(matches!(
        command.source,
        RunSource::Preset(PresetArgs {
            preset: PresetGraph::LoveDna
        })
    ));
    Ok(())
}

#[rstest]
fn clap_applies_defaults() -> TestResult {
    let cli = Cli::try_parse_from(["oligo", "run", "file", "graph.txt"])?;
    let Command::Run(command) = cli.command;
    assert_eq!(command.strand_length, oligo_core::DEFAULT_STRAND_LENGTH);
    assert_eq!(command.repetitions, oligo_core::DEFAULT_REPETITIONS);
    assert_eq!(command.seed, None);
    assert!(matches!(command.source, RunSource::File(FileArgs { ref path }) if path == Path::new("graph.txt")));
    Ok(())
}

#[rstest]
#[case::unknown_preset(&["oligo", "run", "preset", "petersen"])]
#[case::negative_seed(&["oligo", "run", "--seed", "-1", "preset", "chain"])]
#[case::missing_source(&["oligo", "run"])]
fn clap_rejects_bad_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[rstest]
fn run_command_emits_tracing_fields() -> TestResult {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let command = run(preset(PresetGraph::Chain), 300, 5);
    let summary = tracing::subscriber::with_default(subscriber, || run_command(command))?;
    assert!(summary.report.outcome.solution().is_some());

    let execute = layer
        .span("cli.execute")
        .ok_or("cli.execute span must exist")?;
    assert_eq!(execute.field("strand_length"), Some("10"));
    assert_eq!(execute.field("repetitions"), Some("300"));
    assert_eq!(execute.field("seed"), Some("5"));
    assert_eq!(execute.field("source"), Some("preset"));
    assert!(layer.span("core.run").is_some());

    assert!(
        layer
            .events_with_message("command completed")
            .iter()
            .any(|event| event.level == Level::INFO
                && event.field("graph") == Some("chain")
                && event.field("solved") == Some("true"))
    );
    Ok(())
}

#[rstest]
fn load_graph_file_records_path() -> TestResult {
    let dir = temp_dir();
    let path = create_graph_file(&dir, "love.txt", LOVE_DNA)?;
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let graph = tracing::subscriber::with_default(subscriber, || load_graph_file(&path))?;
    assert_eq!(graph.vertex_count(), 8);

    let span = layer
        .span("cli.load_graph_file")
        .ok_or("cli.load_graph_file span must exist")?;
    assert!(span.field("path").is_some_and(|value| value.ends_with("love.txt")));
    let loaded = layer.events_with_message("graph file loaded");
    assert_eq!(loaded.first().and_then(|event| event.count("edges")), Some(13));
    Ok(())
}
