//! Command implementations and argument parsing for the oligo CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use oligo_core::{
    DEFAULT_REPETITIONS, DEFAULT_STRAND_LENGTH, Graph, GraphPreset, OligoError, Outcome,
    SimulationBuilder, SimulationReport,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::graph_file::{GraphFileError, parse_graph};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "oligo",
    about = "Search a directed graph for a Hamiltonian path by simulated strand assembly."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Encode, assemble, select and decode once.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Length of every vertex strand; must be positive and even.
    #[arg(long = "strand-length", default_value_t = DEFAULT_STRAND_LENGTH)]
    pub strand_length: usize,

    /// Copies of each edge strand placed in the assembly pool.
    #[arg(long, default_value_t = DEFAULT_REPETITIONS)]
    pub repetitions: usize,

    /// Seed for every random choice; drawn at random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Graph to search.
    #[command(subcommand)]
    pub source: RunSource,
}

/// Where the graph comes from.
#[derive(Debug, Subcommand, Clone)]
pub enum RunSource {
    /// Use one of the built-in graphs.
    Preset(PresetArgs),
    /// Read a graph file.
    File(FileArgs),
}

/// Built-in graph selection.
#[derive(Debug, Args, Clone)]
pub struct PresetArgs {
    /// Graph to run against.
    #[arg(value_enum)]
    pub preset: PresetGraph,
}

/// Graph file arguments.
#[derive(Debug, Args, Clone)]
pub struct FileArgs {
    /// Path to a graph file: vertex names on the first line, then one
    /// `FROM TO` edge per line.
    pub path: PathBuf,
}

/// Built-in graphs exposed on the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum PresetGraph {
    /// Eight vertices whose only Hamiltonian path spells `ILOVEDNA`.
    LoveDna,
    /// `A -> B -> C`.
    Chain,
    /// Three vertices where the end vertex is unreachable.
    Disconnected,
}

impl PresetGraph {
    const fn label(self) -> &'static str {
        match self {
            Self::LoveDna => "love-dna",
            Self::Chain => "chain",
            Self::Disconnected => "disconnected",
        }
    }
}

impl From<PresetGraph> for GraphPreset {
    fn from(preset: PresetGraph) -> Self {
        match preset {
            PresetGraph::LoveDna => Self::LoveDna,
            PresetGraph::Chain => Self::Chain,
            PresetGraph::Disconnected => Self::Disconnected,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A graph file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A graph file could not be parsed.
    #[error("invalid graph file `{path}`: {source}")]
    GraphFile {
        /// Path of the rejected file.
        path: PathBuf,
        /// Parse or validation failure.
        #[source]
        source: GraphFileError,
    },
    /// Configuration or the simulation itself failed.
    #[error(transparent)]
    Core(#[from] OligoError),
}

impl CliError {
    /// Stable code of the underlying core error, when there is one, paired
    /// with the code of the stage error it wraps.
    #[must_use]
    pub fn codes(&self) -> (Option<&'static str>, Option<&'static str>) {
        match self {
            Self::Core(core) => (Some(core.code().as_str()), core.source_code()),
            Self::GraphFile {
                source: GraphFileError::Graph(graph),
                ..
            } => (Some(graph.code().as_str()), None),
            _ => (None, None),
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Preset label or file stem identifying the graph.
    pub graph_name: String,
    /// The graph that was searched.
    pub graph: Graph,
    /// Everything the run produced.
    pub report: SimulationReport,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the graph cannot be loaded or the run fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use oligo_cli::cli::{Cli, Command, PresetArgs, PresetGraph, RunCommand, RunSource, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         strand_length: 10,
///         repetitions: 200,
///         seed: Some(4),
///         source: RunSource::Preset(PresetArgs {
///             preset: PresetGraph::Chain,
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.report.seed, Some(4));
/// assert!(summary.report.outcome.solution().is_some());
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        strand_length = command.strand_length,
        repetitions = command.repetitions,
        seed = field::Empty,
        source = field::Empty
    ),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let simulation = SimulationBuilder::new()
        .with_strand_length(command.strand_length)
        .with_repetitions(command.repetitions)
        .with_optional_seed(command.seed)
        .build()?;

    let span = Span::current();
    let (graph_name, graph) = match command.source {
        RunSource::Preset(PresetArgs { preset }) => {
            span.record("source", field::display("preset"));
            (
                preset.label().to_owned(),
                GraphPreset::from(preset).build().map_err(OligoError::from)?,
            )
        }
        RunSource::File(FileArgs { path }) => {
            span.record("source", field::display("file"));
            (derive_graph_name(&path), load_graph_file(&path)?)
        }
    };

    let report = simulation.run(&graph)?;
    if let Some(seed) = report.seed {
        span.record("seed", seed);
    }

    info!(
        graph = graph_name.as_str(),
        survivors = report.selection.survivors.len(),
        solved = report.outcome.solution().is_some(),
        "command completed"
    );
    Ok(ExecutionSummary {
        graph_name,
        graph,
        report,
    })
}

#[instrument(name = "cli.load_graph_file", err, skip(path), fields(path = %path.display()))]
pub(super) fn load_graph_file(path: &Path) -> Result<Graph, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = parse_graph(BufReader::new(file)).map_err(|source| CliError::GraphFile {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        vertices = graph.vertex_count(),
        edges = graph.edges().len(),
        "graph file loaded"
    );
    Ok(graph)
}

pub(super) fn derive_graph_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "graph".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let ExecutionSummary {
        graph_name,
        graph,
        report,
    } = summary;
    let name = |vertex: usize| graph.vertex_name(vertex).unwrap_or("?");

    writeln!(
        writer,
        "graph: {graph_name} ({} vertices, {} edges)",
        graph.vertex_count(),
        graph.edges().len()
    )?;
    match report.seed {
        Some(seed) => writeln!(writer, "seed: {seed}")?,
        None => writeln!(writer, "seed: external")?,
    }
    writeln!(writer, "strand length: {}", report.encoding.strand_length())?;

    writeln!(writer, "vertex strands:")?;
    for (vertex, strand) in report.encoding.vertex_strands().iter().enumerate() {
        writeln!(writer, "  {}\t{strand}", name(vertex))?;
    }
    writeln!(writer, "edge strands:")?;
    for (edge, strand) in graph.edges().iter().zip(report.encoding.edge_strands()) {
        writeln!(writer, "  {} -> {}\t{strand}", name(edge.from), name(edge.to))?;
    }

    let assembly = &report.assembly;
    writeln!(
        writer,
        "assembly: pool {}, seeded {}, ligated {}, rejected {}",
        assembly.pool_size, assembly.seeded, assembly.ligated, assembly.rejected
    )?;

    let selection = &report.selection;
    writeln!(writer, "candidates: {}", selection.assembled)?;
    writeln!(writer, "correct start and end: {}", selection.after_primer)?;
    writeln!(writer, "correct length: {}", selection.after_length)?;
    for step in &selection.inclusion {
        let note = if step.already_guaranteed {
            " (already checked)"
        } else {
            ""
        };
        writeln!(
            writer,
            "includes {}: {}{note}",
            name(step.vertex),
            step.remaining
        )?;
    }

    match &report.outcome {
        Outcome::Solved(path) => writeln!(
            writer,
            "solution: {} (hamiltonian: {})",
            path.names().join(" -> "),
            graph.is_hamiltonian_path(path.vertices())
        ),
        Outcome::NoSolution => writeln!(writer, "no solution found"),
    }
}
