//! Command-line interface for the oligo simulation.
//!
//! The `run` command loads a built-in or file-based graph, runs the
//! simulation once and renders a plain-text report.

mod commands;
mod graph_file;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, FileArgs, PresetArgs, PresetGraph, RunCommand,
    RunSource, render_summary, run_cli,
};
pub use graph_file::{GraphFileError, parse_graph};

#[cfg(test)]
mod tests;
