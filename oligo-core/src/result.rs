//! Result types for simulation runs.

use crate::{
    assembler::AssemblyStats, decoder::SolutionPath, encoder::Encoding,
    selection::SelectionReport,
};

/// Terminal outcome of a run.
///
/// An empty selection is an ordinary outcome and is reported as
/// [`Outcome::NoSolution`] rather than as an error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The first surviving candidate decoded into a path.
    Solved(SolutionPath),
    /// No candidate survived selection.
    NoSolution,
}

impl Outcome {
    /// Returns the decoded path, if any.
    #[must_use]
    pub fn solution(&self) -> Option<&SolutionPath> {
        match self {
            Self::Solved(path) => Some(path),
            Self::NoSolution => None,
        }
    }
}

/// Everything a [`crate::Simulation`] run produced, stage by stage.
///
/// # Examples
/// ```
/// use oligo_core::{GraphPreset, SimulationBuilder};
///
/// let graph = GraphPreset::Chain.build().expect("preset is valid");
/// let report = SimulationBuilder::new()
///     .with_repetitions(200)
///     .with_seed(3)
///     .build()
///     .expect("configuration is valid")
///     .run(&graph)
///     .expect("run must succeed");
/// assert_eq!(report.seed, Some(3));
/// assert!(report.outcome.solution().is_some());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimulationReport {
    /// Seed the run was driven by, when it is known.
    pub seed: Option<u64>,
    /// Vertex, edge and complement strands used by the run.
    pub encoding: Encoding,
    /// Counters from the assembly stage.
    pub assembly: AssemblyStats,
    /// Survivor counts from every selection stage.
    pub selection: SelectionReport,
    /// Decoded path or the absence of one.
    pub outcome: Outcome,
}
