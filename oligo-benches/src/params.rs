//! Benchmark parameter types.
//!
//! Each type renders as the Criterion benchmark id.

use std::fmt;

/// Parameters for an assembly benchmark run.
#[derive(Clone, Debug)]
pub struct AssemblyBenchParams {
    /// Copies of each edge strand in the pool.
    pub repetitions: usize,
    /// Length of every vertex strand.
    pub strand_length: usize,
}

impl fmt::Display for AssemblyBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R={},K={}", self.repetitions, self.strand_length)
    }
}

/// Parameters for a full pipeline run over a synthetic graph.
#[derive(Clone, Debug)]
pub struct PipelineBenchParams {
    /// Vertices in the synthetic graph.
    pub vertices: usize,
    /// Edges added on top of the planted path.
    pub extra_edges: usize,
}

impl fmt::Display for PipelineBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V={},extra={}", self.vertices, self.extra_edges)
    }
}
