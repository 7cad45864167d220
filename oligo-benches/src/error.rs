//! Benchmark setup error type.

use oligo_core::{GraphError, OligoError};

use crate::graphs::SyntheticGraphError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation was misconfigured.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticGraphError),
    /// A generated or preset graph failed validation.
    #[error("graph validation failed: {0}")]
    Graph(#[from] GraphError),
    /// Simulation configuration or execution failed.
    #[error("simulation failed: {0}")]
    Simulation(#[from] OligoError),
}
