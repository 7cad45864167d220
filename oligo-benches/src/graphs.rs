//! Seeded synthetic graphs with a planted Hamiltonian path.
//!
//! Vertices are named `v0`, `v1` and so on. The path `v0 -> v1 -> ... ->
//! vN-1` is always present; extra edges are drawn uniformly between distinct
//! vertices, so the planted path is a solution but not necessarily the only
//! one.

use oligo_core::Graph;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Errors that may occur during synthetic graph configuration.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticGraphError {
    /// A planted path needs a start and an end vertex.
    #[error("synthetic graphs need at least two vertices (got {got})")]
    TooFewVertices {
        /// Requested vertex count.
        got: usize,
    },
}

/// Configuration for [`planted_path_graph`].
#[derive(Clone, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of vertices.
    pub vertices: usize,
    /// Random edges added on top of the planted path.
    pub extra_edges: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Generates a graph whose vertex order is a Hamiltonian path.
///
/// # Errors
/// Returns [`SyntheticGraphError::TooFewVertices`] for fewer than two
/// vertices.
///
/// # Examples
/// ```
/// use oligo_benches::graphs::{SyntheticGraphConfig, planted_path_graph};
///
/// let config = SyntheticGraphConfig { vertices: 5, extra_edges: 3, seed: 1 };
/// let graph = planted_path_graph(&config).expect("valid config");
/// assert_eq!(graph.edges().len(), 7);
/// assert!(graph.is_hamiltonian_path(&[0, 1, 2, 3, 4]));
/// ```
pub fn planted_path_graph(config: &SyntheticGraphConfig) -> Result<Graph, BenchSetupError> {
    let vertices = config.vertices;
    if vertices < 2 {
        return Err(SyntheticGraphError::TooFewVertices { got: vertices }.into());
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let names = (0..vertices).map(|index| format!("v{index}"));
    let planted = (1..vertices).map(|to| (to - 1, to));
    let extra: Vec<(usize, usize)> = (0..config.extra_edges)
        .map(|_| {
            let from = rng.gen_range(0..vertices);
            let to = from + rng.gen_range(1..vertices);
            (from, if to >= vertices { to - vertices } else { to })
        })
        .collect();

    Ok(Graph::new(names, planted.chain(extra))?)
}
