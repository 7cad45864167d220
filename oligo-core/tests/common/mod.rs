//! Helpers shared by the simulation integration tests.
#![allow(dead_code, reason = "each test binary uses a subset of the helpers")]

use oligo_core::{Graph, GraphPreset, Outcome, Simulation, SimulationBuilder, SolutionPath};

pub fn preset(preset: GraphPreset) -> Graph {
    preset.build().expect("presets are valid")
}

pub fn seeded(repetitions: usize, seed: u64) -> Simulation {
    SimulationBuilder::new()
        .with_repetitions(repetitions)
        .with_seed(seed)
        .build()
        .expect("configuration must be valid")
}

pub fn names(path: &SolutionPath) -> Vec<&str> {
    path.names().iter().map(AsRef::as_ref).collect()
}

#[must_use]
pub fn expect_solved(outcome: &Outcome) -> &SolutionPath {
    match outcome {
        Outcome::Solved(path) => path,
        Outcome::NoSolution => panic!("expected a decoded solution"),
    }
}
