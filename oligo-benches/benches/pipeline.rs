//! End-to-end simulation benchmarks over synthetic graphs.
//!
//! Each graph carries a planted Hamiltonian path plus random extra edges.
//! The whole run is timed: encoding, assembly, selection and decoding.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use oligo_benches::{
    error::BenchSetupError,
    graphs::{SyntheticGraphConfig, planted_path_graph},
    params::PipelineBenchParams,
};
use oligo_core::SimulationBuilder;

/// Seed used for graph generation and every run.
const SEED: u64 = 7;

/// Repetition factor for every run.
const REPETITIONS: usize = 1_000;

/// `(vertices, extra_edges)` pairs to benchmark.
const SHAPES: &[(usize, usize)] = &[(4, 4), (8, 12), (16, 32)];

fn pipeline_run_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let simulation = SimulationBuilder::new()
        .with_repetitions(REPETITIONS)
        .with_seed(SEED)
        .build()?;

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);

    for &(vertices, extra_edges) in SHAPES {
        let graph = planted_path_graph(&SyntheticGraphConfig {
            vertices,
            extra_edges,
            seed: SEED,
        })?;
        let params = PipelineBenchParams {
            vertices,
            extra_edges,
        };
        group.bench_with_input(BenchmarkId::from_parameter(&params), &graph, |b, graph| {
            b.iter(|| simulation.run(graph));
        });
    }

    group.finish();
    Ok(())
}

fn pipeline_run(c: &mut Criterion) {
    if let Err(err) = pipeline_run_impl(c) {
        panic!("pipeline benchmark setup failed: {err}");
    }
}

criterion_group!(benches, pipeline_run);
criterion_main!(benches);
