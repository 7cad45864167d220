//! Benchmark support crate for oligo.
//!
//! Provides seeded synthetic graphs and parameter types used by the
//! Criterion benchmarks for strand assembly and the full pipeline.

pub mod error;
pub mod graphs;
pub mod params;
