//! Oligo core library.
//!
//! Simulates Adleman's DNA computation of a Hamiltonian path over symbolic
//! strands: vertices and edges are encoded as strands, edge strands are
//! ligated at random into candidate paths, and the candidates are filtered
//! by primer, length and per-vertex inclusion before the survivor is
//! decoded back into vertex names.

mod alphabet;
mod assembler;
mod builder;
mod decoder;
mod encoder;
mod error;
mod graph;
mod result;
mod selection;
mod simulation;

pub use crate::{
    alphabet::{Nucleotide, Strand, complement},
    assembler::{Assembler, Assembly, AssemblyStats, Attempt, Step, StrandState},
    builder::{DEFAULT_REPETITIONS, DEFAULT_STRAND_LENGTH, SimulationBuilder},
    decoder::{Decoder, SolutionPath},
    encoder::{Encoder, Encoding},
    error::{
        DecodeError, DecodeErrorCode, GraphError, GraphErrorCode, OligoError, OligoErrorCode,
        Result, SequenceError, SequenceErrorCode,
    },
    graph::{Edge, Graph, GraphPreset},
    result::{Outcome, SimulationReport},
    selection::{
        InclusionStep, SelectionPipeline, SelectionReport, inclusion_filter, length_filter,
        primer_filter,
    },
    simulation::Simulation,
};
