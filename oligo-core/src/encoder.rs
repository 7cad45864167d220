//! Strand encoding of a graph.
//!
//! Every vertex receives a random strand of `K` symbols. Every edge is
//! encoded as the trailing half of its source strand followed by the leading
//! half of its destination strand, except that an edge leaving the start
//! vertex carries the whole start strand and an edge entering the end vertex
//! carries the whole end strand. Interior edges are therefore `K` symbols
//! long, edges touching one boundary are `3K/2` long and a direct start to
//! end edge is `2K` long. A strand assembled from the start vertex to the end
//! vertex through `V` vertices thus spans exactly `V * K` symbols.
//!
//! Vertex strands are not forced to be distinct. For practical `K` a
//! collision is astronomically unlikely; when one happens it is reported
//! with a warning and decoding may then pick the wrong vertex.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use tracing::{instrument, warn};

use crate::{
    alphabet::Strand,
    error::SequenceError,
    graph::{Edge, Graph},
};

/// Vertex strands, edge strands and the complement lookup table of a graph.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Encoding {
    strand_length: usize,
    vertex_strands: Vec<Strand>,
    edge_strands: Vec<Strand>,
    complements: HashSet<Strand>,
}

impl Encoding {
    /// Builds an encoding from explicit vertex strands.
    ///
    /// Edge strands and complements are derived exactly as [`Encoder::encode`]
    /// derives them, so callers can pin the vertex strands and still exercise
    /// the rest of the pipeline.
    ///
    /// # Errors
    /// Returns [`SequenceError::InvalidStrandLength`] when `strand_length` is
    /// zero or odd, [`SequenceError::CountMismatch`] when the number of strands
    /// differs from the vertex count, [`SequenceError::WrongLength`] when a
    /// strand is not `strand_length` long and [`SequenceError::InvalidSymbol`]
    /// when a strand contains a foreign symbol.
    ///
    /// # Examples
    /// ```
    /// use oligo_core::{Encoding, Graph};
    ///
    /// let graph = Graph::new(["A", "B"], [(0, 1)]).expect("graph is valid");
    /// let encoding = Encoding::from_vertex_strands(&graph, 4, ["AACC", "GGTT"])
    ///     .expect("strands are valid");
    /// assert_eq!(encoding.edge_strands()[0].as_str(), "AACCGGTT");
    /// ```
    pub fn from_vertex_strands<S: AsRef<str>>(
        graph: &Graph,
        strand_length: usize,
        vertex_strands: impl IntoIterator<Item = S>,
    ) -> Result<Self, SequenceError> {
        check_strand_length(strand_length)?;
        let vertex_strands = vertex_strands
            .into_iter()
            .enumerate()
            .map(|(vertex, raw)| {
                let strand = Strand::parse(raw.as_ref())?;
                if strand.len() == strand_length {
                    Ok(strand)
                } else {
                    Err(SequenceError::WrongLength {
                        vertex,
                        got: strand.len(),
                        expected: strand_length,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        if vertex_strands.len() != graph.vertex_count() {
            return Err(SequenceError::CountMismatch {
                got: vertex_strands.len(),
                expected: graph.vertex_count(),
            });
        }
        Ok(Self::assemble_tables(graph, strand_length, vertex_strands))
    }

    fn assemble_tables(graph: &Graph, strand_length: usize, vertex_strands: Vec<Strand>) -> Self {
        let edge_strands = graph
            .edges()
            .iter()
            .map(|edge| edge_strand(graph, &vertex_strands, strand_length, *edge))
            .collect();
        let complements = vertex_strands.iter().map(Strand::complement).collect();
        report_collisions(graph, &vertex_strands);
        Self {
            strand_length,
            vertex_strands,
            edge_strands,
            complements,
        }
    }

    /// Strand length `K`.
    #[must_use]
    pub fn strand_length(&self) -> usize {
        self.strand_length
    }

    /// Half strand length `K / 2`, the overlap used when binding.
    #[must_use]
    pub fn half_length(&self) -> usize {
        self.strand_length >> 1
    }

    /// One strand per vertex, in vertex order.
    #[must_use]
    pub fn vertex_strands(&self) -> &[Strand] {
        &self.vertex_strands
    }

    /// One strand per edge, in edge order.
    #[must_use]
    pub fn edge_strands(&self) -> &[Strand] {
        &self.edge_strands
    }

    /// Set of vertex strand complements used by the binding test.
    #[must_use]
    pub fn complements(&self) -> &HashSet<Strand> {
        &self.complements
    }

    /// Strand of the start vertex.
    #[must_use]
    pub fn start_strand(&self) -> Option<&Strand> {
        self.vertex_strands.first()
    }

    /// Strand of the end vertex.
    #[must_use]
    pub fn end_strand(&self) -> Option<&Strand> {
        self.vertex_strands.last()
    }

    /// Concatenates the vertex strands along `path`, producing the strand a
    /// perfect assembly of that path would yield. Unknown indices are skipped.
    #[must_use]
    pub fn path_strand(&self, path: &[usize]) -> Strand {
        Strand::concat(
            path.iter()
                .filter_map(|&vertex| self.vertex_strands.get(vertex))
                .map(Strand::as_str),
        )
    }
}

/// Draws random vertex strands and derives the edge strands of a graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Encoder {
    strand_length: usize,
}

impl Encoder {
    /// Creates an encoder for strands of `strand_length` symbols.
    ///
    /// # Errors
    /// Returns [`SequenceError::InvalidStrandLength`] when `strand_length` is
    /// zero or odd; edge strands are built from vertex halves.
    pub const fn new(strand_length: usize) -> Result<Self, SequenceError> {
        match check_strand_length(strand_length) {
            Ok(()) => Ok(Self { strand_length }),
            Err(err) => Err(err),
        }
    }

    /// Encodes `graph`, consuming randomness from `rng`.
    ///
    /// # Examples
    /// ```
    /// use oligo_core::{Encoder, GraphPreset};
    /// use rand::{SeedableRng, rngs::SmallRng};
    ///
    /// let graph = GraphPreset::Chain.build().expect("preset is valid");
    /// let mut rng = SmallRng::seed_from_u64(7);
    /// let encoder = Encoder::new(10).expect("strand length is valid");
    /// let encoding = encoder.encode(&graph, &mut rng);
    /// assert_eq!(encoding.vertex_strands().len(), 3);
    /// assert_eq!(encoding.edge_strands().len(), 2);
    /// ```
    #[instrument(
        name = "core.encode",
        skip(self, graph, rng),
        fields(
            vertices = graph.vertex_count(),
            edges = graph.edges().len(),
            strand_length = self.strand_length
        ),
    )]
    pub fn encode<R: Rng + ?Sized>(&self, graph: &Graph, rng: &mut R) -> Encoding {
        let vertex_strands = (0..graph.vertex_count())
            .map(|_| Strand::random(self.strand_length, rng))
            .collect();
        Encoding::assemble_tables(graph, self.strand_length, vertex_strands)
    }
}

/// Accepts positive even strand lengths.
pub(crate) const fn check_strand_length(strand_length: usize) -> Result<(), SequenceError> {
    if strand_length == 0 || !strand_length.is_multiple_of(2) {
        return Err(SequenceError::InvalidStrandLength { got: strand_length });
    }
    Ok(())
}

fn edge_strand(graph: &Graph, vertex_strands: &[Strand], strand_length: usize, edge: Edge) -> Strand {
    let half = strand_length >> 1;
    let head = vertex_strands.get(edge.from).and_then(|strand| {
        if edge.from == graph.start() {
            Some(strand.as_str())
        } else {
            strand.suffix(half)
        }
    });
    let tail = vertex_strands.get(edge.to).and_then(|strand| {
        if edge.to == graph.end() {
            Some(strand.as_str())
        } else {
            strand.prefix(half)
        }
    });
    Strand::concat(head.into_iter().chain(tail))
}

fn report_collisions(graph: &Graph, vertex_strands: &[Strand]) {
    let mut first_owner: HashMap<&Strand, usize> = HashMap::with_capacity(vertex_strands.len());
    for (vertex, strand) in vertex_strands.iter().enumerate() {
        if let Some(&owner) = first_owner.get(strand) {
            warn!(
                first = graph.vertex_name(owner).unwrap_or_default(),
                second = graph.vertex_name(vertex).unwrap_or_default(),
                strand = %strand,
                "vertex strands collide; decoding may resolve to the wrong vertex"
            );
        } else {
            first_owner.insert(strand, vertex);
        }
    }
}
