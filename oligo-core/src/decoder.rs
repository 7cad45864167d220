//! Translation of a surviving candidate back into vertex names.

use std::{collections::HashMap, sync::Arc};

use tracing::instrument;

use crate::{alphabet::Strand, encoder::Encoding, error::DecodeError, graph::Graph};

/// Ordered vertices read off a decoded candidate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SolutionPath {
    vertices: Vec<usize>,
    names: Vec<Arc<str>>,
}

impl SolutionPath {
    /// Vertex indices in path order.
    #[must_use]
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Vertex names in path order.
    #[must_use]
    pub fn names(&self) -> &[Arc<str>] {
        &self.names
    }

    /// Number of vertices on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` for a path without vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Maps strand-width chunks of a candidate to vertices.
#[derive(Clone, Debug)]
pub struct Decoder<'a> {
    graph: &'a Graph,
    strand_length: usize,
    lookup: HashMap<&'a str, usize>,
}

impl<'a> Decoder<'a> {
    /// Builds the chunk lookup for `encoding`. When two vertices share a
    /// strand the lower index wins.
    #[must_use]
    pub fn new(graph: &'a Graph, encoding: &'a Encoding) -> Self {
        let mut lookup = HashMap::with_capacity(encoding.vertex_strands().len());
        for (vertex, strand) in encoding.vertex_strands().iter().enumerate() {
            lookup.entry(strand.as_str()).or_insert(vertex);
        }
        Self {
            graph,
            strand_length: encoding.strand_length(),
            lookup,
        }
    }

    /// Splits `candidate` into strand-width chunks and maps each one to its
    /// vertex.
    ///
    /// # Errors
    /// Returns [`DecodeError::RaggedLength`] when the candidate is empty or
    /// not a whole number of strands and [`DecodeError::NoExactMatch`] when a
    /// chunk equals no vertex strand.
    ///
    /// # Examples
    /// ```
    /// use oligo_core::{Decoder, Encoding, GraphPreset};
    ///
    /// let graph = GraphPreset::Chain.build().expect("preset is valid");
    /// let encoding = Encoding::from_vertex_strands(&graph, 2, ["AC", "GT", "CA"])
    ///     .expect("strands are valid");
    /// let path = Decoder::new(&graph, &encoding)
    ///     .decode(&encoding.path_strand(&[0, 1, 2]))
    ///     .expect("candidate decodes");
    /// let names: Vec<&str> = path.names().iter().map(AsRef::as_ref).collect();
    /// assert_eq!(names, ["A", "B", "C"]);
    /// ```
    #[instrument(name = "core.decode", err, skip(self, candidate), fields(length = candidate.len()))]
    pub fn decode(&self, candidate: &Strand) -> Result<SolutionPath, DecodeError> {
        if candidate.is_empty() || !candidate.len().is_multiple_of(self.strand_length) {
            return Err(DecodeError::RaggedLength {
                length: candidate.len(),
                strand_length: self.strand_length,
            });
        }

        let vertices = candidate
            .chunks(self.strand_length)
            .enumerate()
            .map(|(chunk_index, chunk)| {
                self.lookup
                    .get(chunk)
                    .copied()
                    .ok_or_else(|| DecodeError::NoExactMatch {
                        chunk_index,
                        chunk: Arc::from(chunk),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let names = vertices
            .iter()
            .filter_map(|&vertex| self.graph.vertex_names().get(vertex).cloned())
            .collect();
        Ok(SolutionPath { vertices, names })
    }
}
