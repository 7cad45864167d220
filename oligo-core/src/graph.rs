//! Directed graph model consumed by the encoder.
//!
//! Vertex order is significant: index `0` is the start vertex and the last
//! index is the end vertex of every Hamiltonian path the simulation looks
//! for.

use std::{collections::HashSet, sync::Arc};

use crate::error::GraphError;

/// A directed edge between two vertex indices.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    /// Index of the source vertex.
    pub from: usize,
    /// Index of the destination vertex.
    pub to: usize,
}

impl Edge {
    /// Creates an edge from `from` to `to`.
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl From<(usize, usize)> for Edge {
    fn from((from, to): (usize, usize)) -> Self {
        Self::new(from, to)
    }
}

/// Validated directed graph with named vertices.
///
/// Multi-edges, back-edges and self-loops are accepted.
///
/// # Examples
/// ```
/// use oligo_core::Graph;
///
/// let graph = Graph::new(["A", "B", "C"], [(0, 1), (1, 2)]).expect("graph is valid");
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.end(), 2);
/// assert!(graph.is_hamiltonian_path(&[0, 1, 2]));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Graph {
    vertex_names: Vec<Arc<str>>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Validates and builds a graph.
    ///
    /// # Errors
    /// Returns [`GraphError::Empty`] without vertices,
    /// [`GraphError::BlankVertexName`] for a blank name,
    /// [`GraphError::DuplicateVertex`] when a name repeats and
    /// [`GraphError::EdgeOutOfRange`] when an edge references a missing vertex.
    pub fn new<N, E>(
        vertex_names: impl IntoIterator<Item = N>,
        edges: impl IntoIterator<Item = E>,
    ) -> Result<Self, GraphError>
    where
        N: AsRef<str>,
        E: Into<Edge>,
    {
        let vertex_names: Vec<Arc<str>> = vertex_names
            .into_iter()
            .map(|name| Arc::from(name.as_ref().trim()))
            .collect();
        if vertex_names.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut seen = HashSet::with_capacity(vertex_names.len());
        for (index, name) in vertex_names.iter().enumerate() {
            if name.is_empty() {
                return Err(GraphError::BlankVertexName { index });
            }
            if !seen.insert(name.clone()) {
                return Err(GraphError::DuplicateVertex { name: name.clone() });
            }
        }

        let vertices = vertex_names.len();
        let edges: Vec<Edge> = edges.into_iter().map(Into::into).collect();
        if let Some(edge) = edges
            .iter()
            .find(|edge| edge.from >= vertices || edge.to >= vertices)
        {
            return Err(GraphError::EdgeOutOfRange {
                from: edge.from,
                to: edge.to,
                vertices,
            });
        }

        Ok(Self {
            vertex_names,
            edges,
        })
    }

    /// Vertex names in index order.
    #[must_use]
    pub fn vertex_names(&self) -> &[Arc<str>] {
        &self.vertex_names
    }

    /// Name of the vertex at `index`.
    #[must_use]
    pub fn vertex_name(&self, index: usize) -> Option<&str> {
        self.vertex_names.get(index).map(AsRef::as_ref)
    }

    /// Edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of vertices (`V`).
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_names.len()
    }

    /// Index of the designated start vertex.
    #[must_use]
    pub const fn start(&self) -> usize {
        0
    }

    /// Index of the designated end vertex.
    #[must_use]
    pub fn end(&self) -> usize {
        self.vertex_names.len().saturating_sub(1)
    }

    /// Returns `true` when the graph contains the edge `from -> to`.
    #[must_use]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.edges.contains(&Edge::new(from, to))
    }

    /// Returns `true` when `path` starts at the start vertex, ends at the end
    /// vertex, visits every vertex exactly once and follows existing edges.
    #[must_use]
    pub fn is_hamiltonian_path(&self, path: &[usize]) -> bool {
        if path.len() != self.vertex_count()
            || path.first() != Some(&self.start())
            || path.last() != Some(&self.end())
        {
            return false;
        }
        let distinct: HashSet<usize> = path.iter().copied().collect();
        distinct.len() == path.len()
            && path.iter().all(|&vertex| vertex < self.vertex_count())
            && path
                .windows(2)
                .all(|pair| matches!(pair, [from, to] if self.has_edge(*from, *to)))
    }
}

/// Built-in graphs used by the CLI, the benchmarks and the tests.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GraphPreset {
    /// Eight vertices `I L O V E D N A` with thirteen edges, including the
    /// back-edge `V -> O`. The Hamiltonian path spells the vertex names in
    /// order.
    LoveDna,
    /// Three vertices joined in a line: `A -> B -> C`.
    Chain,
    /// Start and end vertices with no route between them.
    Disconnected,
}

impl GraphPreset {
    /// Every preset in declaration order.
    pub const ALL: [Self; 3] = [Self::LoveDna, Self::Chain, Self::Disconnected];

    /// Builds the preset graph.
    ///
    /// # Errors
    /// Presets are statically valid; an error here would indicate a broken
    /// preset table.
    pub fn build(self) -> Result<Graph, GraphError> {
        match self {
            Self::LoveDna => Graph::new(
                ["I", "L", "O", "V", "E", "D", "N", "A"],
                [
                    (0, 1),
                    (0, 2),
                    (0, 5),
                    (1, 2),
                    (1, 7),
                    (2, 3),
                    (3, 2),
                    (3, 5),
                    (3, 4),
                    (4, 5),
                    (5, 1),
                    (5, 6),
                    (6, 7),
                ],
            ),
            Self::Chain => Graph::new(["A", "B", "C"], [(0, 1), (1, 2)]),
            Self::Disconnected => Graph::new(["S", "M", "T"], [(0, 1), (1, 0)]),
        }
    }

    /// The Hamiltonian path the preset was built around, when it has one.
    #[must_use]
    pub const fn expected_path(self) -> Option<&'static [usize]> {
        match self {
            Self::LoveDna => Some(&[0, 1, 2, 3, 4, 5, 6, 7]),
            Self::Chain => Some(&[0, 1, 2]),
            Self::Disconnected => None,
        }
    }
}
