//! Plain-text graph files.
//!
//! The first non-blank line lists whitespace-separated vertex names; every
//! later non-blank line is an edge written as two zero-based vertex indices.
//! `#` starts a comment that runs to the end of the line.

use std::io::{self, BufRead};

use oligo_core::{Edge, Graph, GraphError};
use thiserror::Error;

/// Errors raised while reading a graph file.
#[derive(Debug, Error)]
pub enum GraphFileError {
    /// Reading from the underlying stream failed.
    #[error("failed to read graph: {source}")]
    Read {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file contained no vertex line.
    #[error("graph file does not list any vertices")]
    MissingVertices,
    /// An edge line did not hold exactly two fields.
    #[error("line {line}: expected `FROM TO`, found `{content}`")]
    MalformedEdge {
        /// One-based line number.
        line: usize,
        /// The offending line with comments stripped.
        content: String,
    },
    /// An edge endpoint was not a non-negative integer.
    #[error("line {line}: `{value}` is not a vertex index")]
    InvalidIndex {
        /// One-based line number.
        line: usize,
        /// The unparsable token.
        value: String,
    },
    /// The parsed graph failed validation.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Parses a graph from `reader`.
///
/// # Errors
/// Returns [`GraphFileError`] when the stream cannot be read, a line is
/// malformed, or the resulting graph is invalid.
///
/// # Examples
/// ```
/// use oligo_cli::cli::parse_graph;
///
/// let graph = parse_graph("A B C # names\n0 1\n1 2\n".as_bytes()).expect("valid graph");
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.edges().len(), 2);
/// ```
pub fn parse_graph(reader: impl BufRead) -> Result<Graph, GraphFileError> {
    let mut names: Option<Vec<String>> = None;
    let mut edges = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| GraphFileError::Read { source })?;
        let content = strip_comment(&line);
        if content.is_empty() {
            continue;
        }
        if names.is_none() {
            names = Some(content.split_whitespace().map(ToOwned::to_owned).collect());
        } else {
            edges.push(parse_edge(index + 1, content)?);
        }
    }

    let names = names.ok_or(GraphFileError::MissingVertices)?;
    Ok(Graph::new(names, edges)?)
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#')
        .map_or(line, |(content, _)| content)
        .trim()
}

fn parse_edge(line: usize, content: &str) -> Result<Edge, GraphFileError> {
    let mut fields = content.split_whitespace();
    let (Some(from), Some(to), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(GraphFileError::MalformedEdge {
            line,
            content: content.to_owned(),
        });
    };
    Ok(Edge {
        from: parse_index(line, from)?,
        to: parse_index(line, to)?,
    })
}

fn parse_index(line: usize, value: &str) -> Result<usize, GraphFileError> {
    value.parse().map_err(|_| GraphFileError::InvalidIndex {
        line,
        value: value.to_owned(),
    })
}
