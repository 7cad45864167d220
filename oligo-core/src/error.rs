//! Error types for the oligo core library.
//!
//! Defines error enums exposed by the public API, their stable codes, and a
//! convenient result alias. An empty selection result is not an error; it is
//! reported through [`crate::Outcome::NoSolution`].

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while reading or complementing a sequence.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SequenceError {
    /// The sequence contained a character outside the four-symbol alphabet.
    #[error("symbol `{symbol}` at position {position} is not in the alphabet")]
    InvalidSymbol {
        /// The offending character.
        symbol: char,
        /// Zero-based character offset of the offending symbol.
        position: usize,
    },
    /// A supplied vertex strand did not have the configured length.
    #[error("strand for vertex {vertex} has length {got} but {expected} was configured")]
    WrongLength {
        /// Index of the vertex whose strand was rejected.
        vertex: usize,
        /// Length of the supplied strand.
        got: usize,
        /// Configured strand length.
        expected: usize,
    },
    /// The number of supplied vertex strands did not match the graph.
    #[error("{got} vertex strands were supplied for a graph with {expected} vertices")]
    CountMismatch {
        /// Number of supplied strands.
        got: usize,
        /// Number of vertices in the graph.
        expected: usize,
    },
    /// The strand length cannot be split into two equal non-empty halves.
    #[error("strand length must be positive and even (got {got})")]
    InvalidStrandLength {
        /// Rejected strand length.
        got: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`SequenceError`] variants.
    enum SequenceErrorCode for SequenceError {
        /// The sequence contained a character outside the alphabet.
        InvalidSymbol => InvalidSymbol { .. } => "SEQUENCE_INVALID_SYMBOL",
        /// A supplied vertex strand did not have the configured length.
        WrongLength => WrongLength { .. } => "SEQUENCE_WRONG_LENGTH",
        /// The number of supplied vertex strands did not match the graph.
        CountMismatch => CountMismatch { .. } => "SEQUENCE_COUNT_MISMATCH",
        /// The strand length was zero or odd.
        InvalidStrandLength => InvalidStrandLength { .. } => "SEQUENCE_INVALID_STRAND_LENGTH",
    }
}

/// An error produced while validating a [`crate::Graph`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The graph has no vertices.
    #[error("graph must contain at least one vertex")]
    Empty,
    /// A vertex name was empty or whitespace only.
    #[error("vertex {index} has a blank name")]
    BlankVertexName {
        /// Index of the unnamed vertex.
        index: usize,
    },
    /// Two vertices share a name.
    #[error("vertex name `{name}` is used more than once")]
    DuplicateVertex {
        /// The repeated name.
        name: Arc<str>,
    },
    /// An edge referenced a vertex index outside the graph.
    #[error("edge ({from}, {to}) references a vertex outside 0..{vertices}")]
    EdgeOutOfRange {
        /// Source index of the offending edge.
        from: usize,
        /// Destination index of the offending edge.
        to: usize,
        /// Number of vertices in the graph.
        vertices: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The graph has no vertices.
        Empty => Empty => "GRAPH_EMPTY",
        /// A vertex name was blank.
        BlankVertexName => BlankVertexName { .. } => "GRAPH_BLANK_VERTEX_NAME",
        /// Two vertices share a name.
        DuplicateVertex => DuplicateVertex { .. } => "GRAPH_DUPLICATE_VERTEX",
        /// An edge referenced a vertex index outside the graph.
        EdgeOutOfRange => EdgeOutOfRange { .. } => "GRAPH_EDGE_OUT_OF_RANGE",
    }
}

/// An error produced when a candidate strand cannot be decoded.
///
/// Candidates that passed every selection stage decode cleanly unless two
/// vertices drew the same random strand, so these errors indicate a broken
/// invariant rather than an expected outcome.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DecodeError {
    /// A chunk did not equal any vertex strand.
    #[error("chunk {chunk_index} (`{chunk}`) does not match any vertex strand")]
    NoExactMatch {
        /// Zero-based index of the chunk within the candidate.
        chunk_index: usize,
        /// The unmatched symbols.
        chunk: Arc<str>,
    },
    /// The candidate length was not a positive multiple of the strand length.
    #[error("candidate of length {length} cannot be split into strands of length {strand_length}")]
    RaggedLength {
        /// Length of the candidate.
        length: usize,
        /// Configured strand length.
        strand_length: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DecodeError`] variants.
    enum DecodeErrorCode for DecodeError {
        /// A chunk did not equal any vertex strand.
        NoExactMatch => NoExactMatch { .. } => "DECODE_NO_EXACT_MATCH",
        /// The candidate length was not a positive multiple of the strand length.
        RaggedLength => RaggedLength { .. } => "DECODE_RAGGED_LENGTH",
    }
}

/// Error type produced when configuring or running a [`crate::Simulation`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum OligoError {
    /// Strand length must be even and positive.
    #[error("strand_length must be a positive even number (got {got})")]
    InvalidStrandLength {
        /// The rejected strand length.
        got: usize,
    },
    /// Repetition factor must be positive.
    #[error("repetitions must be at least 1 (got {got})")]
    InvalidRepetitions {
        /// The rejected repetition factor.
        got: usize,
    },
    /// The graph failed validation.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// A sequence could not be read or complemented.
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    /// A surviving candidate could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

define_error_codes! {
    /// Stable codes describing [`OligoError`] variants.
    enum OligoErrorCode for OligoError {
        /// Strand length must be even and positive.
        InvalidStrandLength => InvalidStrandLength { .. } => "OLIGO_INVALID_STRAND_LENGTH",
        /// Repetition factor must be positive.
        InvalidRepetitions => InvalidRepetitions { .. } => "OLIGO_INVALID_REPETITIONS",
        /// The graph failed validation.
        GraphFailure => Graph { .. } => "OLIGO_GRAPH_FAILURE",
        /// A sequence could not be read or complemented.
        SequenceFailure => Sequence { .. } => "OLIGO_SEQUENCE_FAILURE",
        /// A surviving candidate could not be decoded.
        DecodeFailure => Decode { .. } => "OLIGO_DECODE_FAILURE",
    }
}

impl OligoError {
    /// Retrieve the code of the wrapped stage error, when there is one.
    #[must_use]
    pub const fn source_code(&self) -> Option<&'static str> {
        match self {
            Self::Graph(error) => Some(error.code().as_str()),
            Self::Sequence(error) => Some(error.code().as_str()),
            Self::Decode(error) => Some(error.code().as_str()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, OligoError>;
