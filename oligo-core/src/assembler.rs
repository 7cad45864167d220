//! Stochastic strand assembly.
//!
//! The edge strands are repeated `R` times, shuffled, and scanned once. A
//! single growing strand absorbs each edge strand whose leading half binds
//! to the strand's trailing half, and is emitted as a candidate as soon as
//! it ends with the end vertex strand. Edge strands that fail to bind are
//! dropped for good; the repetition factor is what compensates for them.

use rand::{Rng, seq::SliceRandom};
use tracing::{info, instrument};

use crate::{
    alphabet::{Strand, complement},
    encoder::Encoding,
    error::{OligoError, SequenceError},
};

/// Accumulator state of the single strand grown during assembly.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum StrandState {
    /// No strand is growing; the next edge strand seeds a new one.
    #[default]
    Empty,
    /// A strand is growing.
    Growing(Strand),
}

/// How the accumulator treated an offered edge strand.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Attempt {
    /// The edge strand seeded a new growing strand.
    Seeded,
    /// The edge strand bound to the growing strand and was ligated.
    Ligated,
    /// The edge strand did not bind and was discarded.
    Rejected,
}

/// Result of offering one edge strand to the accumulator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Step {
    /// What happened to the offered edge strand.
    pub attempt: Attempt,
    /// The completed strand when the offer closed it.
    pub closed: Option<Strand>,
}

impl StrandState {
    /// Offers `segment` to the accumulator and applies the resulting
    /// transition.
    ///
    /// An empty accumulator always accepts the segment. A growing strand
    /// accepts it only when the complement of the strand's last `K/2`
    /// symbols followed by the complement of the segment's first `K/2`
    /// symbols is a vertex complement. After every attempt the strand is
    /// closed, and the accumulator reset, if its last `K` symbols equal the
    /// end vertex strand.
    ///
    /// # Errors
    /// Returns [`SequenceError::InvalidSymbol`] if a strand contains a
    /// foreign symbol, which cannot happen for strands built by
    /// [`crate::Encoder`].
    pub fn offer(&mut self, segment: &Strand, encoding: &Encoding) -> Result<Step, SequenceError> {
        let attempt = match self {
            Self::Empty => {
                *self = Self::Growing(segment.clone());
                Attempt::Seeded
            }
            Self::Growing(strand) => {
                if binds(strand, segment, encoding)? {
                    strand.extend(segment);
                    Attempt::Ligated
                } else {
                    Attempt::Rejected
                }
            }
        };
        Ok(Step {
            attempt,
            closed: self.close_if_complete(encoding),
        })
    }

    fn close_if_complete(&mut self, encoding: &Encoding) -> Option<Strand> {
        let Self::Growing(strand) = self else {
            return None;
        };
        let end = encoding.end_strand()?;
        if strand.suffix(encoding.strand_length()) != Some(end.as_str()) {
            return None;
        }
        match std::mem::take(self) {
            Self::Growing(closed) => Some(closed),
            Self::Empty => None,
        }
    }
}

fn binds(strand: &Strand, segment: &Strand, encoding: &Encoding) -> Result<bool, SequenceError> {
    let half = encoding.half_length();
    let (Some(tail), Some(head)) = (strand.suffix(half), segment.prefix(half)) else {
        return Ok(false);
    };
    let mut target = complement(tail)?;
    target.push_str(&complement(head)?);
    Ok(encoding.complements().contains(&Strand::parse(&target)?))
}

/// Counters describing one assembly run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AssemblyStats {
    /// Number of edge strands in the shuffled pool.
    pub pool_size: usize,
    /// Edge strands that started a new growing strand.
    pub seeded: usize,
    /// Edge strands ligated onto a growing strand.
    pub ligated: usize,
    /// Edge strands discarded because they did not bind.
    pub rejected: usize,
    /// Strands emitted as candidates.
    pub candidates: usize,
    /// Whether a strand was still growing when the pool ran out.
    pub unfinished_discarded: bool,
}

/// Candidate strands produced by an assembly run, in completion order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Assembly {
    /// Completed strands ending with the end vertex strand.
    pub candidates: Vec<Strand>,
    /// Counters for the run.
    pub stats: AssemblyStats,
}

/// Runs the shuffled single-accumulator ligation over an encoding.
#[derive(Clone, Copy, Debug)]
pub struct Assembler<'a> {
    encoding: &'a Encoding,
    repetitions: usize,
}

impl<'a> Assembler<'a> {
    /// Creates an assembler that repeats every edge strand `repetitions`
    /// times in the pool.
    #[must_use]
    pub const fn new(encoding: &'a Encoding, repetitions: usize) -> Self {
        Self {
            encoding,
            repetitions,
        }
    }

    /// Shuffles the pool with `rng` and scans it once.
    ///
    /// An empty candidate list is a normal result.
    ///
    /// # Errors
    /// Returns [`OligoError::InvalidRepetitions`] when the pool would not fit
    /// in memory and [`OligoError::Sequence`] when the binding test fails.
    ///
    /// # Examples
    /// ```
    /// use oligo_core::{Assembler, Encoder, GraphPreset};
    /// use rand::{SeedableRng, rngs::SmallRng};
    ///
    /// let graph = GraphPreset::Chain.build().expect("preset is valid");
    /// let mut rng = SmallRng::seed_from_u64(1);
    /// let encoder = Encoder::new(10).expect("strand length is valid");
    /// let encoding = encoder.encode(&graph, &mut rng);
    /// let assembly = Assembler::new(&encoding, 100)
    ///     .assemble(&mut rng)
    ///     .expect("encoder strands are valid");
    /// assert_eq!(assembly.stats.pool_size, 200);
    /// assert!(!assembly.candidates.is_empty());
    /// ```
    #[instrument(
        name = "core.assemble",
        err,
        skip(self, rng),
        fields(
            edges = self.encoding.edge_strands().len(),
            repetitions = self.repetitions
        ),
    )]
    pub fn assemble<R: Rng + ?Sized>(&self, rng: &mut R) -> crate::Result<Assembly> {
        let capacity = self.pool_size().ok_or(OligoError::InvalidRepetitions {
            got: self.repetitions,
        })?;
        let mut pool: Vec<&Strand> = Vec::with_capacity(capacity);
        for _ in 0..self.repetitions {
            pool.extend(self.encoding.edge_strands());
        }
        pool.shuffle(rng);

        let mut stats = AssemblyStats {
            pool_size: pool.len(),
            ..AssemblyStats::default()
        };
        let mut candidates = Vec::new();
        let mut state = StrandState::Empty;
        for segment in pool {
            let step = state.offer(segment, self.encoding)?;
            match step.attempt {
                Attempt::Seeded => stats.seeded += 1,
                Attempt::Ligated => stats.ligated += 1,
                Attempt::Rejected => stats.rejected += 1,
            }
            candidates.extend(step.closed);
        }
        stats.candidates = candidates.len();
        stats.unfinished_discarded = matches!(state, StrandState::Growing(_));

        info!(
            pool_size = stats.pool_size,
            candidates = stats.candidates,
            ligated = stats.ligated,
            rejected = stats.rejected,
            "strands created"
        );
        Ok(Assembly { candidates, stats })
    }

    /// Number of pool entries, or `None` when the pool cannot be allocated.
    fn pool_size(&self) -> Option<usize> {
        let size = self
            .encoding
            .edge_strands()
            .len()
            .checked_mul(self.repetitions)?;
        size.checked_mul(size_of::<&Strand>())
            .filter(|bytes| *bytes <= isize::MAX.unsigned_abs())
            .map(|_| size)
    }
}
