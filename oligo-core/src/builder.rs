//! Builder utilities for configuring a [`Simulation`].
//!
//! Validates the strand length and repetition factor before a
//! [`Simulation`] is constructed.

use std::num::NonZeroUsize;

use crate::{Result, encoder::check_strand_length, error::OligoError, simulation::Simulation};

/// Strand length used when none is configured.
pub const DEFAULT_STRAND_LENGTH: usize = 10;

/// Repetition factor used when none is configured.
pub const DEFAULT_REPETITIONS: usize = 10_000;

/// Configures and constructs [`Simulation`] instances.
///
/// # Examples
/// ```
/// use oligo_core::SimulationBuilder;
///
/// let simulation = SimulationBuilder::new()
///     .with_strand_length(20)
///     .with_repetitions(500)
///     .with_seed(7)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(simulation.strand_length().get(), 20);
/// assert_eq!(simulation.repetitions().get(), 500);
/// assert_eq!(simulation.seed(), Some(7));
/// ```
#[derive(Debug, Clone)]
pub struct SimulationBuilder {
    strand_length: usize,
    repetitions: usize,
    seed: Option<u64>,
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self {
            strand_length: DEFAULT_STRAND_LENGTH,
            repetitions: DEFAULT_REPETITIONS,
            seed: None,
        }
    }
}

impl SimulationBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use oligo_core::SimulationBuilder;
    ///
    /// let builder = SimulationBuilder::new();
    /// assert_eq!(builder.strand_length(), 10);
    /// assert_eq!(builder.repetitions(), 10_000);
    /// assert_eq!(builder.seed(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the strand length `K`. It must be even and positive.
    #[must_use]
    pub fn with_strand_length(mut self, strand_length: usize) -> Self {
        self.strand_length = strand_length;
        self
    }

    /// Returns the configured strand length.
    #[must_use]
    pub fn strand_length(&self) -> usize {
        self.strand_length
    }

    /// Overrides the repetition factor `R`: how many copies of every edge
    /// strand go into the assembly pool.
    #[must_use]
    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Returns the configured repetition factor.
    #[must_use]
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Fixes the random seed so runs are reproducible end to end.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the random seed.
    #[must_use]
    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration and constructs a [`Simulation`].
    ///
    /// # Errors
    /// Returns [`OligoError::InvalidStrandLength`] for a zero or odd strand
    /// length and [`OligoError::InvalidRepetitions`] for a zero repetition
    /// factor.
    ///
    /// # Examples
    /// ```
    /// use oligo_core::{OligoError, SimulationBuilder};
    ///
    /// let err = SimulationBuilder::new().with_strand_length(7).build().unwrap_err();
    /// assert_eq!(err, OligoError::InvalidStrandLength { got: 7 });
    /// ```
    pub fn build(self) -> Result<Simulation> {
        let invalid_length = OligoError::InvalidStrandLength {
            got: self.strand_length,
        };
        check_strand_length(self.strand_length).map_err(|_| invalid_length.clone())?;
        let strand_length = NonZeroUsize::new(self.strand_length).ok_or(invalid_length)?;
        let repetitions = NonZeroUsize::new(self.repetitions).ok_or(
            OligoError::InvalidRepetitions {
                got: self.repetitions,
            },
        )?;

        Ok(Simulation::new(strand_length, repetitions, self.seed))
    }
}
