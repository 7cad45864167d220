//! Symbol alphabet, base pairing and the validated [`Strand`] sequence type.
//!
//! The alphabet has exactly four symbols forming two complementary pairs
//! (`A`/`T` and `C`/`G`). Pairing is an involution, so complementing twice
//! always returns the original sequence. Complements are taken symbol by
//! symbol without reversing the strand.

use std::fmt;

use rand::{
    Rng,
    distributions::{Distribution, Standard},
};

use crate::error::SequenceError;

/// One symbol of the four-letter strand alphabet.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Nucleotide {
    /// Adenine, pairs with [`Nucleotide::T`].
    A,
    /// Cytosine, pairs with [`Nucleotide::G`].
    C,
    /// Guanine, pairs with [`Nucleotide::C`].
    G,
    /// Thymine, pairs with [`Nucleotide::A`].
    T,
}

impl Nucleotide {
    /// Every symbol of the alphabet in a fixed order.
    pub const ALL: [Self; 4] = [Self::A, Self::C, Self::G, Self::T];

    /// Returns the pairing partner of this symbol.
    ///
    /// # Examples
    /// ```
    /// use oligo_core::Nucleotide;
    ///
    /// assert_eq!(Nucleotide::A.complement(), Nucleotide::T);
    /// assert_eq!(Nucleotide::G.complement().complement(), Nucleotide::G);
    /// ```
    #[must_use]
    pub const fn complement(self) -> Self {
        match self {
            Self::A => Self::T,
            Self::T => Self::A,
            Self::C => Self::G,
            Self::G => Self::C,
        }
    }

    /// Returns the character used to spell this symbol.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::C => 'C',
            Self::G => 'G',
            Self::T => 'T',
        }
    }

    /// Parses an alphabet character. Lower-case input is rejected.
    #[must_use]
    pub const fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            'A' => Some(Self::A),
            'C' => Some(Self::C),
            'G' => Some(Self::G),
            'T' => Some(Self::T),
            _ => None,
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Distribution<Nucleotide> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Nucleotide {
        match rng.gen_range(0..4_u8) {
            0 => Nucleotide::A,
            1 => Nucleotide::C,
            2 => Nucleotide::G,
            _ => Nucleotide::T,
        }
    }
}

/// Returns the base-pairing complement of `sequence`.
///
/// # Errors
/// Returns [`SequenceError::InvalidSymbol`] for the first character that is
/// not part of the alphabet.
///
/// # Examples
/// ```
/// use oligo_core::{SequenceError, complement};
///
/// assert_eq!(complement("ACGTTA").unwrap(), "TGCAAT");
/// assert!(matches!(
///     complement("AXG"),
///     Err(SequenceError::InvalidSymbol { symbol: 'X', position: 1 })
/// ));
/// ```
pub fn complement(sequence: &str) -> Result<String, SequenceError> {
    sequence
        .chars()
        .enumerate()
        .map(|(position, symbol)| {
            Nucleotide::from_char(symbol)
                .map(|nucleotide| nucleotide.complement().as_char())
                .ok_or(SequenceError::InvalidSymbol { symbol, position })
        })
        .collect()
}

/// A sequence made only of alphabet symbols.
///
/// Every character is a single ASCII byte, so byte offsets and symbol
/// offsets coincide and the prefix/suffix helpers never split a character.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Strand(String);

impl Strand {
    /// Validates `sequence` against the alphabet.
    ///
    /// # Errors
    /// Returns [`SequenceError::InvalidSymbol`] for the first foreign
    /// character.
    pub fn parse(sequence: &str) -> Result<Self, SequenceError> {
        if let Some((position, symbol)) = sequence
            .chars()
            .enumerate()
            .find(|(_, symbol)| Nucleotide::from_char(*symbol).is_none())
        {
            return Err(SequenceError::InvalidSymbol { symbol, position });
        }
        Ok(Self(sequence.to_owned()))
    }

    /// Draws `length` symbols uniformly at random.
    pub fn random<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        Self(
            (0..length)
                .map(|_| rng.sample::<Nucleotide, _>(Standard).as_char())
                .collect(),
        )
    }

    /// Returns the symbols as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of symbols in the strand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the strand has no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Leading `count` symbols, or `None` when the strand is shorter.
    #[must_use]
    pub fn prefix(&self, count: usize) -> Option<&str> {
        self.0.get(..count)
    }

    /// Trailing `count` symbols, or `None` when the strand is shorter.
    #[must_use]
    pub fn suffix(&self, count: usize) -> Option<&str> {
        let start = self.0.len().checked_sub(count)?;
        self.0.get(start..)
    }

    /// Returns `true` when `other` occurs as a contiguous run of symbols.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.0.contains(other.as_str())
    }

    /// Splits the strand into consecutive chunks of `width` symbols. The last
    /// chunk is shorter when the length is not a multiple of `width`.
    pub fn chunks(&self, width: usize) -> impl Iterator<Item = &str> {
        self.0
            .as_bytes()
            .chunks(width.max(1))
            .filter_map(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Symbol-wise complement of the whole strand.
    #[must_use]
    pub fn complement(&self) -> Self {
        Self(
            self.0
                .chars()
                .filter_map(Nucleotide::from_char)
                .map(|nucleotide| nucleotide.complement().as_char())
                .collect(),
        )
    }

    /// Appends the symbols of `other`.
    pub fn extend(&mut self, other: &Self) {
        self.0.push_str(other.as_str());
    }

    /// Builds a strand by concatenating alphabet-only fragments.
    pub(crate) fn concat<'a>(parts: impl IntoIterator<Item = &'a str>) -> Self {
        Self(parts.into_iter().collect())
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Strand {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Strand {
    type Err = SequenceError;

    fn from_str(sequence: &str) -> Result<Self, Self::Err> {
        Self::parse(sequence)
    }
}
