use std::fmt::{self, Display, Formatter};

use super::ModelError;

/// Number of copies of the variant allele carried by an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeneCount {
    Zero,
    One,
    Two,
}

impl GeneCount {
    /// Every possible gene count, in increasing order of copies.
    pub const ALL: [GeneCount; 3] = [Self::Zero, Self::One, Self::Two];

    #[must_use]
    pub fn copies(self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::One  => 1,
            Self::Two  => 2,
        }
    }

    /// Index of this gene count within a size-three probability table.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.copies())
    }

    /// Return the next gene count, wrapping from `Two` back to `Zero`. The boolean is `true` on wrap-around.
    #[inline]
    #[must_use]
    pub fn next_wrapping(self) -> (Self, bool) {
        match self {
            Self::Zero => (Self::One, false),
            Self::One  => (Self::Two, false),
            Self::Two  => (Self::Zero, true),
        }
    }
}

impl TryFrom<u8> for GeneCount {
    type Error = ModelError;

    fn try_from(copies: u8) -> Result<Self, Self::Error> {
        match copies {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            _ => Err(ModelError::InvalidGeneCount(copies)),
        }
    }
}

impl Display for GeneCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.copies())
    }
}
