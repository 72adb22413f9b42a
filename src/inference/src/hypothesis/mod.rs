use std::ops::Range;

use crate::model::GeneCount;
use crate::pedigree::{Pedigree, TraitObservation};

mod error;
pub use error::HypothesisError;

/// One complete candidate assignment of gene counts and trait values, for every individual of a pedigree.
/// Both vectors are indexed by individual (see `Pedigree::position()`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hypothesis {
    genes : Vec<GeneCount>,
    traits: Vec<bool>,
}

impl Hypothesis {
    pub fn new(genes: Vec<GeneCount>, traits: Vec<bool>) -> Self {
        debug_assert_eq!(genes.len(), traits.len());
        Self { genes, traits }
    }

    /// Assigned gene count of the `i`-th individual.
    #[inline]
    #[must_use]
    pub fn gene(&self, i: usize) -> GeneCount {
        self.genes[i]
    }

    /// Assigned trait value of the `i`-th individual.
    #[inline]
    #[must_use]
    pub fn has_trait(&self, i: usize) -> bool {
        self.traits[i]
    }

    #[must_use]
    pub fn genes(&self) -> &[GeneCount] {
        &self.genes
    }

    #[must_use]
    pub fn traits(&self) -> &[bool] {
        &self.traits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

/// The set of every hypothesis consistent with the observed evidence of a pedigree.
///
/// Each individual gets a gene digit in {0, 1, 2}. Only individuals with an unknown trait status get a
/// free trait digit: observed individuals are pinned to their observation, so that hypotheses
/// contradicting the evidence are never generated.
///
/// Hypotheses are addressable by index: `index = gene_code * trait_combinations + trait_code`, where
/// `gene_code` is read in base 3 and `trait_code` in base 2, lowest individual index first.
/// Walking the space with `advance()` visits indices in increasing order.
///
/// # Fields
/// - `observed`          : pinned trait value of each individual, or `None` if free.
/// - `free`              : indices of the individuals carrying a free trait digit.
/// - `trait_combinations`: `2^free.len()`
/// - `len`               : total number of hypotheses: `3^n * 2^free.len()`
#[derive(Debug, Clone)]
pub struct HypothesisSpace {
    observed          : Vec<Option<bool>>,
    free              : Vec<usize>,
    trait_combinations: u64,
    len               : u64,
}

impl HypothesisSpace {
    /// Build the hypothesis space from the observed trait status of every individual.
    ///
    /// # Errors
    /// - `SpaceOverflow` if the number of hypotheses does not fit within a `u64`
    pub fn new(observations: &[TraitObservation]) -> Result<Self, HypothesisError> {
        let observed: Vec<Option<bool>> = observations.iter().map(TraitObservation::value).collect();
        let free: Vec<usize> = observed.iter().enumerate()
            .filter_map(|(i, value)| value.is_none().then_some(i))
            .collect();

        let overflow = || HypothesisError::SpaceOverflow{population: observed.len(), unobserved: free.len()};
        let population = u32::try_from(observed.len()).map_err(|_| overflow())?;
        let unobserved = u32::try_from(free.len()).map_err(|_| overflow())?;

        let gene_combinations  = 3u64.checked_pow(population).ok_or_else(overflow)?;
        let trait_combinations = 2u64.checked_pow(unobserved).ok_or_else(overflow)?;
        let len = gene_combinations.checked_mul(trait_combinations).ok_or_else(overflow)?;
        Ok(Self { observed, free, trait_combinations, len })
    }

    /// Build the hypothesis space of a pedigree.
    ///
    /// # Errors
    /// - `SpaceOverflow` if the number of hypotheses does not fit within a `u64`
    pub fn from_pedigree(pedigree: &Pedigree) -> Result<Self, HypothesisError> {
        Self::new(&pedigree.observations())
    }

    /// Total number of hypotheses.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// A hypothesis space always contains at least one hypothesis (the empty one, for an empty pedigree).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of individuals.
    #[must_use]
    pub fn population(&self) -> usize {
        self.observed.len()
    }

    /// Number of individuals whose trait status is unknown.
    #[must_use]
    pub fn unobserved(&self) -> usize {
        self.free.len()
    }

    /// Decode the hypothesis found at `index`. Returns `None` if `index` is out of bounds.
    #[must_use]
    pub fn hypothesis(&self, index: u64) -> Option<Hypothesis> {
        if index >= self.len {
            return None
        }

        let mut trait_code = index % self.trait_combinations;
        let mut gene_code  = index / self.trait_combinations;

        let genes = (0..self.population()).map(|_| {
            let digit = gene_code % 3;
            gene_code /= 3;
            match digit {
                0 => GeneCount::Zero,
                1 => GeneCount::One,
                _ => GeneCount::Two,
            }
        }).collect();

        let mut traits: Vec<bool> = self.observed.iter().map(|value| value.unwrap_or(false)).collect();
        for &i in &self.free {
            traits[i] = trait_code % 2 == 1;
            trait_code /= 2;
        }
        Some(Hypothesis { genes, traits })
    }

    /// Move `hypothesis` to the next one, in index order. Returns `false` once every hypothesis was visited,
    /// in which case `hypothesis` wraps around to the first one.
    pub fn advance(&self, hypothesis: &mut Hypothesis) -> bool {
        // ---- Free trait digits run fastest.
        for &i in &self.free {
            let has_trait = &mut hypothesis.traits[i];
            *has_trait = !*has_trait;
            if *has_trait {
                return true
            }
        }

        // ---- ...Then gene digits.
        for gene in &mut hypothesis.genes {
            let (next, wrapped) = gene.next_wrapping();
            *gene = next;
            if !wrapped {
                return true
            }
        }
        false
    }

    /// Visit every hypothesis found within `range`, in index order. Out-of-bounds indices are ignored.
    pub fn walk<F>(&self, range: Range<u64>, mut visit: F)
    where
        F: FnMut(&Hypothesis)
    {
        let end = range.end.min(self.len);
        let Some(mut hypothesis) = self.hypothesis(range.start) else {
            return
        };

        for _ in range.start..end {
            visit(&hypothesis);
            self.advance(&mut hypothesis);
        }
    }

    /// Iterate over every hypothesis, in index order.
    pub fn iter(&self) -> HypothesisIter<'_> {
        HypothesisIter { space: self, next: self.hypothesis(0), remaining: self.len }
    }
}

impl<'a> IntoIterator for &'a HypothesisSpace {
    type Item = Hypothesis;
    type IntoIter = HypothesisIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over the hypotheses of a `HypothesisSpace`. Each item is a fresh clone:
/// use `HypothesisSpace::walk()` to avoid allocations within hot loops.
pub struct HypothesisIter<'a> {
    space    : &'a HypothesisSpace,
    next     : Option<Hypothesis>,
    remaining: u64,
}

impl Iterator for HypothesisIter<'_> {
    type Item = Hypothesis;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None
        }
        self.remaining -= 1;

        let current = self.next.take()?;
        let mut next = current.clone();
        if self.space.advance(&mut next) {
            self.next = Some(next);
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_)        => (usize::MAX, None),
        }
    }
}
