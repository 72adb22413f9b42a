use std::fmt::{self, Display, Formatter};

use crate::hypothesis::Hypothesis;
use crate::model::GeneCount;

mod distribution;
pub use distribution::Distribution;

mod error;
pub use error::PosteriorError;

/// Default number of decimals used when displaying probabilities.
pub const DEFAULT_PRECISION: usize = 4;

/// Header of the tabulated posteriors output. Fields are separated with pretty-print separators.
pub const TABLE_HEADER: &str = "name - gene_2 - gene_1 - gene_0 - trait_true - trait_false";

/// Gene-count and trait distributions of a single individual.
/// # Fields
/// - `name`  : name of the individual.
/// - `gene`  : mass over gene counts. Indexed by `GeneCount::index()`
/// - `traits`: mass over trait values. Indexed by `usize::from(has_trait)`
#[derive(Debug, Clone, PartialEq)]
pub struct PersonPosterior {
    name  : String,
    gene  : Distribution<3>,
    traits: Distribution<2>,
}

impl PersonPosterior {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), gene: Distribution::new(), traits: Distribution::new() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mass assigned to `gene` copies.
    #[must_use]
    pub fn gene(&self, gene: GeneCount) -> f64 {
        self.gene[gene.index()]
    }

    /// Mass assigned to `has_trait`.
    #[must_use]
    pub fn has_trait(&self, has_trait: bool) -> f64 {
        self.traits[usize::from(has_trait)]
    }

    #[must_use]
    pub fn gene_distribution(&self) -> &Distribution<3> {
        &self.gene
    }

    #[must_use]
    pub fn trait_distribution(&self) -> &Distribution<2> {
        &self.traits
    }

    #[inline]
    fn accumulate(&mut self, gene: GeneCount, has_trait: bool, mass: f64) {
        self.gene.add(gene.index(), mass);
        self.traits.add(usize::from(has_trait), mass);
    }

    fn merge(&mut self, other: &Self) {
        debug_assert_eq!(self.name, other.name);
        self.gene   += &other.gene;
        self.traits += &other.traits;
    }

    fn normalized(&self) -> Result<Self, PosteriorError> {
        let zero_mass = |distribution| PosteriorError::ZeroMass{name: self.name.clone(), distribution};
        Ok(Self {
            name  : self.name.clone(),
            gene  : self.gene.normalized().ok_or_else(|| zero_mass("gene"))?,
            traits: self.traits.normalized().ok_or_else(|| zero_mass("trait"))?,
        })
    }

    /// Tabulated representation of this posterior, using `precision` decimals.
    #[must_use]
    pub fn row(&self, precision: usize) -> PosteriorRow<'_> {
        PosteriorRow { posterior: self, precision }
    }
}

/// Nested, human-readable representation. Honors the formatter's precision (e.g. `{:.2}`), and defaults to
/// `DEFAULT_PRECISION` decimals.
impl Display for PersonPosterior {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
        writeln!(f, "{}:", self.name)?;
        writeln!(f, "  Gene:")?;
        for gene in GeneCount::ALL.iter().rev() {
            writeln!(f, "    {gene}: {:.precision$}", self.gene(*gene))?;
        }
        writeln!(f, "  Trait:")?;
        writeln!(f, "    True: {:.precision$}", self.has_trait(true))?;
        write!(f, "    False: {:.precision$}", self.has_trait(false))
    }
}

/// Single line representation of a `PersonPosterior`, following the `TABLE_HEADER` field order.
pub struct PosteriorRow<'a> {
    posterior: &'a PersonPosterior,
    precision: usize,
}

impl Display for PosteriorRow<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (p, precision) = (self.posterior, self.precision);
        write!(f, "{}", p.name())?;
        for gene in GeneCount::ALL.iter().rev() {
            write!(f, " - {:.precision$}", p.gene(*gene))?;
        }
        write!(f, " - {:.precision$} - {:.precision$}", p.has_trait(true), p.has_trait(false))
    }
}

/// Per-individual posterior accumulator. Individuals are stored in pedigree index order.
///
/// Raw accumulated mass is only ever read through `finalize()`, which returns a normalized copy. Partial
/// accumulators of disjoint hypothesis sets may be combined with `merge()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Posteriors {
    persons: Vec<PersonPosterior>,
}

impl Posteriors {
    /// Instantiate a zeroed accumulator, for the given names (in pedigree index order).
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self { persons: names.iter().map(|name| PersonPosterior::new(name.as_ref())).collect() }
    }

    /// Instantiate a zeroed accumulator, over the same population as `self`.
    #[must_use]
    pub fn empty_like(&self) -> Self {
        Self { persons: self.persons.iter().map(|person| PersonPosterior::new(person.name())).collect() }
    }

    /// Route the joint probability of `hypothesis` into the matching gene and trait bucket of every individual.
    #[inline]
    pub fn accumulate(&mut self, hypothesis: &Hypothesis, probability: f64) {
        debug_assert_eq!(hypothesis.len(), self.persons.len());
        for (i, person) in self.persons.iter_mut().enumerate() {
            person.accumulate(hypothesis.gene(i), hypothesis.has_trait(i), probability);
        }
    }

    /// Add the mass of `other` into `self`. Both accumulators must target the same population.
    #[must_use]
    pub fn merge(mut self, other: &Self) -> Self {
        debug_assert_eq!(self.persons.len(), other.persons.len());
        self.persons.iter_mut()
            .zip(other.persons.iter())
            .for_each(|(person, other)| person.merge(other));
        self
    }

    /// Returns normalized posteriors: each distribution of each individual is divided by its own total mass.
    ///
    /// # Errors
    /// - `ZeroMass` if any distribution carries no mass at all.
    pub fn finalize(&self) -> Result<Self, PosteriorError> {
        let persons = self.persons.iter()
            .map(PersonPosterior::normalized)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { persons })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PersonPosterior> {
        self.persons.iter().find(|person| person.name() == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PersonPosterior> {
        self.persons.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Tabulated rows of every individual, using `precision` decimals. See `TABLE_HEADER`.
    pub fn rows(&self, precision: usize) -> impl Iterator<Item = PosteriorRow<'_>> {
        self.persons.iter().map(move |person| person.row(precision))
    }
}

impl<'a> IntoIterator for &'a Posteriors {
    type Item = &'a PersonPosterior;
    type IntoIter = std::slice::Iter<'a, PersonPosterior>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Posteriors {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
        self.persons.iter().try_for_each(|person| writeln!(f, "{person:.precision$}"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use GeneCount::*;

    fn mock_posteriors() -> Posteriors {
        let mut posteriors = Posteriors::new(&["Harry", "James"]);
        posteriors.accumulate(&Hypothesis::new(vec![Zero, Two], vec![false, true]), 0.25);
        posteriors.accumulate(&Hypothesis::new(vec![One,  Two], vec![true,  true]), 0.75);
        posteriors
    }

    #[test]
    fn accumulate_routes_mass() {
        let posteriors = mock_posteriors();
        let harry = posteriors.get("Harry").expect("Harry should be found");
        assert_eq!(harry.gene_distribution().buckets(), &[0.25, 0.75, 0.0]);
        assert_eq!(harry.trait_distribution().buckets(), &[0.25, 0.75]);

        let james = posteriors.get("James").expect("James should be found");
        assert_eq!(james.gene(Two), 1.0);
        assert_eq!(james.has_trait(false), 0.0);
    }

    #[test]
    fn finalize_normalizes_a_copy() -> Result<(), PosteriorError> {
        let mut raw = Posteriors::new(&["Harry"]);
        raw.accumulate(&Hypothesis::new(vec![Two], vec![true]), 0.02);
        raw.accumulate(&Hypothesis::new(vec![One], vec![true]), 0.06);
        let finalized = raw.finalize()?;
        let harry = finalized.get("Harry").expect("Harry should be found");
        assert_eq!(harry.gene_distribution().buckets(), &[0.0, 0.75, 0.25]);
        assert_eq!(harry.has_trait(true), 1.0);

        // ---- Raw mass is left untouched.
        assert_eq!(raw.get("Harry").map(|p| p.gene(One)), Some(0.06));
        Ok(())
    }

    #[test]
    fn zero_mass_is_an_error() {
        let posteriors = Posteriors::new(&["Harry"]);
        assert_eq!(
            posteriors.finalize(),
            Err(PosteriorError::ZeroMass{name: "Harry".to_string(), distribution: "gene"})
        );
    }

    #[test]
    fn merge_partial_accumulators() {
        let left = mock_posteriors();
        let mut right = left.empty_like();
        right.accumulate(&Hypothesis::new(vec![Zero, Zero], vec![false, false]), 1.0);

        let merged = left.merge(&right);
        let harry = merged.get("Harry").expect("Harry should be found");
        assert_eq!(harry.gene_distribution().buckets(), &[1.25, 0.75, 0.0]);
        let james = merged.get("James").expect("James should be found");
        assert_eq!(james.trait_distribution().buckets(), &[1.0, 1.0]);
    }

    #[test]
    fn nested_display() -> Result<(), PosteriorError> {
        let posteriors = mock_posteriors().finalize()?;
        let harry = posteriors.get("Harry").expect("Harry should be found");
        let want = "Harry:\n  Gene:\n    2: 0.0000\n    1: 0.7500\n    0: 0.2500\n  Trait:\n    True: 0.7500\n    False: 0.2500";
        assert_eq!(format!("{harry}"), want);
        assert!(format!("{harry:.1}").contains("    1: 0.8\n"));
        Ok(())
    }

    #[test]
    fn tabulated_rows() -> Result<(), PosteriorError> {
        let posteriors = mock_posteriors().finalize()?;
        let rows: Vec<String> = posteriors.rows(2).map(|row| row.to_string()).collect();
        assert_eq!(rows, vec![
            "Harry - 0.00 - 0.75 - 0.25 - 0.75 - 0.25",
            "James - 1.00 - 0.00 - 0.00 - 1.00 - 0.00",
        ]);
        Ok(())
    }
}
