use crate::{
    hypothesis::Hypothesis,
    model::ProbabilityModel,
    pedigree::{Lineage, ParentSlot, Pedigree, PedigreeError},
};

#[cfg(test)]
use mockall::automock;

/// Anything able to assign a joint probability to a complete hypothesis.
#[cfg_attr(test, automock)]
pub trait JointDistribution {
    /// Probability of the exact joint configuration described by `hypothesis`.
    fn joint_probability(&self, hypothesis: &Hypothesis) -> f64;
}

/// Joint probability evaluator of a pedigree, under a given `ProbabilityModel`.
///
/// Founders' genotypes are independent and follow the gene prior. Given its parents' genotypes, a child's
/// genotype is independent of everything else. Given an individual's own genotype, its trait status is
/// independent of everyone else's.
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    model   : &'a ProbabilityModel,
    lineages: Vec<Lineage>,
}

impl<'a> Evaluator<'a> {
    /// # Errors
    /// - if the pedigree's ancestry graph contains a cycle.
    pub fn new(pedigree: &Pedigree, model: &'a ProbabilityModel) -> Result<Self, PedigreeError> {
        Ok(Self::from_lineages(pedigree.lineages()?, model))
    }

    pub fn from_lineages(lineages: Vec<Lineage>, model: &'a ProbabilityModel) -> Self {
        Self { model, lineages }
    }

    /// Probability that the parent found in `slot` transmits the variant allele, under `hypothesis`.
    #[inline]
    fn transmission(&self, slot: ParentSlot, hypothesis: &Hypothesis) -> f64 {
        match slot {
            ParentSlot::Known(parent) => self.model.transmission(hypothesis.gene(parent)),
            ParentSlot::Unknown       => self.model.unknown_parent_transmission(),
        }
    }

    /// Probability of the genotype assigned to the `i`-th individual, given its parents' assigned genotypes.
    #[inline]
    fn genotype_term(&self, i: usize, hypothesis: &Hypothesis) -> f64 {
        let gene = hypothesis.gene(i);
        match self.lineages[i] {
            Lineage::Founder => self.model.prior(gene),
            Lineage::Offspring{mother, father} => {
                let p_mother = self.transmission(mother, hypothesis);
                let p_father = self.transmission(father, hypothesis);
                self.model.offspring(p_mother, p_father)[gene.index()]
            }
        }
    }

    /// Combined genotype and trait term of the `i`-th individual.
    #[inline]
    #[must_use]
    pub fn person_term(&self, i: usize, hypothesis: &Hypothesis) -> f64 {
        let trait_term = self.model.trait_given(hypothesis.gene(i), hypothesis.has_trait(i));
        self.genotype_term(i, hypothesis) * trait_term
    }
}

impl JointDistribution for Evaluator<'_> {
    fn joint_probability(&self, hypothesis: &Hypothesis) -> f64 {
        debug_assert_eq!(hypothesis.len(), self.lineages.len());
        (0..self.lineages.len())
            .map(|i| self.person_term(i, hypothesis))
            .product()
    }
}
