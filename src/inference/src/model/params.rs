use serde::{Serialize, Deserialize};

use super::GeneCount;

/// Unconditional probabilities of carrying 0, 1 or 2 copies of the gene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenePrior {
    pub zero: f64,
    pub one : f64,
    pub two : f64,
}

impl GenePrior {
    #[must_use]
    pub fn as_array(&self) -> [f64; 3] {
        [self.zero, self.one, self.two]
    }
}

/// Probability of exhibiting (or not) the trait, for a given gene count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraitRow {
    pub present: f64,
    pub absent : f64,
}

/// Trait-given-gene-count conditional table. One `TraitRow` per gene count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraitTable {
    pub zero: TraitRow,
    pub one : TraitRow,
    pub two : TraitRow,
}

impl TraitTable {
    #[must_use]
    pub fn row(&self, gene: GeneCount) -> &TraitRow {
        match gene {
            GeneCount::Zero => &self.zero,
            GeneCount::One  => &self.one,
            GeneCount::Two  => &self.two,
        }
    }
}

/// Raw, unvalidated model parameters, as found within a model definition file.
///
/// # Format (yaml)
/// ```yaml
/// mutation_rate: 0.01
/// gene_prior: {zero: 0.96, one: 0.03, two: 0.01}
/// trait_given:
///   zero: {present: 0.01, absent: 0.99}
///   one:  {present: 0.56, absent: 0.44}
///   two:  {present: 0.65, absent: 0.35}
/// ```
/// Use `ProbabilityModel::new()` to validate these parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelParams {
    pub mutation_rate: f64,
    pub gene_prior   : GenePrior,
    pub trait_given  : TraitTable,
}

impl Default for ModelParams {
    /// Reference model parameters.
    fn default() -> Self {
        Self {
            mutation_rate: 0.01,
            gene_prior   : GenePrior { zero: 0.96, one: 0.03, two: 0.01 },
            trait_given  : TraitTable {
                zero: TraitRow { present: 0.01, absent: 0.99 },
                one : TraitRow { present: 0.56, absent: 0.44 },
                two : TraitRow { present: 0.65, absent: 0.35 },
            },
        }
    }
}

impl ModelParams {
    /// Override the mutation rate of these parameters.
    #[must_use]
    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }
}
