mod gene_count;
pub use gene_count::GeneCount;

mod params;
pub use params::{ModelParams, GenePrior, TraitRow, TraitTable};

mod error;
pub use error::ModelError;

/// Tolerance used when checking whether a probability table sums to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Validated, immutable inheritance model.
///
/// # Fields
/// - `gene_prior`   : unconditional probability of carrying 0, 1 or 2 copies. Indexed by `GeneCount::index()`
/// - `trait_given`  : probability of the trait given a gene count. `trait_given[gene][usize::from(has_trait)]`
/// - `mutation_rate`: probability that a transmitted gene copy flips state.
/// - `unknown_parent_transmission`: transmission probability of a parent whose gene count is unknown, i.e.
///                    marginalized over `gene_prior`. Cached, since it does not depend upon the pedigree.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityModel {
    gene_prior                 : [f64; 3],
    trait_given                : [[f64; 2]; 3],
    mutation_rate              : f64,
    unknown_parent_transmission: f64,
}

impl Default for ProbabilityModel {
    fn default() -> Self {
        Self::from_params(&ModelParams::default())
    }
}

impl TryFrom<ModelParams> for ProbabilityModel {
    type Error = ModelError;

    fn try_from(params: ModelParams) -> Result<Self, Self::Error> {
        Self::new(&params)
    }
}

impl ProbabilityModel {
    /// Validate a set of raw model parameters and build a new `ProbabilityModel`.
    ///
    /// # Errors
    /// - `InvalidProbability` if any probability is negative, greater than one, or not a number.
    /// - `UnnormalizedTable` if the gene prior, or any row of the trait table, does not sum to one.
    /// - `InvalidMutationRate` if the mutation rate does not lie within `[0, 1]`
    pub fn new(params: &ModelParams) -> Result<Self, ModelError> {
        if !(0.0..=1.0).contains(&params.mutation_rate) {
            return Err(ModelError::InvalidMutationRate(params.mutation_rate))
        }

        Self::validate_table("gene prior", &params.gene_prior.as_array())?;
        for gene in GeneCount::ALL {
            let row = params.trait_given.row(gene);
            Self::validate_table(&format!("trait table (gene = {gene})"), &[row.absent, row.present])?;
        }
        Ok(Self::from_params(params))
    }

    fn validate_table(table: &str, probs: &[f64]) -> Result<(), ModelError> {
        if let Some(value) = probs.iter().find(|p| !(0.0..=1.0).contains(*p)) {
            return Err(ModelError::InvalidProbability{table: table.to_string(), value: *value})
        }
        let sum: f64 = probs.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(ModelError::UnnormalizedTable{table: table.to_string(), sum})
        }
        Ok(())
    }

    fn from_params(params: &ModelParams) -> Self {
        let row = |gene| {
            let TraitRow{present, absent} = *params.trait_given.row(gene);
            [absent, present]
        };

        let mut model = Self {
            gene_prior                 : params.gene_prior.as_array(),
            trait_given                : [row(GeneCount::Zero), row(GeneCount::One), row(GeneCount::Two)],
            mutation_rate              : params.mutation_rate,
            unknown_parent_transmission: 0.0,
        };

        model.unknown_parent_transmission = GeneCount::ALL.iter()
            .map(|&gene| model.prior(gene) * model.transmission(gene))
            .sum();
        model
    }

    /// Unconditional probability of carrying `gene` copies.
    #[inline]
    #[must_use]
    pub fn prior(&self, gene: GeneCount) -> f64 {
        self.gene_prior[gene.index()]
    }

    /// Probability of `has_trait`, given `gene` copies.
    #[inline]
    #[must_use]
    pub fn trait_given(&self, gene: GeneCount, has_trait: bool) -> f64 {
        self.trait_given[gene.index()][usize::from(has_trait)]
    }

    #[must_use]
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Probability that a parent carrying `gene` copies passes the variant allele to its child.
    ///
    /// Each of the parent's two alleles is transmitted with probability 1/2, and independently flips
    /// state with probability `mutation_rate`:
    /// - a variant allele is passed on as a variant with probability `1 - m`
    /// - a normal allele is passed on as a variant with probability `m`
    #[inline]
    #[must_use]
    pub fn transmission(&self, gene: GeneCount) -> f64 {
        let m = self.mutation_rate;
        let variant = f64::from(gene.copies()) / 2.0;
        let normal  = f64::from(2 - gene.copies()) / 2.0;
        variant * (1.0 - m) + normal * m
    }

    /// Transmission probability of a parent that is either unreferenced or missing from the pedigree.
    /// Computed once, by marginalizing `transmission()` over the gene prior.
    #[inline]
    #[must_use]
    pub fn unknown_parent_transmission(&self) -> f64 {
        self.unknown_parent_transmission
    }

    /// Distribution of the number of copies received by a child, given the transmission probabilities of its mother
    /// and father. Indexed by `GeneCount::index()`.
    #[inline]
    #[must_use]
    pub fn offspring(&self, p_mother: f64, p_father: f64) -> [f64; 3] {
        [
            (1.0 - p_mother) * (1.0 - p_father),
            p_mother * (1.0 - p_father) + p_father * (1.0 - p_mother),
            p_mother * p_father,
        ]
    }
}
