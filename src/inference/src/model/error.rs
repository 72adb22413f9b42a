use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ModelError {
    #[error("Invalid gene count: {0}. Individuals may only carry 0, 1 or 2 copies of the gene")]
    InvalidGeneCount(u8),

    #[error("Invalid probability in {table}: {value} does not lie within [0, 1]")]
    InvalidProbability{table: String, value: f64},

    #[error("Probabilities of {table} must sum to 1. Got {sum}")]
    UnnormalizedTable{table: String, sum: f64},

    #[error("Invalid mutation rate: {0}. Value must lie within [0, 1]")]
    InvalidMutationRate(f64),
}
