use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HypothesisError {
    #[error("Too many hypotheses to enumerate for {population} individuals ({unobserved} with an unknown trait status)")]
    SpaceOverflow{population: usize, unobserved: usize},
}
