use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PosteriorError {
    #[error("Cannot normalize the {distribution} distribution of '{name}': its total probability mass is zero. Every hypothesis was filtered out for this individual")]
    ZeroMass{name: String, distribution: &'static str},
}
