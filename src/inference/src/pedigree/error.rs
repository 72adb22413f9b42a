use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PedigreeError {
    #[error("Invalid trait marker '{0}'. Expected '1', '0' or an empty field")]
    InvalidTraitMarker(String),

    #[error("Individual '{0}' is defined more than once within the pedigree")]
    DuplicateIndividual(String),

    #[error("Individual '{0}' cannot be found within the pedigree")]
    MissingIndividual(String),

    #[error("Cyclic ancestry: '{0}' is listed among its own ancestors")]
    CyclicAncestry(String),
}
