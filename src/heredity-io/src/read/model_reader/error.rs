use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelReaderError {
    #[error("Failed to open model definition file")]
    OpenFile(#[source] std::io::Error),

    #[error("Failed to deserialize model parameters. Expected the fields 'mutation_rate', 'gene_prior' and 'trait_given'")]
    Deserialize(#[source] serde_yaml::Error),
}
