use thiserror::Error;
use crate::FileEntity;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("{0} {1} does not exist")]
    MissingFileEntity(FileEntity, String),

    #[error("{1} is not a {0}")]
    InvalidFileEntity(FileEntity, String),

    #[error("Failed to create output directory {0}")]
    CreateOutputDir(String, #[source] std::io::Error),

    #[error("Failed to parse '{0}' as a number")]
    ParseNumber(String),

    #[error("The provided value must lie between {0} and {1}")]
    ParseRatio(f64, f64),

    #[error("--{0} must be greater than 0")]
    NonPositive(&'static str),

    #[error("Failed to serialize command line arguments")]
    Serialize(#[source] serde_yaml::Error),

    #[error("Unable to write serialized arguments into {0}")]
    WriteArgs(String, #[source] std::io::Error),

    #[error("Unable to open {0}")]
    OpenYaml(String, #[source] std::io::Error),

    #[error("Unable to deserialize arguments from {0}")]
    Deserialize(String, #[source] serde_yaml::Error),
}
