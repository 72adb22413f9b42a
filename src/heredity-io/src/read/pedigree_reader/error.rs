use thiserror::Error;

const COMMON_MSG: &str = "Expected comma-separated columns 'name', 'mother', 'father' and 'trait'";

#[derive(Error, Debug)]
pub enum PedigreeReaderError {
    #[error("Failed to open pedigree file")]
    OpenFile(#[source] std::io::Error),

    #[error("Failed to read line")]
    ReadLine(#[source] std::io::Error),

    #[error("Pedigree file does not contain any header. {}", COMMON_MSG)]
    MissingHeader,

    #[error("Missing column '{0}' within the pedigree header. {}", COMMON_MSG)]
    MissingColumn(&'static str),

    #[error("Column '{0}' is defined more than once within the pedigree header")]
    DuplicateColumn(String),

    #[error("Invalid number of fields. Expected {expected}, found {found}")]
    FieldCount{expected: usize, found: usize},

    #[error("Empty individual name")]
    EmptyName,
}
