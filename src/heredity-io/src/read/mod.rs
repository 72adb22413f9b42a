mod pedigree_reader;
pub use pedigree_reader::{PedigreeReader, PedigreeReaderError};

mod model_reader;
pub use model_reader::{ModelReader, ModelReaderError};
