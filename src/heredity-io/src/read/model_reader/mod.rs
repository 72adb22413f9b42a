use std::{fs::File, io::Read, path::Path};

use log::{debug, info};
use located_error::prelude::*;

use inference::{ModelParams, ProbabilityModel};

mod error;
pub use error::ModelReaderError;

/// Inheritance model definition file reader (`.yaml`)
pub struct ModelReader;

impl ModelReader {
    /// Deserialize raw model parameters from a yaml file. Parameters are left unvalidated.
    ///
    /// # Errors
    /// - if the file cannot be opened, or does not contain valid model parameters.
    pub fn read_params(path: &Path) -> Result<ModelParams> {
        let loc_msg = || format!("While attempting to read model definition file '{}'", path.display());
        let file = File::open(path).map_err(ModelReaderError::OpenFile).with_loc(loc_msg)?;
        Self::parse_params(file).with_loc(loc_msg)
    }

    /// Deserialize raw model parameters from any source.
    ///
    /// # Errors
    /// - if `source` does not contain valid model parameters.
    pub fn parse_params<R: Read>(source: R) -> Result<ModelParams> {
        let params: ModelParams = serde_yaml::from_reader(source)
            .map_err(ModelReaderError::Deserialize)
            .loc("While deserializing model parameters")?;
        debug!("Model parameters: {params:?}");
        Ok(params)
    }

    /// Build a validated `ProbabilityModel`, using either the provided model file or the reference model, and an
    /// optional mutation rate override.
    ///
    /// # Errors
    /// - if the model file cannot be read.
    /// - if the resulting parameters are invalid.
    pub fn load(path: Option<&Path>, mutation_rate: Option<f64>) -> Result<ProbabilityModel> {
        let mut params = match path {
            Some(path) => Self::read_params(path)?,
            None       => {
                info!("No model definition file provided. Using the reference inheritance model.");
                ModelParams::default()
            }
        };

        if let Some(rate) = mutation_rate {
            debug!("Overriding mutation rate: {} -> {rate}", params.mutation_rate);
            params = params.with_mutation_rate(rate);
        }
        ProbabilityModel::new(&params).loc("While validating model parameters")
    }
}
