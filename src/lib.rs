extern crate parser;
extern crate logger;

use std::{iter, path::Path};

use parser::{Cli, Commands::*};
use heredity_io::{
    parse,
    read::{ModelReader, PedigreeReader},
    write::GenericWriter,
};
use inference::{posteriors::TABLE_HEADER, PosteriorEngine, Posteriors};
use located_error::prelude::*;

#[macro_use]
extern crate log;

/// File extension of tabulated posteriors.
pub const POSTERIORS_EXT: &str = "posteriors";

/// Unpack the command line and run the requested module.
///
/// # Errors
/// - if any step of the requested module fails.
pub fn run(cli: Cli) -> Result<()> {
    match cli.commands {
        Infer {common, model} => {
            infer(&common, &model)?;
        },

        FromYaml {yaml} => {
            info!("Replaying command line arguments from {}", yaml.display());
            let cli = Cli::deserialize(&yaml)?;
            logger::Logger::set_level(cli.verbosity());
            self::run(cli)?;
        },
    };
    Ok(())
}

/// Compute, print and write the posteriors of every individual found within the requested pedigree.
///
/// # Errors
/// - if the pedigree or model definition files are invalid.
/// - if the output file already exists, and `--overwrite` was not requested.
/// - if enumeration or normalization fails.
pub fn infer(common: &parser::Common, model: &parser::Model) -> Result<Posteriors> {
    // ----------------------------- Load the inheritance model.
    let probability_model = ModelReader::load(model.model.as_deref(), model.mutation_rate)?;

    // ----------------------------- Parse the pedigree.
    info!("Parsing pedigree file {}", common.pedigree.display());
    let pedigree = PedigreeReader::new(&common.pedigree)?.into_pedigree();

    // ----------------------------- Fail early if results cannot be written.
    let output_file = parse::output_file(&common.output_dir, &common.pedigree, POSTERIORS_EXT, common.overwrite)?;

    // ----------------------------- Enumerate.
    let engine = PosteriorEngine::new(&pedigree, &probability_model)?
        .with_threads(common.threads)?
        .with_chunk_size(common.chunk_size)?;
    let progress = logger::Logger::progress_bar(engine.n_chunks(), "chunks");
    let posteriors = engine.infer(&progress)?;

    // ----------------------------- Report.
    print_posteriors(&posteriors, common.precision)?;
    write_posteriors(&posteriors, &output_file, common.precision)?;
    Ok(posteriors)
}

/// Pretty-print posteriors on the console.
fn print_posteriors(posteriors: &Posteriors, precision: usize) -> Result<()> {
    let mut writer = GenericWriter::new(None::<&Path>)?;
    writer.write_iter(posteriors.iter().map(|person| format!("{person:.precision$}")))
        .loc("While printing posteriors")
}

/// Write tabulated posteriors within `path`.
fn write_posteriors(posteriors: &Posteriors, path: &Path, precision: usize) -> Result<()> {
    let loc_msg = || format!("While writing posteriors into {}", path.display());
    let rows = posteriors.rows(precision).map(|row| row.to_string());
    GenericWriter::new(Some(path))
        .and_then(|mut writer| writer.write_iter(iter::once(TABLE_HEADER.to_string()).chain(rows)))
        .with_loc(loc_msg)?;
    info!("Posteriors written to {}", path.display());
    Ok(())
}
