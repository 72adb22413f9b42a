use std::{
    ffi::OsStr,
    fmt::{self, Display, Formatter},
    fs::File,
    path::{Path, PathBuf},
};

use located_error::*;

use clap::{Parser, Subcommand};
use serde::{Serialize, Deserialize};
use log::debug;
use anyhow::Result;

mod error;
pub use error::ParserError;

#[derive(Parser, Debug, Serialize, Deserialize)]
#[clap(name="heredity-rs", author, version, about, long_about = None)]
#[clap(propagate_version = true)]
/// heredity-rs: exact Bayesian inference of gene copies and trait status within a pedigree
pub struct Cli {
    ///Set the verbosity level (-v -vv -vvv)
    ///
    /// Set the verbosity level of this program. Multiple levels allowed {n}
    ///
    /// -v: Info  |  -vv: Debug  | -vvv: Trace {n}
    ///
    /// Note that the program will still output warnings by default, even when this flag is off.
    /// Use The --quiet/-q to disable them
    #[clap(short='v', long, parse(from_occurrences), global=true)]
    pub verbose: u8,

    /// Disable warnings.
    ///
    /// By default, warnings are emmited and redirected to the console, even when verbose mode is off.
    /// Use this argument to disable this. Only errors will be displayed.
    #[clap(short='q', long, global=true)]
    pub quiet: bool,

    #[clap(subcommand)]
    pub commands: Commands,
}

impl Cli {
    /// Logger verbosity level requested by the user. `--quiet` takes precedence over `--verbose`
    #[must_use]
    pub fn verbosity(&self) -> u8 {
        if self.quiet {0} else {self.verbose.saturating_add(1)}
    }

    /// Serialize command line arguments within a `.yaml` file.
    ///
    /// # Behavior
    /// - File naming follows the convention '{current time}-{module name}.yaml'. current time follows the format
    ///   `YYYY`-`MM`-`DD`T`hhmmss`
    /// - File is written at the root of the user-provided `--output-dir` folder.
    /// - Returns the path of the serialized file, or `None` if the subcommand is not serializable.
    ///
    /// # Errors
    /// - if `serde_yaml` fails to parse `Self` to a string.
    /// - if the output file cannot be written.
    pub fn serialize(&self) -> Result<Option<PathBuf>> {
        let output_dir = match &self.commands {
            Commands::Infer {common, model: _} => &common.output_dir,
            Commands::FromYaml {yaml: _}       => return Ok(None),
        };

        // Parse arguments to yaml and print to console.
        let serialized = serde_yaml::to_string(&self)
            .map_err(ParserError::Serialize)
            .loc("While serializing command line arguments")?;
        debug!("\n---- Command line args ----\n{serialized}\n---");

        let current_time = chrono::offset::Local::now().format("%Y-%m-%dT%H%M%S").to_string();
        let output_file = output_dir.join(format!("{current_time}-infer.yaml"));

        std::fs::write(&output_file, serialized)
            .map_err(|e| ParserError::WriteArgs(output_file.display().to_string(), e))
            .loc("While serializing command line arguments")?;
        Ok(Some(output_file))
    }

    /// Deserialize a `.yaml` file into Command line arguments.
    ///
    /// # Errors
    /// - if the provided `.yaml` is invalid, or does not carry read permissions
    /// - if `serde_yaml` fails to parse the provided file to `Self`.
    pub fn deserialize(yaml: &Path) -> Result<Self> {
        let loc_msg = "While deserializing command line arguments";
        let file = File::open(yaml)
            .map_err(|e| ParserError::OpenYaml(yaml.display().to_string(), e))
            .loc(loc_msg)?;
        serde_yaml::from_reader(file)
            .map_err(|e| ParserError::Deserialize(yaml.display().to_string(), e))
            .loc(loc_msg)
    }
}

#[derive(Subcommand, Debug, Serialize, Deserialize)]
pub enum Commands {
    /// Compute the posterior gene-count and trait distributions of every individual within a pedigree.
    ///
    /// Inference is exact: every assignment of gene copies and trait status that is consistent with the
    /// observed evidence is enumerated. Note that the number of such assignments grows exponentially with
    /// the size of the pedigree.
    Infer {
        #[clap(flatten)]
        common: Common,
        #[clap(flatten)]
        model: Model,
    },

    /// Run heredity-rs using a previously generated .yaml configuration file.
    ///
    /// This allows users to easily re-apply a heredity-rs command using the exact same parameters
    /// and arguments.
    FromYaml {
        yaml: PathBuf,
    },
}

#[derive(Parser, Debug, Serialize, Deserialize)]
pub struct Common {
    /// Input pedigree definition file.
    ///
    /// Comma-separated file, with a header defining the columns 'name', 'mother', 'father' and 'trait'
    /// (in any order). Parents may be left empty. Trait status must either be '1' (present), '0' (absent)
    /// or left empty (unknown).{n}
    /// Example:{n}
    ///   name,mother,father,trait{n}
    ///   Harry,Lily,James,{n}
    ///   James,,,1{n}
    ///   Lily,,,0{n}
    #[clap(short, long, parse(try_from_os_str=valid_input_file))]
    pub pedigree: PathBuf,

    /// Output directory where results will be written.
    ///
    /// Note that heredity-rs will create the specified leaf directory if it is not present, but does not
    /// allow itself from creating parent directories.
    #[clap(short, long, default_value("heredity-output"), parse(try_from_os_str=valid_output_dir))]
    pub output_dir: PathBuf,

    /// Overwrite existing output files.
    ///
    /// By default, heredity-rs does not allow itself from overwriting existing results files. Use this flag
    /// to force this behaviour.
    #[clap(short='w', long)]
    pub overwrite: bool,

    /// Number of worker threads used during enumeration.
    #[clap(short='@', long, default_value("1"), parse(try_from_str=parse_threads))]
    pub threads: usize,

    /// Number of hypotheses processed by a single task.
    ///
    /// Smaller chunks balance the workload more evenly across threads, at the cost of a higher scheduling
    /// overhead.
    #[clap(long, default_value("4096"), parse(try_from_str=parse_chunk_size))]
    pub chunk_size: u64,

    /// Number of decimals used when printing posterior probabilities.
    #[clap(long, default_value("4"))]
    pub precision: usize,
}

/// Inheritance model parameters.
#[derive(Parser, Debug, Default, Serialize, Deserialize)]
pub struct Model {
    /// Inheritance model definition file (.yaml).
    ///
    /// Must define the fields 'mutation_rate', 'gene_prior' ('zero', 'one', 'two') and 'trait_given' (for
    /// each gene count: 'present', 'absent'). The reference model is used when this argument is missing:{n}
    ///   mutation_rate: 0.01{n}
    ///   gene_prior: {zero: 0.96, one: 0.03, two: 0.01}{n}
    ///   trait_given:{n}
    ///     zero: {present: 0.01, absent: 0.99}{n}
    ///     one:  {present: 0.56, absent: 0.44}{n}
    ///     two:  {present: 0.65, absent: 0.35}{n}
    #[clap(short, long, required(false), parse(try_from_os_str=valid_input_file))]
    pub model: Option<PathBuf>,

    /// Override the mutation rate of the inheritance model.
    ///
    /// Probability that a transmitted gene copy flips state, between 0 and 1.
    #[clap(long, required(false), parse(try_from_str=parse_probability))]
    pub mutation_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub enum FileEntity {File, Directory}

impl Display for FileEntity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::File      => write!(f, "File"),
            Self::Directory => write!(f, "Directory"),
        }
    }
}

impl FileEntity {
    fn validate(&self, path: &Path) -> Result<(), ParserError> {
        use ParserError::InvalidFileEntity;
        let valid = match self {
            Self::File      => path.is_file(),
            Self::Directory => path.is_dir()
        };

        if valid {
            Ok(())
        } else {
            Err(InvalidFileEntity(*self, path.display().to_string()))
        }
    }
}

fn assert_filesystem_entity_is_valid(s: &OsStr, entity: &FileEntity) -> Result<()> {
    use ParserError::MissingFileEntity;
    let path = Path::new(s);
    if ! path.exists() {
        return Err(MissingFileEntity(*entity, path.display().to_string()))
            .loc("While parsing arguments.")
    }

    entity.validate(path).loc("While parsing arguments.")
}

fn valid_input_file(s: &OsStr) -> Result<PathBuf> {
    assert_filesystem_entity_is_valid(s, &FileEntity::File)
        .loc("While checking for file validity")?;
    Ok(PathBuf::from(s))
}

fn valid_output_dir(s: &OsStr) -> Result<PathBuf> {
    let path = Path::new(s);
    if ! path.exists() {
        std::fs::create_dir(path)
            .map_err(|e| ParserError::CreateOutputDir(path.display().to_string(), e))
            .loc("While creating output directory")?;
    }
    assert_filesystem_entity_is_valid(s, &FileEntity::Directory)
        .loc("While checking for directory validity")?;
    Ok(PathBuf::from(s))
}

fn parse_positive<T>(s: &str, arg: &'static str) -> Result<T>
where
    T: std::str::FromStr + Default + PartialOrd,
{
    let value = s.trim().parse::<T>()
        .map_err(|_| ParserError::ParseNumber(s.to_string()))
        .with_loc(|| format!("While parsing --{arg}"))?;
    if value <= T::default() {
        return Err(ParserError::NonPositive(arg)).with_loc(|| format!("While parsing --{arg}"))
    }
    Ok(value)
}

fn parse_threads(s: &str) -> Result<usize> {
    parse_positive(s, "threads")
}

fn parse_chunk_size(s: &str) -> Result<u64> {
    parse_positive(s, "chunk-size")
}

fn parse_probability(s: &str) -> Result<f64> {
    use ParserError::{ParseNumber, ParseRatio};
    const MIN_PROB: f64 = 0.0;
    const MAX_PROB: f64 = 1.0;

    let prob = s.trim().parse::<f64>()
        .map_err(|_| ParseNumber(s.to_string()))
        .with_loc(|| format!("While parsing {s}"))?;

    // Ensure the user input lies between the [0 - 1] range.
    match (MIN_PROB..=MAX_PROB).contains(&prob) {
        true  => Ok(prob),
        false => Err(ParseRatio(MIN_PROB, MAX_PROB)).with_loc(|| format!("While parsing {s}"))
    }
}
