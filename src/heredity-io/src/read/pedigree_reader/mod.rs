use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use ahash::AHashMap;
use log::{debug, info};
use located_error::prelude::*;

use inference::{Pedigree, Person, TraitObservation};

mod error;
pub use error::PedigreeReaderError;

/// Field separator of pedigree files.
pub const PEDIGREE_SEPARATOR: char = ',';

/// Required pedigree columns.
const COLUMNS: [&str; 4] = ["name", "mother", "father", "trait"];

/// Index of each required column within a pedigree record.
#[derive(Debug, Clone, Copy)]
struct Header {
    name  : usize,
    mother: usize,
    father: usize,
    traits: usize,
    width : usize,
}

impl Header {
    /// Locate every required column within a header line. Extra columns are ignored.
    fn parse(line: &str) -> Result<Self> {
        use PedigreeReaderError::{DuplicateColumn, MissingColumn};
        let mut columns: AHashMap<&str, usize> = AHashMap::new();
        for (i, column) in line.split(PEDIGREE_SEPARATOR).map(str::trim).enumerate() {
            if columns.insert(column, i).is_some() {
                return Err(DuplicateColumn(column.to_string())).loc("While parsing the pedigree header")
            }
        }

        let find = |column: &'static str| columns.get(column).copied()
            .ok_or(MissingColumn(column))
            .loc("While parsing the pedigree header");

        let [name, mother, father, traits] = COLUMNS;
        Ok(Self {
            name  : find(name)?,
            mother: find(mother)?,
            father: find(father)?,
            traits: find(traits)?,
            width : columns.len(),
        })
    }

    /// Parse a single pedigree record into a `Person`.
    fn record(&self, line: &str) -> Result<Person> {
        use PedigreeReaderError::{EmptyName, FieldCount};
        let fields: Vec<&str> = line.split(PEDIGREE_SEPARATOR).map(str::trim).collect();
        if fields.len() != self.width {
            return Err(FieldCount{expected: self.width, found: fields.len()}).loc("While parsing pedigree record")
        }

        let name = fields[self.name];
        if name.is_empty() {
            return Err(EmptyName).loc("While parsing pedigree record")
        }

        let parent = |i: usize| Some(fields[i]).filter(|parent| !parent.is_empty());
        let observed: TraitObservation = fields[self.traits].parse()
            .with_loc(|| format!("While parsing the trait status of '{name}'"))?;
        Ok(Person::new(name, parent(self.mother), parent(self.father), observed))
    }
}

/// Pedigree definition file reader.
/// ### File characteristics:
/// - Comma-separated fields, with a mandatory header line.
/// - Columns: `name`, `mother`, `father`, `trait` (in any order). Extra columns are ignored.
/// - `mother` and `father` may be left empty. `trait` is either `1` (present), `0` (absent), or empty (unknown).
/// - Blank lines are skipped.
/// ### Fields:
/// - `source_file`: path to the source pedigree file.
/// - `pedigree`   : parsed pedigree.
#[derive(Debug, Clone)]
pub struct PedigreeReader {
    pub source_file: PathBuf,
    pub pedigree   : Pedigree,
}

impl PedigreeReader {
    /// Read and validate a pedigree definition file.
    ///
    /// # Errors
    /// - if the file cannot be opened or read.
    /// - if the header or any record is malformed.
    /// - if the pedigree contains duplicate individuals, or an ancestry cycle.
    pub fn new(path: &Path) -> Result<Self> {
        let loc_msg = || format!("While attempting to read pedigree file '{}'", path.display());
        let file = File::open(path).map_err(PedigreeReaderError::OpenFile).with_loc(loc_msg)?;
        let pedigree = Self::parse(BufReader::new(file)).with_loc(loc_msg)?;
        info!("Found {} individuals within '{}'", pedigree.len(), path.display());
        Ok(Self { source_file: path.to_path_buf(), pedigree })
    }

    /// Parse a pedigree from any buffered source.
    ///
    /// # Errors
    /// - if the header or any record is malformed.
    /// - if the pedigree contains duplicate individuals, or an ancestry cycle.
    pub fn parse<R: BufRead>(source: R) -> Result<Pedigree> {
        use PedigreeReaderError::{MissingHeader, ReadLine};
        let loc_msg = |ctxt: &str, i: usize| format!("{ctxt} while parsing line n°{i} of the pedigree file");

        let mut header: Option<Header> = None;
        let mut pedigree = Pedigree::new();
        for (i, line) in source.lines().enumerate().map(|(i, line)| (i + 1, line)) {
            let line = line.map_err(ReadLine).with_loc(|| loc_msg("Failed to read line", i))?;
            if line.trim().is_empty() {
                continue
            }

            let Some(columns) = header else {
                header = Some(Header::parse(&line).with_loc(|| loc_msg("Invalid header", i))?);
                continue
            };

            let person = columns.record(&line).with_loc(|| loc_msg("Invalid record", i))?;
            debug!("{person}");
            pedigree.add_person(person).with_loc(|| loc_msg("Failed to add individual", i))?;
        }

        if header.is_none() {
            return Err(MissingHeader).loc("While parsing the pedigree file")
        }

        pedigree.validate().loc("While validating the pedigree's ancestry")?;
        Ok(pedigree)
    }

    #[must_use]
    pub fn into_pedigree(self) -> Pedigree {
        self.pedigree
    }
}
