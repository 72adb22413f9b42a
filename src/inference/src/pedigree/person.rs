use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    str::FromStr,
};

use super::PedigreeError;

/// Space padding lengths used for `std::fmt::Display` of Person
const NAME_DISPLAY_LEN   : usize = 10;
const PARENTS_DISPLAY_LEN: usize = 25;

/// Observed trait status of an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraitObservation {
    Present,
    Absent,
    #[default]
    Unknown,
}

impl TraitObservation {
    /// `Some(has_trait)` if the trait was observed, `None` otherwise.
    #[must_use]
    pub fn value(&self) -> Option<bool> {
        match self {
            Self::Present => Some(true),
            Self::Absent  => Some(false),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        self.value().is_some()
    }
}

impl From<Option<bool>> for TraitObservation {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true)  => Self::Present,
            Some(false) => Self::Absent,
            None        => Self::Unknown,
        }
    }
}

impl FromStr for TraitObservation {
    type Err = PedigreeError;

    /// Parse a trait marker: `1` (present), `0` (absent) or an empty field (unknown).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Present),
            "0" => Ok(Self::Absent),
            ""  => Ok(Self::Unknown),
            other => Err(PedigreeError::InvalidTraitMarker(other.to_string())),
        }
    }
}

impl Display for TraitObservation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Present => "present",
            Self::Absent  => "absent",
            Self::Unknown => "unknown",
        })
    }
}

/// Pedigree member.
/// # Fields:
/// - `name`    : unique name of the individual.
/// - `mother`  : optional name of the individual's mother. May reference a name missing from the pedigree.
/// - `father`  : optional name of the individual's father. May reference a name missing from the pedigree.
/// - `observed`: observed trait status.
#[derive(Debug, Clone)]
pub struct Person {
    name    : String,
    mother  : Option<String>,
    father  : Option<String>,
    observed: TraitObservation,
}

impl Person {
    pub fn new(name: &str, mother: Option<&str>, father: Option<&str>, observed: TraitObservation) -> Self {
        Self {
            name    : name.to_string(),
            mother  : mother.map(str::to_string),
            father  : father.map(str::to_string),
            observed
        }
    }

    /// Instantiate a person with no recorded parents.
    pub fn founder(name: &str, observed: TraitObservation) -> Self {
        Self::new(name, None, None, observed)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn mother(&self) -> Option<&str> {
        self.mother.as_deref()
    }

    #[must_use]
    pub fn father(&self) -> Option<&str> {
        self.father.as_deref()
    }

    #[must_use]
    pub fn observed(&self) -> TraitObservation {
        self.observed
    }

    /// `true` if neither the mother nor the father is referenced.
    #[inline]
    #[must_use]
    pub fn is_founder(&self) -> bool {
        self.mother.is_none() && self.father.is_none()
    }

    /// `true` if exactly one of the parents is referenced.
    #[must_use]
    pub fn has_single_parent(&self) -> bool {
        self.mother.is_some() != self.father.is_some()
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let parents = match self.is_founder() {
            true  => "None".to_string(),
            false => format!("{} <-> {}", self.mother().unwrap_or("?"), self.father().unwrap_or("?"))
        };
        write!(f, "name: {: <NAME_DISPLAY_LEN$} - parents: {: <PARENTS_DISPLAY_LEN$} - trait: {}", self.name, parents, self.observed)
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Person) -> bool {
        self.name == other.name
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Ord for Person {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl PartialOrd for Person {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
