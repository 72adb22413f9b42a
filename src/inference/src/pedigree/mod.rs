use std::collections::BTreeMap;

use ahash::AHashMap;
use log::{debug, warn};

#[cfg(test)] pub(crate) mod tests;

mod person;
pub use person::{Person, TraitObservation};

mod error;
pub use error::PedigreeError;

/// Resolved reference to one of the parents of an individual.
/// - `Known(i)`: the parent is the `i`-th individual of the pedigree.
/// - `Unknown` : the parent is unreferenced, or references a name that is missing from the pedigree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentSlot {
    Known(usize),
    Unknown,
}

/// Resolved parentage of an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lineage {
    /// No parent is referenced.
    Founder,
    /// At least one parent is referenced.
    Offspring{mother: ParentSlot, father: ParentSlot},
}

/// A pedigree of individuals, indexed by name.
///
/// Individuals are kept in lexicographic order of their names: the position of an individual within
/// this order is its index, and is stable for as long as the pedigree is not modified.
#[derive(Debug, Clone, Default)]
pub struct Pedigree {
    persons: BTreeMap<String, Person>,
}

impl Pedigree {
    /// Instantiate a blank pedigree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include a new individual within this pedigree.
    ///
    /// # Errors
    /// - `DuplicateIndividual` if an individual with the same name was already included.
    pub fn add_person(&mut self, person: Person) -> Result<(), PedigreeError> {
        if self.persons.contains_key(person.name()) {
            return Err(PedigreeError::DuplicateIndividual(person.name().to_string()))
        }
        self.persons.insert(person.name().to_string(), person);
        Ok(())
    }

    /// Build a pedigree from a collection of individuals.
    ///
    /// # Errors
    /// - if any name is duplicated.
    pub fn from_persons(persons: impl IntoIterator<Item = Person>) -> Result<Self, PedigreeError> {
        let mut pedigree = Self::new();
        for person in persons {
            pedigree.add_person(person)?;
        }
        Ok(pedigree)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Person> {
        self.persons.get(name)
    }

    /// Index of the individual named `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.persons.keys().position(|key| key == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Iterate over individuals, in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    /// Names of every individual, in index order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.persons.keys().cloned().collect()
    }

    /// Observed trait status of every individual, in index order.
    #[must_use]
    pub fn observations(&self) -> Vec<TraitObservation> {
        self.iter().map(Person::observed).collect()
    }

    /// Resolve the parentage of every individual into index-based `Lineage`s. (indexed by individual).
    /// Parent names that cannot be found within the pedigree are resolved as `ParentSlot::Unknown`.
    ///
    /// # Errors
    /// - `CyclicAncestry` if any individual is its own ancestor.
    pub fn lineages(&self) -> Result<Vec<Lineage>, PedigreeError> {
        let index: AHashMap<&str, usize> = self.persons.keys()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let resolve = |child: &str, parent: Option<&str>| match parent {
            None       => ParentSlot::Unknown,
            Some(name) => match index.get(name) {
                Some(&i) => ParentSlot::Known(i),
                None     => {
                    warn!("Parent '{name}' of '{child}' is missing from the pedigree. Its genotype will be marginalized.");
                    ParentSlot::Unknown
                }
            }
        };

        let lineages: Vec<Lineage> = self.iter().map(|person| {
            if person.is_founder() {
                return Lineage::Founder
            }
            if person.has_single_parent() {
                debug!("'{}' has a single recorded parent. The missing parent's genotype will be marginalized.", person.name());
            }
            Lineage::Offspring {
                mother: resolve(person.name(), person.mother()),
                father: resolve(person.name(), person.father()),
            }
        }).collect();

        self.check_acyclic(&lineages)?;
        Ok(lineages)
    }

    /// Ensure that no individual is its own ancestor, using an iterative depth-first search on the
    /// child -> parent graph.
    fn check_acyclic(&self, lineages: &[Lineage]) -> Result<(), PedigreeError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {Unvisited, InProgress, Done}

        let known_parents = |i: usize| -> Vec<usize> {
            match lineages[i] {
                Lineage::Founder => Vec::new(),
                Lineage::Offspring{mother, father} => [mother, father].into_iter()
                    .filter_map(|slot| match slot {
                        ParentSlot::Known(p) => Some(p),
                        ParentSlot::Unknown  => None,
                    })
                    .collect()
            }
        };

        let mut marks = vec![Mark::Unvisited; lineages.len()];
        for root in 0..lineages.len() {
            if marks[root] != Mark::Unvisited {
                continue
            }
            // ---- Stack of (node, remaining parents to visit)
            let mut stack = vec![(root, known_parents(root))];
            marks[root] = Mark::InProgress;
            while let Some((node, parents)) = stack.last_mut() {
                match parents.pop() {
                    Some(parent) => match marks[parent] {
                        Mark::InProgress => {
                            let name = self.persons.keys().nth(parent).cloned().unwrap_or_default();
                            return Err(PedigreeError::CyclicAncestry(name))
                        },
                        Mark::Unvisited => {
                            marks[parent] = Mark::InProgress;
                            stack.push((parent, known_parents(parent)));
                        },
                        Mark::Done => (),
                    },
                    None => {
                        marks[*node] = Mark::Done;
                        stack.pop();
                    }
                }
            }
        }
        Ok(())
    }

    /// Sanity checks performed before running inference.
    ///
    /// # Errors
    /// - if the ancestry graph contains a cycle.
    pub fn validate(&self) -> Result<(), PedigreeError> {
        self.lineages().map(|_| ())
    }
}
