use crate::pedigree::{Pedigree, Person, TraitObservation};

/// Mock a single founder individual, with an optional trait observation.
pub fn mock_founder_pedigree(name: &str, observed: Option<bool>) -> Pedigree {
    let mut pedigree = Pedigree::new();
    pedigree.add_person(Person::founder(name, observed.into())).expect("Individual should be includable");
    pedigree
}

/// Mock an offspring and its two founder parents, with no observation whatsoever.
/// # Arguments:
///  - `name`          : name of the offspring (e.g. "child")
///  - `parents_names` : `[mother, father]` names. Defaults to `["mother", "father"]`
pub fn mock_offspring_pedigree(name: &str, parents_names: Option<[&str; 2]>) -> Pedigree {
    let [mother, father] = parents_names.unwrap_or(["mother", "father"]);
    Pedigree::from_persons([
        Person::founder(mother, TraitObservation::Unknown),
        Person::founder(father, TraitObservation::Unknown),
        Person::new(name, Some(mother), Some(father), TraitObservation::Unknown),
    ]).expect("Individuals should be includable")
}

/// Mock the reference trio: Harry (unknown trait), son of Lily (no trait) and James (has the trait)
pub fn mock_trio() -> Pedigree {
    Pedigree::from_persons([
        Person::new("Harry", Some("Lily"), Some("James"), TraitObservation::Unknown),
        Person::founder("James", TraitObservation::Present),
        Person::founder("Lily", TraitObservation::Absent),
    ]).expect("Individuals should be includable")
}
