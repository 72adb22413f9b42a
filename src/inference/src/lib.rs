pub mod model;
pub use model::{GeneCount, ModelParams, ProbabilityModel};

pub mod pedigree;
pub use pedigree::{Pedigree, Person, TraitObservation};

pub mod hypothesis;
pub use hypothesis::{Hypothesis, HypothesisSpace};

pub mod evaluator;
pub use evaluator::{Evaluator, JointDistribution};

pub mod posteriors;
pub use posteriors::{PersonPosterior, Posteriors};

pub mod engine;
pub use engine::PosteriorEngine;
