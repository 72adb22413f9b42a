use indicatif::ProgressBar;
use log::{debug, info, warn};
use rayon::prelude::*;

use located_error::prelude::*;

use crate::{
    evaluator::{Evaluator, JointDistribution},
    hypothesis::HypothesisSpace,
    model::ProbabilityModel,
    pedigree::Pedigree,
    posteriors::Posteriors,
};

mod error;
pub use error::InferenceError;

/// Default number of hypotheses walked by a single task.
pub const DEFAULT_CHUNK_SIZE: u64 = 4096;

/// Hypothesis spaces above this size trigger a warning before enumeration.
const LARGE_SPACE_WARNING: u64 = 1 << 32;

/// Exact inference driver: enumerates every hypothesis consistent with the evidence, evaluates its joint
/// probability and accumulates it within per-individual posteriors.
///
/// The hypothesis space is split into chunks of `chunk_size` contiguous indices. With more than one thread,
/// each rayon worker folds its chunks into a partial `Posteriors`, which are then reduced together.
/// # Fields
/// - `names`     : individual names, in pedigree index order.
/// - `space`     : every consistent hypothesis.
/// - `evaluator` : joint probability evaluator of the pedigree.
/// - `threads`   : number of worker threads.
/// - `chunk_size`: number of hypotheses per task.
pub struct PosteriorEngine<'a> {
    names     : Vec<String>,
    space     : HypothesisSpace,
    evaluator : Evaluator<'a>,
    threads   : usize,
    chunk_size: u64,
}

impl<'a> PosteriorEngine<'a> {
    /// # Errors
    /// - if the pedigree contains an ancestry cycle.
    /// - if the hypothesis space is too large to be addressed.
    pub fn new(pedigree: &Pedigree, model: &'a ProbabilityModel) -> Result<Self> {
        let evaluator = Evaluator::new(pedigree, model).loc("While resolving the pedigree's parentage")?;
        let space = HypothesisSpace::from_pedigree(pedigree).loc("While building the hypothesis space")?;
        debug!("Hypothesis space: {} individuals, {} unobserved trait(s), {} hypotheses", space.population(), space.unobserved(), space.len());
        Ok(Self { names: pedigree.names(), space, evaluator, threads: 1, chunk_size: DEFAULT_CHUNK_SIZE })
    }

    /// # Errors
    /// - `InvalidThreads` if `threads` is zero.
    pub fn with_threads(mut self, threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(InferenceError::InvalidThreads).loc("While setting the number of inference threads")
        }
        self.threads = threads;
        Ok(self)
    }

    /// # Errors
    /// - `InvalidChunkSize` if `chunk_size` is zero.
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Result<Self> {
        if chunk_size == 0 {
            return Err(InferenceError::InvalidChunkSize).loc("While setting the inference chunk size")
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }

    #[must_use]
    pub fn space(&self) -> &HypothesisSpace {
        &self.space
    }

    /// Number of chunks the hypothesis space is split into. Use this as the length of the progress bar.
    #[must_use]
    pub fn n_chunks(&self) -> u64 {
        n_chunks(self.space.len(), self.chunk_size)
    }

    /// Enumerate the hypothesis space and return the raw, unnormalized posteriors.
    ///
    /// # Errors
    /// - if the rayon thread pool cannot be built.
    pub fn run(&self, progress: &ProgressBar) -> Result<Posteriors> {
        if self.space.len() > LARGE_SPACE_WARNING {
            warn!("Enumerating {} hypotheses. This may take a while...", self.space.len());
        }
        info!("Enumerating {} hypotheses using {} thread(s)...", self.space.len(), self.threads);
        let template = Posteriors::new(&self.names);
        accumulate(&self.space, &self.evaluator, &template, self.threads, self.chunk_size, progress)
    }

    /// Enumerate the hypothesis space and return normalized posteriors.
    ///
    /// # Errors
    /// - if the rayon thread pool cannot be built.
    /// - if any distribution ends up with zero mass.
    pub fn infer(&self, progress: &ProgressBar) -> Result<Posteriors> {
        let raw = self.run(progress)?;
        raw.finalize().loc("While normalizing posteriors")
    }
}

/// Number of chunks of size `chunk_size` required to cover `len` hypotheses.
fn n_chunks(len: u64, chunk_size: u64) -> u64 {
    len / chunk_size + u64::from(len % chunk_size != 0)
}

/// Walk every hypothesis of `space`, and accumulate its joint probability under `distribution` into a fresh
/// copy of `template`. `progress` is incremented once per chunk.
///
/// # Errors
/// - if `threads` > 1 and the rayon thread pool cannot be built.
pub fn accumulate<D>(
    space       : &HypothesisSpace,
    distribution: &D,
    template    : &Posteriors,
    threads     : usize,
    chunk_size  : u64,
    progress    : &ProgressBar
) -> Result<Posteriors>
where
    D: JointDistribution + Sync
{
    let n_chunks = n_chunks(space.len(), chunk_size);
    let walk_chunk = |mut acc: Posteriors, chunk: u64| {
        let start = chunk.saturating_mul(chunk_size);
        space.walk(start..start.saturating_add(chunk_size), |hypothesis| {
            acc.accumulate(hypothesis, distribution.joint_probability(hypothesis));
        });
        progress.inc(1);
        acc
    };

    // ---- Sequential walk
    if threads <= 1 {
        let posteriors = (0..n_chunks).fold(template.empty_like(), walk_chunk);
        progress.finish();
        return Ok(posteriors)
    }

    // ---- Parallel fold/reduce
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(InferenceError::BuildThreadPool)
        .loc("While attempting to build the inference thread pool")?;

    let posteriors = pool.install(|| {
        (0..n_chunks).into_par_iter()
            .fold(|| template.empty_like(), walk_chunk)
            .reduce(|| template.empty_like(), |left, right| left.merge(&right))
    });
    progress.finish();
    Ok(posteriors)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        evaluator::MockJointDistribution,
        hypothesis::Hypothesis,
        model::GeneCount,
        pedigree::tests::common,
    };
    use float_cmp::approx_eq;

    #[test]
    fn every_consistent_hypothesis_is_evaluated_once() -> Result<()> {
        let pedigree = common::mock_trio();
        let space = HypothesisSpace::from_pedigree(&pedigree)?;
        let (james, lily) = (1, 2);

        let mut mock = MockJointDistribution::new();
        mock.expect_joint_probability()
            .withf(move |h: &Hypothesis| h.has_trait(james) && !h.has_trait(lily))
            .times(usize::try_from(space.len())?)
            .return_const(1.0);

        let template = Posteriors::new(&pedigree.names());
        let raw = accumulate(&space, &mock, &template, 1, 5, &ProgressBar::hidden())?;
        let james = raw.get("James").expect("James should be found");
        assert_eq!(james.trait_distribution().total(), space.len() as f64);
        Ok(())
    }

    #[test]
    fn mass_follows_mocked_distribution() -> Result<()> {
        let pedigree = common::mock_founder_pedigree("James", None);
        let space = HypothesisSpace::from_pedigree(&pedigree)?;

        // ---- Only hypotheses where James carries two copies carry mass.
        let mut mock = MockJointDistribution::new();
        mock.expect_joint_probability()
            .returning(|h: &Hypothesis| if h.gene(0) == GeneCount::Two { 0.5 } else { 0.0 });

        let template = Posteriors::new(&pedigree.names());
        let posteriors = accumulate(&space, &mock, &template, 2, 1, &ProgressBar::hidden())?.finalize()?;
        let james = posteriors.get("James").expect("James should be found");
        assert!(approx_eq!(f64, james.gene(GeneCount::Two), 1.0, ulps = 2));
        assert!(approx_eq!(f64, james.has_trait(true), 0.5, ulps = 2));
        Ok(())
    }

    #[test]
    fn parallel_matches_sequential() -> Result<()> {
        let model = ProbabilityModel::default();
        let pedigree = common::mock_trio();
        let sequential = PosteriorEngine::new(&pedigree, &model)?.with_chunk_size(3)?;
        let parallel = PosteriorEngine::new(&pedigree, &model)?.with_chunk_size(3)?.with_threads(4)?;

        let sequential = sequential.infer(&ProgressBar::hidden())?;
        let parallel   = parallel.infer(&ProgressBar::hidden())?;
        for (seq, par) in sequential.iter().zip(parallel.iter()) {
            assert_eq!(seq.name(), par.name());
            for gene in GeneCount::ALL {
                assert!(approx_eq!(f64, seq.gene(gene), par.gene(gene), epsilon = 1e-12));
            }
            assert!(approx_eq!(f64, seq.has_trait(true), par.has_trait(true), epsilon = 1e-12));
        }
        Ok(())
    }

    #[test]
    fn progress_counts_chunks() -> Result<()> {
        let model = ProbabilityModel::default();
        let pedigree = common::mock_trio();
        let engine = PosteriorEngine::new(&pedigree, &model)?.with_chunk_size(10)?;
        assert_eq!(engine.n_chunks(), 6); // 54 hypotheses.

        let progress = ProgressBar::hidden();
        engine.run(&progress)?;
        assert_eq!(progress.position(), 6);
        Ok(())
    }

    #[test]
    fn invalid_settings() -> Result<()> {
        let model = ProbabilityModel::default();
        let pedigree = common::mock_trio();
        assert!(PosteriorEngine::new(&pedigree, &model)?.with_threads(0).is_err());
        assert!(PosteriorEngine::new(&pedigree, &model)?.with_chunk_size(0).is_err());
        Ok(())
    }
}
