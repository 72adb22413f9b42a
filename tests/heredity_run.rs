mod common;
use common::HeredityRunnerBuilder;

use anyhow::Result;
use clap::Parser;
use float_cmp::approx_eq;
use inference::{model::ModelError, pedigree::PedigreeError, GeneCount};
use itertools::Itertools;
#[cfg(test)] use pretty_assertions::assert_eq;

#[test]
fn family_0() -> Result<()> {
    let runner = HeredityRunnerBuilder::new().set_pedigree("pedigree/family0.csv").build()?;
    runner.run()?;
    validate_file!("test-data/expect/family0.posteriors", runner.output_posteriors());
    Ok(())
}

#[test]
fn family_1() -> Result<()> {
    let runner = HeredityRunnerBuilder::new()
        .set_pedigree("pedigree/family1.csv")
        .set_threads(4)
        .set_chunk_size(64)
        .build()?;
    runner.run()?;
    validate_file!("test-data/expect/family1.posteriors", runner.output_posteriors());
    Ok(())
}

#[test]
fn family_2() -> Result<()> {
    let runner = HeredityRunnerBuilder::new()
        .set_pedigree("pedigree/family2.csv")
        .set_model("model/reference.yaml")
        .build()?;
    runner.run()?;
    validate_file!("test-data/expect/family2.posteriors", runner.output_posteriors());
    Ok(())
}

#[test]
fn threads_do_not_change_results() -> Result<()> {
    let builder = || HeredityRunnerBuilder::new().set_pedigree("pedigree/family2.csv").set_chunk_size(5);
    let sequential = builder().build()?.run()?;
    let parallel   = builder().set_threads(3).build()?.run()?;
    for (seq, par) in sequential.iter().zip_eq(parallel.iter()) {
        assert_eq!(seq.name(), par.name());
        for gene in GeneCount::ALL {
            assert!(approx_eq!(f64, seq.gene(gene), par.gene(gene), epsilon = 1e-12));
        }
        assert!(approx_eq!(f64, seq.has_trait(true), par.has_trait(true), epsilon = 1e-12));
    }
    Ok(())
}

#[test]
fn mutation_rate_override() -> Result<()> {
    let reference = HeredityRunnerBuilder::new().build()?.run()?;
    let no_mutation = HeredityRunnerBuilder::new().set_mutation_rate(0.0).build()?.run()?;
    let harry = |posteriors: &inference::Posteriors| posteriors.get("Harry").map(|p| p.gene(GeneCount::Zero));
    assert!(harry(&reference).is_some());
    assert!(harry(&reference) != harry(&no_mutation));
    Ok(())
}

#[test]
fn overwrite_is_refused_by_default() -> Result<()> {
    let runner = HeredityRunnerBuilder::new().build()?;
    runner.run()?;
    assert!(runner.run().is_err());

    let runner = HeredityRunnerBuilder::new().overwrite().build()?;
    runner.run()?;
    runner.run()?;
    validate_file!("test-data/expect/family0.posteriors", runner.output_posteriors());
    Ok(())
}

#[test]
fn replay_from_yaml() -> Result<()> {
    let runner = HeredityRunnerBuilder::new().set_pedigree("pedigree/family1.csv").overwrite().build()?;
    let yaml = runner.cli().serialize()?.expect("'infer' arguments should be serialized");
    assert!(yaml.starts_with(runner.output_dir().to_path_buf()));
    assert!(!runner.output_posteriors().exists());

    let replay = parser::Cli::try_parse_from(["heredity-rs", "from-yaml", &yaml.display().to_string()])?;
    heredity_rs::run(replay)?;
    validate_file!("test-data/expect/family1.posteriors", runner.output_posteriors());
    Ok(())
}

#[test]
fn cyclic_pedigree() -> Result<()> {
    let runner = HeredityRunnerBuilder::new().set_pedigree("pedigree/cyclic.csv").build()?;
    let err = runner.run().expect_err("A cyclic pedigree should be rejected");
    assert!(matches!(err.downcast_ref::<PedigreeError>(), Some(PedigreeError::CyclicAncestry{..})));
    assert!(!runner.output_posteriors().exists());
    Ok(())
}

#[test]
fn invalid_trait_marker() -> Result<()> {
    let runner = HeredityRunnerBuilder::new().set_pedigree("pedigree/invalid-trait.csv").build()?;
    let err = runner.run().expect_err("An invalid trait marker should be rejected");
    assert!(matches!(err.downcast_ref::<PedigreeError>(), Some(PedigreeError::InvalidTraitMarker{..})));
    Ok(())
}

#[test]
fn unnormalized_model() -> Result<()> {
    let runner = HeredityRunnerBuilder::new().set_model("model/unnormalized.yaml").build()?;
    let err = runner.run().expect_err("An unnormalized model should be rejected");
    assert!(matches!(err.downcast_ref::<ModelError>(), Some(ModelError::UnnormalizedTable{..})));
    Ok(())
}

#[test]
fn invalid_arguments() {
    let parse = |args: &[&str]| parser::Cli::try_parse_from(["heredity-rs", "infer"].iter().chain(args).copied());
    assert!(parse(&["--pedigree", "does/not/exist.csv"]).is_err());
    assert!(HeredityRunnerBuilder::new().set_threads(0).build().is_err());
    assert!(HeredityRunnerBuilder::new().set_chunk_size(0).build().is_err());
    assert!(HeredityRunnerBuilder::new().set_mutation_rate(1.5).build().is_err());
}
