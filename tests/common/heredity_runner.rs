use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use inference::Posteriors;

use super::Fixture;

/// Drives `heredity_rs::run()` through the command line parser, using temporary copies of test data.
pub struct HeredityRunner {
    cli       : parser::Cli,
    pedigree  : Fixture,
    output_dir: Fixture,
}

impl HeredityRunner {
    /// Path of the tabulated posteriors file produced by this run.
    pub fn output_posteriors(&self) -> PathBuf {
        let stem = self.pedigree.file_stem().expect("Invalid pedigree filename");
        self.output_dir.join(stem).with_extension("posteriors")
    }

    pub fn output_dir(&self) -> &Fixture {
        &self.output_dir
    }

    pub fn cli(&self) -> &parser::Cli {
        &self.cli
    }

    /// Run the 'infer' module and return the computed posteriors.
    pub fn run(&self) -> Result<Posteriors> {
        let parser::Commands::Infer {common, model} = &self.cli.commands else {
            panic!("HeredityRunner only drives the 'infer' module");
        };
        heredity_rs::infer(common, model)
    }
}

#[derive(Default)]
pub struct HeredityRunnerBuilder {
    pedigree     : Option<String>,
    model        : Option<String>,
    output_dir   : Option<String>,
    mutation_rate: Option<f64>,
    threads      : Option<usize>,
    chunk_size   : Option<u64>,
    overwrite    : bool,
}

impl HeredityRunnerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pedigree(mut self, pedigree: &str) -> Self {
        self.pedigree = Some(pedigree.to_string());
        self
    }

    pub fn set_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    pub fn set_output_dir(mut self, output_dir: &str) -> Self {
        self.output_dir = Some(output_dir.to_string());
        self
    }

    pub fn set_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = Some(rate);
        self
    }

    pub fn set_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn set_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    pub fn build(self) -> Result<HeredityRunner> {
        let pedigree   = Fixture::copy(self.pedigree.as_deref().unwrap_or("pedigree/family0.csv"));
        let output_dir = Fixture::blank(self.output_dir.as_deref().unwrap_or("heredity-test-output"));

        let mut args = vec![
            "heredity-rs".to_string(), "infer".to_string(),
            "--pedigree".to_string(), pedigree.to_string(),
            "--output-dir".to_string(), output_dir.to_string(),
        ];

        if let Some(model) = self.model {
            let source: PathBuf = [env!("CARGO_MANIFEST_DIR"), super::fixture::TEST_DATA_DIR, &model].iter().collect();
            args.extend(["--model".to_string(), source.display().to_string()]);
        }
        if let Some(rate) = self.mutation_rate {
            args.extend(["--mutation-rate".to_string(), rate.to_string()]);
        }
        if let Some(threads) = self.threads {
            args.extend(["--threads".to_string(), threads.to_string()]);
        }
        if let Some(chunk_size) = self.chunk_size {
            args.extend(["--chunk-size".to_string(), chunk_size.to_string()]);
        }
        if self.overwrite {
            args.push("--overwrite".to_string());
        }

        let cli = parser::Cli::try_parse_from(args)?;
        Ok(HeredityRunner { cli, pedigree, output_dir })
    }
}
