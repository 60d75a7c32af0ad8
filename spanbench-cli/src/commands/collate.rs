//! Collate command implementation

use anyhow::Result;
use clap::Args;
use spanbench_core::collate::{collate, LoadedTrial};
use std::io;
use std::path::PathBuf;

use crate::error::CliError;
use crate::input::find_score_files;
use crate::output::{render_report, write_json};

/// Arguments for the collate command
#[derive(Debug, Args)]
pub struct CollateArgs {
    /// Metrics directory containing one folder per dataset
    #[arg(value_name = "METRICS_DIR")]
    pub metrics_dir: PathBuf,

    /// Configuration to collate the results from
    #[arg(value_name = "CONFIG", default_value = "spancat")]
    pub config: String,

    /// Output JSON filepath to save the collated scores
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Dataset registry TOML file (default: built-in registry)
    #[arg(long, value_name = "FILE")]
    pub datasets: Option<PathBuf>,

    /// Suppress informational output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CollateArgs {
    /// Execute the collate command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        log::info!(
            "Reporting results for directory '{}' using '{}' config",
            self.metrics_dir.display(),
            self.config
        );

        if !self.metrics_dir.is_dir() {
            return Err(CliError::FileNotFound(self.metrics_dir.display().to_string()).into());
        }

        let registry = super::load_registry(&self.datasets)?;

        let mut datasets = Vec::with_capacity(registry.datasets().len());
        for spec in registry.datasets() {
            let files = find_score_files(&self.metrics_dir, &spec.name, &self.config)?;
            log::debug!("{}: {} score files", spec.name, files.len());

            let mut trials = Vec::with_capacity(files.len());
            for file in &files {
                trials.push(LoadedTrial::load(file)?);
            }
            datasets.push((spec.name.clone(), trials));
        }

        let results = collate(&self.config, datasets)?;
        render_report(&results, &mut io::stdout().lock())?;

        if let Some(path) = &self.output {
            write_json(&results, path)?;
            log::info!("Saved collated scores to {}", path.display());
        }

        Ok(())
    }
}
