//! Run command implementation

use anyhow::Result;
use clap::Args;
use spanbench_core::runner::{build_plan, ExperimentConfig};
use std::path::PathBuf;

use crate::error::CliError;
use crate::progress::ProgressReporter;

/// Arguments for the run command
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Datasets to run (default: every dataset in the registry)
    #[arg(value_name = "DATASET")]
    pub dataset_names: Vec<String>,

    /// Workflow subcommand to execute
    #[arg(short = 'C', long, default_value = "spancat", value_name = "NAME")]
    pub subcommand: String,

    /// Number of trials per dataset
    #[arg(short = 'n', long, default_value_t = 3, value_name = "N")]
    pub num_trials: usize,

    /// Training configuration name
    #[arg(short = 'c', long, default_value = "spancat", value_name = "NAME")]
    pub config: String,

    /// GPU id to use (-1 for CPU)
    #[arg(
        short = 'G',
        long,
        default_value_t = 0,
        allow_negative_numbers = true,
        value_name = "ID"
    )]
    pub gpu_id: i32,

    /// Forward the runner's flag to re-run cached steps
    #[arg(long)]
    pub force: bool,

    /// Print the planned commands without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// External project-workflow runner program
    #[arg(long, default_value = "spacy", value_name = "PROGRAM")]
    pub runner: String,

    /// Project directory passed to the runner
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub project_dir: PathBuf,

    /// Dataset registry TOML file (default: built-in registry)
    #[arg(long, value_name = "FILE")]
    pub datasets: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl RunArgs {
    /// Execute the run command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        if self.num_trials == 0 {
            return Err(CliError::ConfigError("num-trials must be at least 1".to_string()).into());
        }

        let registry = super::load_registry(&self.datasets)?;
        let registry = if self.dataset_names.is_empty() {
            registry
        } else {
            registry.select(&self.dataset_names)?
        };

        let config = ExperimentConfig {
            subcommand: self.subcommand.clone(),
            num_trials: self.num_trials,
            config: self.config.clone(),
            gpu_id: self.gpu_id,
            force: self.force,
            runner: self.runner.clone(),
            project_dir: self.project_dir.clone(),
        };
        let plan = build_plan(&config, &registry);
        log::info!(
            "Planned {} invocations ({} trials x {} datasets)",
            plan.len(),
            self.num_trials,
            registry.datasets().len()
        );

        if self.dry_run {
            for trial in &plan {
                println!("{}", trial.command);
            }
            return Ok(());
        }

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_trials(plan.len() as u64);
        for trial in &plan {
            log::info!(
                "trial {} on {}: {}",
                trial.trial_num,
                trial.dataset,
                trial.command
            );
            trial.command.run()?;
            progress.trial_completed(&format!("trial {} ({})", trial.trial_num, trial.dataset));
        }
        progress.finish();

        Ok(())
    }
}
