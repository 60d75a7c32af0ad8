//! Sweep command implementation

use anyhow::Result;
use clap::Args;
use spanbench_core::sweep::{best_outcome, read_trial_metric, trial_command, TrialOutcome};
use spanbench_core::SweepConfig;
use std::path::PathBuf;

use crate::error::CliError;
use crate::progress::ProgressReporter;

/// Arguments for the sweep command
#[derive(Debug, Args)]
pub struct SweepArgs {
    /// Sweep configuration TOML file
    #[arg(value_name = "SWEEP_CONFIG")]
    pub sweep_config: PathBuf,

    /// Maximum number of trials to run
    #[arg(long, default_value_t = 20, value_name = "N")]
    pub count: usize,

    /// Seed for random parameter sampling
    #[arg(long, default_value_t = 0, value_name = "SEED")]
    pub seed: u64,

    /// Directory holding trial-<n>/scores.json files; enables best-trial
    /// selection after the run
    #[arg(long, value_name = "DIR")]
    pub scores_dir: Option<PathBuf>,

    /// External project-workflow runner program
    #[arg(long, default_value = "spacy", value_name = "PROGRAM")]
    pub runner: String,

    /// Workflow subcommand to execute
    #[arg(long, default_value = "spancat", value_name = "NAME")]
    pub subcommand: String,

    /// Project directory passed to the runner
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub project_dir: PathBuf,

    /// Print the planned commands without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl SweepArgs {
    /// Execute the sweep command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        if self.count == 0 {
            return Err(CliError::ConfigError("count must be at least 1".to_string()).into());
        }

        let config = SweepConfig::from_file(&self.sweep_config)?;
        let trials = config.expand(self.count, self.seed)?;
        log::info!(
            "Expanded {} sweep trials targeting '{}'",
            trials.len(),
            config.metric.name
        );

        if self.dry_run {
            for (trial_num, params) in trials.iter().enumerate() {
                let command = trial_command(
                    &self.runner,
                    &self.subcommand,
                    &self.project_dir,
                    trial_num,
                    params,
                );
                println!("{}", command);
            }
            return Ok(());
        }

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_trials(trials.len() as u64);

        let mut outcomes = Vec::with_capacity(trials.len());
        for (trial_num, params) in trials.iter().enumerate() {
            let command = trial_command(
                &self.runner,
                &self.subcommand,
                &self.project_dir,
                trial_num,
                params,
            );
            log::info!("sweep trial {}: {}", trial_num, command);
            command.run()?;

            if let Some(scores_dir) = &self.scores_dir {
                let score = read_trial_metric(scores_dir, trial_num, &config.metric.name)?;
                log::info!("trial {}: {} = {:.4}", trial_num, config.metric.name, score);
                outcomes.push(TrialOutcome {
                    trial_num,
                    params: params.clone(),
                    score,
                });
            }
            progress.trial_completed(&format!("trial {trial_num}"));
        }
        progress.finish();

        if let Some(best) = best_outcome(&outcomes, config.metric.goal) {
            println!(
                "Best trial: {} ({} = {:.4})",
                best.trial_num, config.metric.name, best.score
            );
            for (name, value) in &best.params {
                println!("  {name} = {value}");
            }
        }

        Ok(())
    }
}
