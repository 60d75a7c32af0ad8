//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use spanbench_core::DatasetRegistry;
use std::path::PathBuf;

pub mod collate;
pub mod convert;
pub mod run;
pub mod sweep;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Collate per-trial scores into mean/stdev summary tables
    Collate(collate::CollateArgs),

    /// Convert an IOB annotation file to annotated JSON lines
    Convert(convert::ConvertArgs),

    /// Run multi-trial training experiments across datasets
    Run(run::RunArgs),

    /// Expand a hyperparameter sweep and drive its trials
    Sweep(sweep::SweepArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Collate(args) => args.execute(),
            Commands::Convert(args) => args.execute(),
            Commands::Run(args) => args.execute(),
            Commands::Sweep(args) => args.execute(),
        }
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();
    }
}

/// Load the dataset registry, from a TOML file when one is given.
pub(crate) fn load_registry(path: &Option<PathBuf>) -> Result<DatasetRegistry> {
    match path {
        Some(path) => Ok(DatasetRegistry::from_file(path)?),
        None => Ok(DatasetRegistry::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_debug_format() {
        let collate_cmd = Commands::Collate(collate::CollateArgs {
            metrics_dir: PathBuf::from("metrics"),
            config: "spancat".to_string(),
            output: None,
            datasets: None,
            quiet: false,
            verbose: 0,
        });

        let debug_str = format!("{:?}", collate_cmd);
        assert!(debug_str.contains("Collate"));
        assert!(debug_str.contains("metrics"));

        let run_cmd = Commands::Run(run::RunArgs {
            dataset_names: vec!["wnut17".to_string()],
            subcommand: "spancat".to_string(),
            num_trials: 3,
            config: "spancat".to_string(),
            gpu_id: 0,
            force: false,
            dry_run: true,
            runner: "spacy".to_string(),
            project_dir: PathBuf::from("."),
            datasets: None,
            quiet: false,
            verbose: 0,
        });

        let debug_str = format!("{:?}", run_cmd);
        assert!(debug_str.contains("Run"));
        assert!(debug_str.contains("wnut17"));
    }

    #[test]
    fn test_load_registry_default() {
        let registry = load_registry(&None).unwrap();
        assert_eq!(registry.datasets().len(), 5);
    }

    #[test]
    fn test_load_registry_missing_file() {
        let path = Some(PathBuf::from("/nonexistent/datasets.toml"));
        assert!(load_registry(&path).is_err());
    }
}
