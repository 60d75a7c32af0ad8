//! Experiment planning and external runner invocation
//!
//! Training and evaluation are owned by an external project-workflow runner;
//! this module only builds and executes its invocations. Commands are held
//! as a program plus a verbatim argument list, so dataset names and
//! configuration values are never re-parsed through a shell.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use crate::dataset::DatasetRegistry;
use crate::error::{Result, SpanbenchError};

/// An external command: program plus verbatim arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a `--vars.<name> <value>` override pair.
    pub fn var(self, name: &str, value: impl fmt::Display) -> Self {
        self.arg(format!("--vars.{name}")).arg(value.to_string())
    }

    /// Run the command to completion, inheriting stdio.
    ///
    /// The child's output streams through so training logs stay visible.
    pub fn run(&self) -> Result<()> {
        log::info!("running: {self}");
        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|e| SpanbenchError::Io {
                path: PathBuf::from(&self.program),
                source: e,
            })?;
        if !status.success() {
            return Err(SpanbenchError::Configuration(format!(
                "command failed with {status}: {self}"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Settings for a multi-trial experiment run
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    /// Workflow subcommand to run
    pub subcommand: String,
    /// Number of trials per dataset
    pub num_trials: usize,
    /// Training configuration name
    pub config: String,
    /// GPU id, -1 for CPU
    pub gpu_id: i32,
    /// Forward the runner's re-run flag
    pub force: bool,
    /// External runner program
    pub runner: String,
    /// Project directory passed to the runner
    pub project_dir: PathBuf,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            subcommand: "spancat".to_string(),
            num_trials: 3,
            config: "spancat".to_string(),
            gpu_id: 0,
            force: false,
            runner: "spacy".to_string(),
            project_dir: PathBuf::from("."),
        }
    }
}

/// One planned runner invocation
#[derive(Debug, Clone)]
pub struct Trial {
    pub trial_num: usize,
    pub dataset: String,
    pub command: CommandSpec,
}

/// Build the full invocation plan: for each trial number, one command per
/// dataset. The trial number doubles as the training seed so trials are
/// reproducible.
pub fn build_plan(config: &ExperimentConfig, registry: &DatasetRegistry) -> Vec<Trial> {
    let mut plan = Vec::with_capacity(config.num_trials * registry.datasets().len());
    for trial_num in 0..config.num_trials {
        for spec in registry.datasets() {
            let mut command = CommandSpec::new(&config.runner)
                .arg("project")
                .arg("run")
                .arg(&config.subcommand)
                .arg(config.project_dir.display().to_string())
                .var("config", &config.config)
                .var("trial_num", trial_num)
                .var("seed", trial_num)
                .var("gpu_id", config.gpu_id)
                .var("dataset", &spec.name)
                .var("lang", &spec.lang)
                .var("vectors", &spec.vectors);
            if config.force {
                command = command.arg("--force");
            }
            plan.push(Trial {
                trial_num,
                dataset: spec.name.clone(),
                command,
            });
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_size_is_trials_times_datasets() {
        let registry = DatasetRegistry::default();
        let config = ExperimentConfig::default();
        let plan = build_plan(&config, &registry);
        assert_eq!(plan.len(), 3 * 5);
    }

    #[test]
    fn test_seed_equals_trial_number() {
        let registry = DatasetRegistry::default();
        let config = ExperimentConfig {
            num_trials: 2,
            ..Default::default()
        };
        let plan = build_plan(&config, &registry);
        let last = plan.last().unwrap();
        assert_eq!(last.trial_num, 1);
        let rendered = last.command.to_string();
        assert!(rendered.contains("--vars.trial_num 1"));
        assert!(rendered.contains("--vars.seed 1"));
    }

    #[test]
    fn test_command_shape() {
        let registry = DatasetRegistry::default();
        let config = ExperimentConfig::default();
        let plan = build_plan(&config, &registry);
        let rendered = plan[0].command.to_string();
        assert!(rendered.starts_with("spacy project run spancat ."));
        assert!(rendered.contains("--vars.dataset anem"));
        assert!(rendered.contains("--vars.lang en"));
        assert!(rendered.contains("--vars.vectors en_core_web_lg"));
        assert!(!rendered.contains("--force"));
    }

    #[test]
    fn test_force_flag_is_forwarded() {
        let registry = DatasetRegistry::default();
        let config = ExperimentConfig {
            force: true,
            ..Default::default()
        };
        let plan = build_plan(&config, &registry);
        assert!(plan[0].command.args.last().unwrap() == "--force");
    }

    #[test]
    fn test_display_quotes_whitespace_args() {
        let cmd = CommandSpec::new("run").arg("--name").arg("two words");
        assert_eq!(cmd.to_string(), "run --name \"two words\"");
    }

    #[test]
    fn test_args_are_kept_verbatim() {
        let cmd = CommandSpec::new("spacy").var("dataset", "nl-conll; rm -rf /");
        assert_eq!(cmd.args, vec!["--vars.dataset", "nl-conll; rm -rf /"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_success_and_failure() {
        assert!(CommandSpec::new("true").run().is_ok());
        let err = CommandSpec::new("false").run().unwrap_err();
        assert!(err.to_string().contains("command failed"));
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_program_is_an_io_error() {
        let err = CommandSpec::new("definitely-not-a-real-program-470").run().unwrap_err();
        assert!(matches!(err, SpanbenchError::Io { .. }));
    }
}
