//! Declarative hyperparameter sweeps
//!
//! A sweep configuration names a search method, a target metric, and the
//! parameter space. Grid search expands the cartesian product of value
//! lists; random search draws each parameter uniformly from its bounds with
//! a seeded generator, so a sweep can be re-run bit-for-bit.

use std::fmt;
use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpanbenchError};
use crate::runner::CommandSpec;
use crate::score::{TrialScores, OVERALL_METRICS};

/// Parameter-space search method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    Grid,
    Random,
}

/// Whether the target metric should be maximized or minimized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricGoal {
    Maximize,
    Minimize,
}

/// The sweep's target metric
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricSpec {
    /// Score-file key of the metric
    pub name: String,
    pub goal: MetricGoal,
}

/// One parameter value: integer, float, or text
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
        }
    }
}

/// One searched parameter: either a discrete value list (grid) or uniform
/// bounds (random)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParameterSpec {
    /// Dotted override name, e.g. `components.spancat.suggester.max_size`
    pub name: String,
    #[serde(default)]
    pub values: Option<Vec<ParamValue>>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

/// A declarative sweep definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SweepConfig {
    pub method: SearchMethod,
    pub metric: MetricSpec,
    #[serde(rename = "parameter")]
    pub parameters: Vec<ParameterSpec>,
}

/// The parameter assignments of one sweep trial, in declaration order
pub type TrialParams = Vec<(String, ParamValue)>;

impl SweepConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SpanbenchError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            SpanbenchError::Configuration(format!(
                "failed to parse sweep config '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.parameters.is_empty() {
            return Err(SpanbenchError::Configuration(
                "sweep defines no parameters".to_string(),
            ));
        }
        for param in &self.parameters {
            match (&param.values, param.min, param.max) {
                (Some(values), None, None) => {
                    if values.is_empty() {
                        return Err(SpanbenchError::Configuration(format!(
                            "parameter '{}' has an empty values list",
                            param.name
                        )));
                    }
                }
                (None, Some(min), Some(max)) => {
                    if min >= max {
                        return Err(SpanbenchError::Configuration(format!(
                            "parameter '{}' has min {} >= max {}",
                            param.name, min, max
                        )));
                    }
                }
                _ => {
                    return Err(SpanbenchError::Configuration(format!(
                        "parameter '{}' must define either a values list or min and max bounds",
                        param.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Produce the trial parameter sets for this sweep.
    ///
    /// Grid expansion is capped at `count` when the full product is larger;
    /// random search draws exactly `count` samples from `seed`.
    pub fn expand(&self, count: usize, seed: u64) -> Result<Vec<TrialParams>> {
        self.validate()?;
        match self.method {
            SearchMethod::Grid => {
                let mut trials = self.expand_grid()?;
                if trials.len() > count {
                    log::warn!(
                        "grid has {} combinations, running only the first {}",
                        trials.len(),
                        count
                    );
                    trials.truncate(count);
                }
                Ok(trials)
            }
            SearchMethod::Random => self.sample_random(count, seed),
        }
    }

    /// Cartesian product of all value lists, first parameter varying slowest.
    fn expand_grid(&self) -> Result<Vec<TrialParams>> {
        let mut trials: Vec<TrialParams> = vec![Vec::new()];
        for param in &self.parameters {
            let values = param.values.as_ref().ok_or_else(|| {
                SpanbenchError::Configuration(format!(
                    "grid search requires a values list for parameter '{}'",
                    param.name
                ))
            })?;
            let mut next = Vec::with_capacity(trials.len() * values.len());
            for trial in &trials {
                for value in values {
                    let mut extended = trial.clone();
                    extended.push((param.name.clone(), value.clone()));
                    next.push(extended);
                }
            }
            trials = next;
        }
        Ok(trials)
    }

    fn sample_random(&self, count: usize, seed: u64) -> Result<Vec<TrialParams>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut trials = Vec::with_capacity(count);
        for _ in 0..count {
            let mut params = Vec::with_capacity(self.parameters.len());
            for param in &self.parameters {
                let (min, max) = match (param.min, param.max) {
                    (Some(min), Some(max)) => (min, max),
                    _ => {
                        return Err(SpanbenchError::Configuration(format!(
                            "random search requires min and max bounds for parameter '{}'",
                            param.name
                        )))
                    }
                };
                params.push((param.name.clone(), ParamValue::Float(rng.gen_range(min..max))));
            }
            trials.push(params);
        }
        Ok(trials)
    }
}

/// Build the runner invocation for one sweep trial. The trial number doubles
/// as the training seed, as in the plain experiment runner.
pub fn trial_command(
    runner: &str,
    subcommand: &str,
    project_dir: &Path,
    trial_num: usize,
    params: &TrialParams,
) -> CommandSpec {
    let mut command = CommandSpec::new(runner)
        .arg("project")
        .arg("run")
        .arg(subcommand)
        .arg(project_dir.display().to_string())
        .var("trial_num", trial_num)
        .var("seed", trial_num);
    for (name, value) in params {
        command = command.var(name, value);
    }
    command
}

/// A finished sweep trial with its target-metric score
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    pub trial_num: usize,
    pub params: TrialParams,
    pub score: f64,
}

/// Pick the best outcome for the metric goal.
pub fn best_outcome(outcomes: &[TrialOutcome], goal: MetricGoal) -> Option<&TrialOutcome> {
    let cmp = |a: &&TrialOutcome, b: &&TrialOutcome| {
        a.score
            .partial_cmp(&b.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    };
    match goal {
        MetricGoal::Maximize => outcomes.iter().max_by(cmp),
        MetricGoal::Minimize => outcomes.iter().min_by(cmp),
    }
}

/// Read the target metric for one trial from `<scores-dir>/trial-<n>/scores.json`.
pub fn read_trial_metric(scores_dir: &Path, trial_num: usize, metric: &str) -> Result<f64> {
    if !OVERALL_METRICS.contains(&metric) {
        return Err(SpanbenchError::Configuration(format!(
            "unsupported metric '{}' (expected one of: {})",
            metric,
            OVERALL_METRICS.join(", ")
        )));
    }
    let path = scores_dir
        .join(format!("trial-{trial_num}"))
        .join("scores.json");
    let scores = TrialScores::from_file(&path)?;
    scores.metric(metric).ok_or_else(|| {
        SpanbenchError::Computation(format!("metric '{metric}' missing from {}", path.display()))
    })
}
