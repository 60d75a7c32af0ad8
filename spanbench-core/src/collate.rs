//! Collation of per-trial scores into per-dataset aggregates

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpanbenchError};
use crate::score::TrialScores;
use crate::stats::Aggregate;

/// A score record together with the file it was loaded from.
///
/// The path travels with the scores so that collation errors can name the
/// offending trial file.
#[derive(Debug, Clone)]
pub struct LoadedTrial {
    pub path: PathBuf,
    pub scores: TrialScores,
}

impl LoadedTrial {
    pub fn load(path: &Path) -> Result<Self> {
        let scores = TrialScores::from_file(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            scores,
        })
    }
}

/// Aggregated precision/recall/F1 for one metric group
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct MetricAggregates {
    pub precision: Aggregate,
    pub recall: Aggregate,
    pub f_score: Aggregate,
}

/// Collated results for a single dataset
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetSummary {
    pub dataset: String,
    pub trials: usize,
    pub overall: MetricAggregates,
    pub per_label: BTreeMap<String, MetricAggregates>,
}

/// Collated results across all datasets for one configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollatedResults {
    pub config: String,
    pub datasets: Vec<DatasetSummary>,
}

/// Collate trial scores per dataset, preserving dataset order.
pub fn collate(config: &str, datasets: Vec<(String, Vec<LoadedTrial>)>) -> Result<CollatedResults> {
    let mut summaries = Vec::with_capacity(datasets.len());
    for (name, trials) in &datasets {
        summaries.push(collate_dataset(name, trials)?);
    }
    Ok(CollatedResults {
        config: config.to_string(),
        datasets: summaries,
    })
}

/// Aggregate one dataset's trials: overall scores plus the per-label
/// breakdown over the sorted union of labels.
///
/// Fewer than two trials cannot produce a standard deviation and is an
/// error. A trial missing a label that other trials carry is an error
/// naming the trial file; partial tables would misrepresent the mean.
pub fn collate_dataset(name: &str, trials: &[LoadedTrial]) -> Result<DatasetSummary> {
    if trials.len() < 2 {
        return Err(SpanbenchError::Computation(format!(
            "dataset '{}' has {} trial(s); at least 2 are required to compute a standard deviation",
            name,
            trials.len()
        )));
    }

    let overall = aggregate_metrics(
        trials.iter().map(|t| t.scores.precision),
        trials.iter().map(|t| t.scores.recall),
        trials.iter().map(|t| t.scores.f_score),
    )?;

    let labels: BTreeSet<&str> = trials.iter().flat_map(|t| t.scores.labels()).collect();

    let mut per_label = BTreeMap::new();
    for label in labels {
        let mut ps = Vec::with_capacity(trials.len());
        let mut rs = Vec::with_capacity(trials.len());
        let mut fs = Vec::with_capacity(trials.len());
        for trial in trials {
            let scores = trial.scores.per_label.get(label).ok_or_else(|| {
                SpanbenchError::Data {
                    path: trial.path.clone(),
                    line: None,
                    message: format!(
                        "missing label '{}' present in other trials of dataset '{}'",
                        label, name
                    ),
                }
            })?;
            ps.push(scores.p);
            rs.push(scores.r);
            fs.push(scores.f);
        }
        per_label.insert(
            label.to_string(),
            MetricAggregates {
                precision: Aggregate::from_samples(&ps)?,
                recall: Aggregate::from_samples(&rs)?,
                f_score: Aggregate::from_samples(&fs)?,
            },
        );
    }

    Ok(DatasetSummary {
        dataset: name.to_string(),
        trials: trials.len(),
        overall,
        per_label,
    })
}

fn aggregate_metrics(
    precision: impl Iterator<Item = f64>,
    recall: impl Iterator<Item = f64>,
    f_score: impl Iterator<Item = f64>,
) -> Result<MetricAggregates> {
    Ok(MetricAggregates {
        precision: Aggregate::from_samples(&precision.collect::<Vec<_>>())?,
        recall: Aggregate::from_samples(&recall.collect::<Vec<_>>())?,
        f_score: Aggregate::from_samples(&f_score.collect::<Vec<_>>())?,
    })
}
