//! Per-trial evaluation score records
//!
//! One JSON score file is produced per training trial. The keys used here are
//! fixed by the evaluation pipeline that writes them; deserialization fails
//! fast when a required key is absent rather than defaulting it.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpanbenchError};

/// Metric keys reported for the overall span scores
pub const OVERALL_METRICS: [&str; 3] = ["spans_sc_p", "spans_sc_r", "spans_sc_f"];

/// Precision/recall/F1 triple for a single span label
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct LabelScores {
    pub p: f64,
    pub r: f64,
    pub f: f64,
}

/// Scores from one evaluation trial
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrialScores {
    /// Overall span precision
    #[serde(rename = "spans_sc_p")]
    pub precision: f64,

    /// Overall span recall
    #[serde(rename = "spans_sc_r")]
    pub recall: f64,

    /// Overall span F1
    #[serde(rename = "spans_sc_f")]
    pub f_score: f64,

    /// Per-label breakdown, keyed by span label
    #[serde(rename = "spans_sc_per_type")]
    pub per_label: BTreeMap<String, LabelScores>,
}

impl TrialScores {
    /// Load a score record from a JSON file.
    ///
    /// Unknown keys in the file are ignored; the evaluation pipeline writes
    /// many metrics beyond the span scores consumed here.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SpanbenchError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| SpanbenchError::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Look up an overall metric by its score-file key
    pub fn metric(&self, key: &str) -> Option<f64> {
        match key {
            "spans_sc_p" => Some(self.precision),
            "spans_sc_r" => Some(self.recall),
            "spans_sc_f" => Some(self.f_score),
            _ => None,
        }
    }

    /// Span labels present in this trial, in sorted order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.per_label.keys().map(String::as_str)
    }
}
