//! Aggregate statistics over trial scores

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpanbenchError};

/// Mean and sample standard deviation over a set of trial samples
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Aggregate {
    pub mean: f64,
    pub stdev: f64,
}

impl Aggregate {
    /// Compute mean and sample (n-1) standard deviation.
    ///
    /// The standard deviation is undefined below two samples; that case is
    /// reported as an error, never as 0 or NaN.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.len() < 2 {
            return Err(SpanbenchError::Computation(format!(
                "standard deviation requires at least 2 samples, got {}",
                samples.len()
            )));
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        Ok(Self {
            mean,
            stdev: variance.sqrt(),
        })
    }

    /// Render as a percentage cell: mean to one decimal, stdev in parentheses
    pub fn format_percent(&self) -> String {
        format!("{:.1} ({:.1})", self.mean * 100.0, self.stdev * 100.0)
    }
}
