//! Score-file discovery under the metrics directory

use anyhow::{Context, Result};
use glob::glob;
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Find every JSON score file for one dataset/configuration pair.
///
/// Score files live under `<root>/<dataset>/<config>/`, one directory per
/// trial; the whole subtree is searched. Results are sorted and
/// deduplicated.
pub fn find_score_files(root: &Path, dataset: &str, config: &str) -> Result<Vec<PathBuf>> {
    let dir = root.join(dataset).join(config);
    if !dir.is_dir() {
        return Err(CliError::FileNotFound(dir.display().to_string()).into());
    }

    let pattern = format!("{}/**/*.json", dir.display());
    let paths = glob(&pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))?;

    let mut files = Vec::new();
    for path_result in paths {
        let path = path_result.with_context(|| format!("Error resolving pattern: {pattern}"))?;
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    files.dedup();

    Ok(files)
}
