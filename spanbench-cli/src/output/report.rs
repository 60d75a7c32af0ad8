//! Text and JSON rendering of collated scores

use anyhow::{Context, Result};
use spanbench_core::collate::CollatedResults;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render the two-section score report.
///
/// A trial-count line, then an overall table with one row per dataset,
/// then one per-label table per dataset. Cells are `mean (stdev)`
/// percentages with one decimal place.
pub fn render_report<W: Write>(results: &CollatedResults, writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        "Number of trials per dataset:{}",
        format_trial_counts(results)
    )?;
    writeln!(writer)?;

    writeln!(writer, "=== Overall results ===")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "{:<16} {:>14} {:>14} {:>14}",
        "Dataset", "Precision", "Recall", "F1"
    )?;
    writeln!(writer, "{:-<61}", "")?;
    for summary in &results.datasets {
        writeln!(
            writer,
            "{:<16} {:>14} {:>14} {:>14}",
            summary.dataset,
            summary.overall.precision.format_percent(),
            summary.overall.recall.format_percent(),
            summary.overall.f_score.format_percent(),
        )?;
    }
    writeln!(writer)?;

    writeln!(writer, "=== Per-label results ===")?;
    for summary in &results.datasets {
        writeln!(writer)?;
        writeln!(writer, "--- {} ---", summary.dataset)?;
        writeln!(
            writer,
            "{:<16} {:>14} {:>14} {:>14}",
            "Label", "Precision", "Recall", "F1"
        )?;
        writeln!(writer, "{:-<61}", "")?;
        for (label, aggregates) in &summary.per_label {
            writeln!(
                writer,
                "{:<16} {:>14} {:>14} {:>14}",
                label,
                aggregates.precision.format_percent(),
                aggregates.recall.format_percent(),
                aggregates.f_score.format_percent(),
            )?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write the collated aggregates as pretty-printed JSON.
pub fn write_json(results: &CollatedResults, path: &Path) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn format_trial_counts(results: &CollatedResults) -> String {
    results
        .datasets
        .iter()
        .map(|s| format!(" {} ({})", s.dataset, s.trials))
        .collect()
}
