//! Convert command implementation

use anyhow::{Context, Result};
use clap::Args;
use spanbench_core::annotate::{ModelCommand, PatternRuler, SpanAnnotator};
use spanbench_core::convert::convert_sentences;
use spanbench_core::iob::{parse_sentences, InvalidLine};
use spanbench_core::record::AnnotatedRecord;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Arguments for the convert command
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input IOB file with tag<TAB>token lines
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output JSON-lines file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Model command to annotate the reconstructed texts
    #[arg(value_name = "MODEL")]
    pub model: Option<PathBuf>,

    /// Attach rule-based span annotations
    #[arg(long)]
    pub include_ruler: bool,

    /// JSON pattern file overriding the built-in ruler patterns
    #[arg(long, value_name = "FILE")]
    pub patterns: Option<PathBuf>,

    /// Skip malformed lines instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,

    /// Suppress informational output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        let content = fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read file: {}", self.input.display()))?;

        let policy = if self.skip_invalid {
            InvalidLine::Skip
        } else {
            InvalidLine::Abort
        };
        let sentences = parse_sentences(&content, &self.input, policy)?;
        log::info!(
            "Parsed {} sentences from {}",
            sentences.len(),
            self.input.display()
        );

        let mut annotators: Vec<Box<dyn SpanAnnotator>> = Vec::new();
        if let Some(model) = &self.model {
            // the scratch file stages the texts for the model command and
            // is removed after the run
            let scratch = self.output.with_extension("scratch.jsonl");
            annotators.push(Box::new(ModelCommand::new(model, scratch)));
        }
        if self.include_ruler || self.patterns.is_some() {
            let ruler = match &self.patterns {
                Some(path) => PatternRuler::from_file(path)?,
                None => PatternRuler::restaurant(),
            };
            annotators.push(Box::new(ruler));
        }

        let records = convert_sentences(&sentences, &annotators)?;
        write_jsonl(&records, &self.output)?;
        log::info!(
            "Wrote {} records to {}",
            records.len(),
            self.output.display()
        );

        Ok(())
    }
}

/// Write records as newline-delimited JSON, one record per line.
fn write_jsonl(records: &[AnnotatedRecord], path: &Path) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
