//! Additional annotation sources for the converter
//!
//! Besides the gold IOB annotations, the converter can attach spans from a
//! trained model (driven as an external command over a scratch file) and
//! from a rule-based pattern matcher. Both sit behind [`SpanAnnotator`] so
//! the conversion pipeline treats them uniformly.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpanbenchError};
use crate::record::Annotator;
use crate::span::Span;

/// A source of span annotations over a batch of texts.
pub trait SpanAnnotator {
    fn annotator(&self) -> Annotator;

    /// Produce one span list per input text, in input order.
    fn annotate_batch(&self, texts: &[String]) -> Result<Vec<Vec<Span>>>;
}

#[derive(Serialize)]
struct TextLine<'a> {
    text: &'a str,
}

/// A trained model driven as an external command.
///
/// The batch texts are written to a JSON-lines scratch file (one
/// `{"text": ...}` object per line) and the command is invoked with that
/// path as its single argument. The command must print one JSON span array
/// per input line to stdout, e.g. `[{"start":0,"end":8,"label":"Dish"}]`.
pub struct ModelCommand {
    program: PathBuf,
    scratch: PathBuf,
}

impl ModelCommand {
    /// `program` is the model executable; `scratch` is where the input
    /// texts are staged for it. The scratch file is removed after the run.
    pub fn new(program: impl Into<PathBuf>, scratch: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            scratch: scratch.into(),
        }
    }

    fn write_scratch(&self, texts: &[String]) -> Result<()> {
        let mut buffer = String::new();
        for text in texts {
            let line = serde_json::to_string(&TextLine { text: text.as_str() }).map_err(|e| {
                SpanbenchError::Json {
                    path: self.scratch.clone(),
                    source: e,
                }
            })?;
            buffer.push_str(&line);
            buffer.push('\n');
        }
        fs::write(&self.scratch, buffer).map_err(|e| SpanbenchError::Io {
            path: self.scratch.clone(),
            source: e,
        })
    }

    fn run_model(&self, expected: usize) -> Result<Vec<Vec<Span>>> {
        log::info!(
            "running model command '{}' over {} texts",
            self.program.display(),
            expected
        );
        let output = Command::new(&self.program)
            .arg(&self.scratch)
            .output()
            .map_err(|e| SpanbenchError::Io {
                path: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(SpanbenchError::Configuration(format!(
                "model command '{}' failed with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut batches = Vec::with_capacity(expected);
        for (idx, line) in stdout.lines().enumerate() {
            let spans: Vec<Span> =
                serde_json::from_str(line).map_err(|e| SpanbenchError::Data {
                    path: self.program.clone(),
                    line: Some(idx + 1),
                    message: format!("model output is not a JSON span array: {e}"),
                })?;
            batches.push(spans);
        }
        if batches.len() != expected {
            return Err(SpanbenchError::Data {
                path: self.program.clone(),
                line: None,
                message: format!(
                    "model produced {} span rows for {} texts",
                    batches.len(),
                    expected
                ),
            });
        }
        Ok(batches)
    }
}

impl SpanAnnotator for ModelCommand {
    fn annotator(&self) -> Annotator {
        Annotator::Model
    }

    fn annotate_batch(&self, texts: &[String]) -> Result<Vec<Vec<Span>>> {
        self.write_scratch(texts)?;
        let result = self.run_model(texts.len());
        if let Err(e) = fs::remove_file(&self.scratch) {
            log::debug!(
                "could not remove scratch file {}: {}",
                self.scratch.display(),
                e
            );
        }
        result
    }
}

#[derive(Debug)]
struct CompiledPattern {
    label: String,
    regex: Regex,
}

static RESTAURANT_PATTERNS: Lazy<Vec<CompiledPattern>> = Lazy::new(|| {
    let table: [(&str, &str); 7] = [
        ("Rating", r"(?i)\b(?:[1-5]|one|two|three|four|five)\s+stars?\b"),
        (
            "Hours",
            r"(?i)\b(?:open|until|till)\s+\d{1,2}(?::\d{2})?\s*(?:am|pm)\b",
        ),
        ("Hours", r"(?i)\b\d{1,2}(?::\d{2})?\s*(?:am|pm)\b"),
        (
            "Price",
            r"(?i)\b(?:cheap|inexpensive|affordable|expensive|pricey)\b",
        ),
        ("Price", r"(?i)(?:under\s+)?\$\d+"),
        (
            "Cuisine",
            r"(?i)\b(?:italian|chinese|mexican|thai|japanese|indian|french|greek|korean|vietnamese)\b",
        ),
        (
            "Amenity",
            r"(?i)\b(?:outdoor\s+seating|parking|wifi|wi[- ]fi|takeout|take[- ]out|delivery|reservations?|kid[- ]friendly|pet[- ]friendly)\b",
        ),
    ];
    table
        .iter()
        .map(|(label, pattern)| CompiledPattern {
            label: label.to_string(),
            regex: Regex::new(pattern).unwrap(),
        })
        .collect()
});

/// One entry of a JSON pattern file: `[{"label": ..., "pattern": ...}]`
#[derive(Debug, Deserialize)]
struct PatternEntry {
    label: String,
    pattern: String,
}

/// Rule-based span matcher.
///
/// Patterns are tried in order; a match that overlaps an earlier match is
/// dropped, so pattern order doubles as priority.
#[derive(Debug)]
pub struct PatternRuler {
    patterns: Vec<CompiledPattern>,
}

impl PatternRuler {
    /// The built-in restaurant-review pattern set (ratings, hours, price,
    /// cuisine, amenities).
    pub fn restaurant() -> Self {
        Self {
            patterns: RESTAURANT_PATTERNS
                .iter()
                .map(|p| CompiledPattern {
                    label: p.label.clone(),
                    regex: p.regex.clone(),
                })
                .collect(),
        }
    }

    /// Compile (label, pattern) pairs. Each pattern is matched
    /// case-insensitively on word boundaries.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for (label, pattern) in patterns {
            let source = format!(r"(?i)\b(?:{})\b", pattern.as_ref());
            let regex = Regex::new(&source).map_err(|e| {
                SpanbenchError::Configuration(format!(
                    "invalid pattern for label '{}': {}",
                    label.as_ref(),
                    e
                ))
            })?;
            compiled.push(CompiledPattern {
                label: label.as_ref().to_string(),
                regex,
            });
        }
        if compiled.is_empty() {
            return Err(SpanbenchError::Configuration(
                "pattern file contains no patterns".to_string(),
            ));
        }
        Ok(Self { patterns: compiled })
    }

    /// Load patterns from a JSON file of `{"label", "pattern"}` objects.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SpanbenchError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let entries: Vec<PatternEntry> =
            serde_json::from_str(&content).map_err(|e| SpanbenchError::Json {
                path: path.to_path_buf(),
                source: e,
            })?;
        Self::from_patterns(entries.into_iter().map(|e| (e.label, e.pattern)))
    }

    fn find_spans(&self, text: &str) -> Vec<Span> {
        let mut spans: Vec<Span> = Vec::new();
        for pattern in &self.patterns {
            for m in pattern.regex.find_iter(text) {
                if !overlaps(&spans, m.start(), m.end()) {
                    spans.push(Span::new(m.start(), m.end(), pattern.label.clone()));
                }
            }
        }
        spans.sort_by_key(|s| (s.start, s.end));
        spans
    }
}

impl SpanAnnotator for PatternRuler {
    fn annotator(&self) -> Annotator {
        Annotator::Ruler
    }

    fn annotate_batch(&self, texts: &[String]) -> Result<Vec<Vec<Span>>> {
        Ok(texts.iter().map(|t| self.find_spans(t)).collect())
    }
}

/// Check if a candidate range overlaps an already accepted span.
fn overlaps(spans: &[Span], start: usize, end: usize) -> bool {
    spans.iter().any(|s| !(end <= s.start || start >= s.end))
}
