//! Metrics collation and data preparation for span-labeling benchmarks
//!
//! This crate contains the shared machinery behind a span-categorization
//! benchmark suite: it aggregates per-trial evaluation scores into
//! mean/stdev summaries, converts token-per-line IOB annotation files into
//! JSON-lines records with character-offset spans, and plans the training
//! commands for multi-trial experiments and hyperparameter sweeps.
//!
//! # Architecture
//!
//! Functionality is grouped by pipeline stage:
//! - **Collation**: [`score`], [`stats`], and [`collate`] turn trial score
//!   files into per-dataset aggregates
//! - **Conversion**: [`iob`], [`span`], [`record`], [`annotate`], and
//!   [`convert`] turn IOB files into annotated JSON-lines records
//! - **Planning**: [`dataset`], [`runner`], and [`sweep`] build the external
//!   training commands for experiments and sweeps
//!
//! # Example
//!
//! ```rust
//! use spanbench_core::iob::{parse_sentences, InvalidLine};
//! use spanbench_core::span::sentence_to_spans;
//! use std::path::Path;
//!
//! let content = "B-LOC\tNew\nL-LOC\tYork\nO\tis\nO\tbig\n";
//! let sentences = parse_sentences(content, Path::new("sample.iob"), InvalidLine::Abort).unwrap();
//!
//! let (text, spans) = sentence_to_spans(&sentences[0].tokens, &sentences[0].tags);
//! assert_eq!(text, "New York is big");
//! assert_eq!((spans[0].start, spans[0].end), (0, 8));
//! assert_eq!(spans[0].label, "LOC");
//! ```

pub mod annotate;
pub mod collate;
pub mod convert;
pub mod dataset;
pub mod error;
pub mod iob;
pub mod record;
pub mod runner;
pub mod score;
pub mod span;
pub mod stats;
pub mod sweep;

// Error handling
pub use error::{Result, SpanbenchError};

// Metrics collation
pub use collate::{collate, CollatedResults, DatasetSummary, LoadedTrial, MetricAggregates};
pub use score::{LabelScores, TrialScores, OVERALL_METRICS};
pub use stats::Aggregate;

// Annotation conversion
pub use annotate::{ModelCommand, PatternRuler, SpanAnnotator};
pub use convert::convert_sentences;
pub use iob::{parse_sentences, InvalidLine, Sentence};
pub use record::{content_hash, AnnotatedRecord, Annotator};
pub use span::{sentence_to_spans, Span};

// Experiment planning
pub use dataset::{DatasetRegistry, DatasetSpec};
pub use runner::{build_plan, CommandSpec, ExperimentConfig, Trial};
pub use sweep::{best_outcome, MetricGoal, SearchMethod, SweepConfig, TrialOutcome};
