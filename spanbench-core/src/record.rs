//! Review-ready annotation records
//!
//! Each sentence produces one record per annotation source. Records sharing
//! the same text carry the same content hash so downstream review tools can
//! group them as one task with multiple annotators.

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Annotation source for a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotator {
    /// Gold annotations from the IOB file
    Original,
    /// Predictions from the trained model
    Model,
    /// Matches from the rule patterns
    Ruler,
}

impl Annotator {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Model => "model",
            Self::Ruler => "ruler",
        }
    }
}

/// One line of the JSONL output
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnnotatedRecord {
    pub text: String,
    pub spans: Vec<Span>,
    #[serde(rename = "_annotator_id")]
    pub annotator_id: String,
    #[serde(rename = "_session_id")]
    pub session_id: String,
    #[serde(rename = "_input_hash")]
    pub input_hash: String,
}

impl AnnotatedRecord {
    /// Build a record, deriving the content hash from the text.
    pub fn new(text: String, spans: Vec<Span>, annotator: Annotator) -> Self {
        let input_hash = content_hash(&text);
        Self {
            text,
            spans,
            annotator_id: annotator.id().to_string(),
            session_id: annotator.id().to_string(),
            input_hash,
        }
    }
}

/// Deterministic fingerprint of the text alone.
///
/// Spans and annotator metadata are excluded so that every record for the
/// same underlying text hashes identically, across annotators and runs.
pub fn content_hash(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}
