//! Line-oriented parsing of IOB annotation files
//!
//! Each non-blank line carries `tag<TAB>token`; blank lines separate
//! sentences. Malformed lines are reported with their 1-based line number
//! and either abort parsing or are skipped, per caller policy.

use std::path::Path;

use crate::error::{Result, SpanbenchError};

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IobLine {
    /// A `tag<TAB>token` pair
    Pair { tag: String, token: String },
    /// A blank line marking a sentence boundary
    Blank,
}

/// What to do with a malformed line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidLine {
    /// Fail the whole parse on the first malformed line
    #[default]
    Abort,
    /// Log and skip malformed lines, keeping the rest
    Skip,
}

/// One sentence flushed from the accumulator: parallel token and tag rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub tokens: Vec<String>,
    pub tags: Vec<String>,
}

/// Parse a single line of an IOB file.
pub fn parse_line(raw: &str, path: &Path, line_no: usize) -> Result<IobLine> {
    if raw.trim().is_empty() {
        return Ok(IobLine::Blank);
    }

    let mut parts = raw.split('\t');
    let tag = parts.next().unwrap_or_default();
    let token = match parts.next() {
        Some(token) => token,
        None => {
            return Err(data_error(
                path,
                line_no,
                "expected tag<TAB>token".to_string(),
            ))
        }
    };
    let extra = parts.count();
    if extra > 0 {
        return Err(data_error(
            path,
            line_no,
            format!("expected a single tab separator, found {}", extra + 1),
        ));
    }
    if tag.is_empty() {
        return Err(data_error(path, line_no, "empty tag".to_string()));
    }
    if token.is_empty() {
        return Err(data_error(path, line_no, "empty token".to_string()));
    }
    validate_tag(tag, path, line_no)?;

    Ok(IobLine::Pair {
        tag: tag.to_string(),
        token: token.to_string(),
    })
}

/// A tag is `O` or a single-character prefix, a dash, and a non-empty label.
fn validate_tag(tag: &str, path: &Path, line_no: usize) -> Result<()> {
    if tag == "O" {
        return Ok(());
    }
    if let Some((prefix, label)) = tag.split_once('-') {
        let mut chars = prefix.chars();
        if let (Some(_), None) = (chars.next(), chars.next()) {
            if !label.is_empty() {
                return Ok(());
            }
        }
    }
    Err(data_error(
        path,
        line_no,
        format!("invalid tag '{tag}' (expected 'O' or 'PREFIX-LABEL')"),
    ))
}

fn data_error(path: &Path, line_no: usize, message: String) -> SpanbenchError {
    SpanbenchError::Data {
        path: path.to_path_buf(),
        line: Some(line_no),
        message,
    }
}

/// Parse a whole IOB file into sentences.
///
/// Tag/token lines accumulate; a blank line flushes the accumulated
/// sentence. End of input also flushes, so a file without a trailing blank
/// line still yields its final sentence.
pub fn parse_sentences(content: &str, path: &Path, policy: InvalidLine) -> Result<Vec<Sentence>> {
    let mut sentences = Vec::new();
    let mut tokens: Vec<String> = Vec::new();
    let mut tags: Vec<String> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        match parse_line(raw, path, idx + 1) {
            Ok(IobLine::Pair { tag, token }) => {
                tags.push(tag);
                tokens.push(token);
            }
            Ok(IobLine::Blank) => flush(&mut sentences, &mut tokens, &mut tags),
            Err(err) => match policy {
                InvalidLine::Abort => return Err(err),
                InvalidLine::Skip => log::warn!("skipping malformed line: {err}"),
            },
        }
    }
    flush(&mut sentences, &mut tokens, &mut tags);

    Ok(sentences)
}

fn flush(sentences: &mut Vec<Sentence>, tokens: &mut Vec<String>, tags: &mut Vec<String>) {
    if tokens.is_empty() {
        return;
    }
    sentences.push(Sentence {
        tokens: std::mem::take(tokens),
        tags: std::mem::take(tags),
    });
}
