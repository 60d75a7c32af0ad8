//! Tag-scheme conversion between IOB sequences and character spans
//!
//! Annotation files carry IOB tags (`B-LOC`, `I-LOC`, `O`) per token. Spans
//! are produced in two steps: normalize IOB to the BILUO scheme
//! (Begin/In/Last/Unit/Out), then walk the token sequence to compute
//! character offsets into the whitespace-joined text.
//!
//! # Example
//!
//! ```rust
//! use spanbench_core::span::sentence_to_spans;
//!
//! let tokens = ["New", "York", "is"];
//! let tags = ["B-LOC", "L-LOC", "O"];
//! let (text, spans) = sentence_to_spans(&tokens, &tags);
//!
//! assert_eq!(text, "New York is");
//! assert_eq!(spans.len(), 1);
//! assert_eq!((spans[0].start, spans[0].end), (0, 8));
//! assert_eq!(spans[0].label, "LOC");
//! ```

use serde::{Deserialize, Serialize};

/// A labeled character range within a text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Span label
    pub label: String,
}

impl Span {
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }
}

/// A parsed scheme tag: prefix character plus label.
///
/// Tags without a single-character prefix, a separator, and a non-empty
/// label are treated as outside.
struct ParsedTag<'a> {
    prefix: char,
    label: Option<&'a str>,
}

impl<'a> ParsedTag<'a> {
    fn parse(tag: &'a str) -> Self {
        if let Some((prefix, label)) = tag.split_once('-') {
            let mut chars = prefix.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if !label.is_empty() {
                    return Self {
                        prefix: c.to_ascii_uppercase(),
                        label: Some(label),
                    };
                }
            }
        }
        Self {
            prefix: 'O',
            label: None,
        }
    }
}

/// Join tokens into the reconstructed sentence text.
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert an IOB tag sequence to BILUO.
///
/// Runs of `O` pass through unchanged. Any labeled tag opens an entity run
/// that extends over following `I-`/`L-` tags of the same label; a run of
/// length one becomes `U-label`, longer runs become `B- I-... L-`. An `I-`
/// tag without a preceding opener starts its own run (orphan promotion).
///
/// The output has the same length as the input.
pub fn iob_to_biluo<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut out = Vec::with_capacity(tags.len());
    let mut i = 0;
    while i < tags.len() {
        let label = match ParsedTag::parse(tags[i].as_ref()).label {
            None => {
                out.push("O".to_string());
                i += 1;
                continue;
            }
            Some(label) => label.to_string(),
        };

        let in_tag = format!("I-{label}");
        let last_tag = format!("L-{label}");
        let mut run = 1;
        while i + run < tags.len() {
            let next = tags[i + run].as_ref();
            if next == in_tag || next == last_tag {
                run += 1;
            } else {
                break;
            }
        }

        if run == 1 {
            out.push(format!("U-{label}"));
        } else {
            out.push(format!("B-{label}"));
            for _ in 1..run - 1 {
                out.push(in_tag.clone());
            }
            out.push(last_tag);
        }
        i += run;
    }
    out
}

/// Convert a BILUO tag sequence to character spans.
///
/// Token `n` starts at the sum of the previous token lengths plus `n`
/// joining spaces. An entity left open at the end of the sequence is closed
/// at its last seen token.
pub fn biluo_to_offsets<S, T>(tokens: &[S], tags: &[T]) -> Vec<Span>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    debug_assert_eq!(tokens.len(), tags.len());

    let mut spans = Vec::new();
    let mut offset = 0;
    let mut open: Option<(usize, usize, String)> = None;

    for (token, tag) in tokens.iter().zip(tags.iter()) {
        let start = offset;
        let end = offset + token.as_ref().len();
        offset = end + 1; // joining space

        let parsed = ParsedTag::parse(tag.as_ref());
        match (parsed.prefix, parsed.label) {
            ('U', Some(label)) => {
                if let Some((s, e, l)) = open.take() {
                    spans.push(Span::new(s, e, l));
                }
                spans.push(Span::new(start, end, label));
            }
            ('B', Some(label)) => {
                if let Some((s, e, l)) = open.take() {
                    spans.push(Span::new(s, e, l));
                }
                open = Some((start, end, label.to_string()));
            }
            ('I', Some(_)) => {
                if let Some(o) = open.as_mut() {
                    o.1 = end;
                }
            }
            ('L', Some(_)) => {
                if let Some((s, _, l)) = open.take() {
                    spans.push(Span::new(s, end, l));
                }
            }
            _ => {
                if let Some((s, e, l)) = open.take() {
                    spans.push(Span::new(s, e, l));
                }
            }
        }
    }

    if let Some((s, e, l)) = open {
        spans.push(Span::new(s, e, l));
    }
    spans
}

/// Convert one sentence's tokens and IOB tags into text plus spans.
pub fn sentence_to_spans<S: AsRef<str>>(tokens: &[S], tags: &[S]) -> (String, Vec<Span>) {
    let text = join_tokens(tokens);
    let biluo = iob_to_biluo(tags);
    let spans = biluo_to_offsets(tokens, &biluo);
    (text, spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_entity_offsets() {
        let tokens = ["New", "York", "is"];
        let tags = ["B-LOC", "L-LOC", "O"];
        let (text, spans) = sentence_to_spans(&tokens, &tags);

        assert_eq!(text, "New York is");
        assert_eq!(spans, vec![Span::new(0, 8, "LOC")]);
        assert_eq!(&text[spans[0].start..spans[0].end], "New York");
    }

    #[test]
    fn test_iob_run_becomes_biluo() {
        let tags = ["B-PER", "I-PER", "I-PER", "O"];
        assert_eq!(iob_to_biluo(&tags), vec!["B-PER", "I-PER", "L-PER", "O"]);
    }

    #[test]
    fn test_singleton_becomes_unit() {
        let tags = ["O", "B-ORG", "O"];
        assert_eq!(iob_to_biluo(&tags), vec!["O", "U-ORG", "O"]);
    }

    #[test]
    fn test_orphan_inside_is_promoted() {
        let tags = ["O", "I-PER", "I-PER", "O"];
        assert_eq!(iob_to_biluo(&tags), vec!["O", "B-PER", "L-PER", "O"]);
    }

    #[test]
    fn test_label_change_splits_runs() {
        let tags = ["B-PER", "I-LOC"];
        assert_eq!(iob_to_biluo(&tags), vec!["U-PER", "U-LOC"]);
    }

    #[test]
    fn test_adjacent_begins_stay_separate() {
        let tags = ["B-PER", "B-PER"];
        assert_eq!(iob_to_biluo(&tags), vec!["U-PER", "U-PER"]);
    }

    #[test]
    fn test_output_length_matches_input() {
        let tags = ["O", "B-LOC", "I-LOC", "I-LOC", "O", "B-PER", "O"];
        assert_eq!(iob_to_biluo(&tags).len(), tags.len());
    }

    #[test]
    fn test_all_outside_yields_no_spans() {
        let tokens = ["the", "cat", "sat"];
        let tags = ["O", "O", "O"];
        let (_, spans) = sentence_to_spans(&tokens, &tags);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_empty_sentence() {
        let tokens: [&str; 0] = [];
        let tags: [&str; 0] = [];
        let (text, spans) = sentence_to_spans(&tokens, &tags);
        assert!(text.is_empty());
        assert!(spans.is_empty());
    }

    #[test]
    fn test_multiple_entities() {
        let tokens = ["John", "visited", "New", "York", "today"];
        let tags = ["B-PER", "O", "B-LOC", "I-LOC", "O"];
        let (text, spans) = sentence_to_spans(&tokens, &tags);

        assert_eq!(
            spans,
            vec![Span::new(0, 4, "PER"), Span::new(13, 21, "LOC")]
        );
        assert_eq!(&text[13..21], "New York");
    }

    #[test]
    fn test_spans_slice_back_to_tokens() {
        let tokens = ["the", "Empire", "State", "Building", "opened"];
        let tags = ["O", "B-LOC", "I-LOC", "I-LOC", "O"];
        let (text, spans) = sentence_to_spans(&tokens, &tags);

        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "Empire State Building");
    }

    #[test]
    fn test_unclosed_entity_flushed_at_end() {
        let tokens = ["San", "Francisco"];
        let spans = biluo_to_offsets(&tokens, &["B-LOC", "I-LOC"]);
        assert_eq!(spans, vec![Span::new(0, 13, "LOC")]);
    }

    #[test]
    fn test_entity_at_end_of_sentence() {
        let tokens = ["went", "to", "Paris"];
        let tags = ["O", "O", "B-LOC"];
        let (text, spans) = sentence_to_spans(&tokens, &tags);
        assert_eq!(spans, vec![Span::new(8, 13, "LOC")]);
        assert_eq!(&text[8..13], "Paris");
    }

    #[test]
    fn test_multibyte_tokens_use_byte_offsets() {
        let tokens = ["café", "Zürich"];
        let tags = ["O", "B-LOC"];
        let (text, spans) = sentence_to_spans(&tokens, &tags);
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "Zürich");
    }
}
