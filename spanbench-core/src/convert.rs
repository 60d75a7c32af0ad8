//! IOB-to-records conversion pipeline

use crate::annotate::SpanAnnotator;
use crate::error::Result;
use crate::iob::Sentence;
use crate::record::{AnnotatedRecord, Annotator};
use crate::span::sentence_to_spans;

/// Convert parsed sentences into review records.
///
/// Produces one `original` record per sentence from the IOB tags, then one
/// record per sentence for each extra annotator. Records are grouped by
/// annotator, annotators in the given order, so the output reads as: all
/// original, then all of the first annotator, and so on.
pub fn convert_sentences(
    sentences: &[Sentence],
    annotators: &[Box<dyn SpanAnnotator>],
) -> Result<Vec<AnnotatedRecord>> {
    let mut texts = Vec::with_capacity(sentences.len());
    let mut records = Vec::with_capacity(sentences.len() * (annotators.len() + 1));

    for sentence in sentences {
        let (text, spans) = sentence_to_spans(&sentence.tokens, &sentence.tags);
        texts.push(text.clone());
        records.push(AnnotatedRecord::new(text, spans, Annotator::Original));
    }

    for annotator in annotators {
        let batches = annotator.annotate_batch(&texts)?;
        for (text, spans) in texts.iter().zip(batches) {
            records.push(AnnotatedRecord::new(
                text.clone(),
                spans,
                annotator.annotator(),
            ));
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::PatternRuler;
    use crate::span::Span;

    fn sentence(pairs: &[(&str, &str)]) -> Sentence {
        Sentence {
            tags: pairs.iter().map(|(t, _)| t.to_string()).collect(),
            tokens: pairs.iter().map(|(_, w)| w.to_string()).collect(),
        }
    }

    #[test]
    fn test_original_records_only() {
        let sentences = vec![
            sentence(&[("B-Dish", "pad"), ("I-Dish", "thai"), ("O", "rocks")]),
            sentence(&[("O", "meh")]),
        ];
        let records = convert_sentences(&sentences, &[]).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "pad thai rocks");
        assert_eq!(records[0].spans, vec![Span::new(0, 8, "Dish")]);
        assert_eq!(records[0].annotator_id, "original");
        assert_eq!(records[1].text, "meh");
        assert!(records[1].spans.is_empty());
    }

    #[test]
    fn test_annotator_records_follow_originals() {
        let sentences = vec![
            sentence(&[("O", "cheap"), ("O", "eats")]),
            sentence(&[("O", "open"), ("O", "till"), ("O", "9"), ("O", "pm")]),
        ];
        let annotators: Vec<Box<dyn SpanAnnotator>> = vec![Box::new(PatternRuler::restaurant())];
        let records = convert_sentences(&sentences, &annotators).unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].annotator_id, "original");
        assert_eq!(records[1].annotator_id, "original");
        assert_eq!(records[2].annotator_id, "ruler");
        assert_eq!(records[3].annotator_id, "ruler");

        // ruler found the price mention the gold tags do not carry
        assert_eq!(records[2].text, "cheap eats");
        assert_eq!(records[2].spans, vec![Span::new(0, 5, "Price")]);
    }

    #[test]
    fn test_same_text_shares_hash_across_annotators() {
        let sentences = vec![sentence(&[("O", "thai"), ("O", "food")])];
        let annotators: Vec<Box<dyn SpanAnnotator>> = vec![Box::new(PatternRuler::restaurant())];
        let records = convert_sentences(&sentences, &annotators).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].input_hash, records[1].input_hash);
        assert_ne!(records[0].spans, records[1].spans);
    }

    #[test]
    fn test_no_sentences_no_records() {
        let records = convert_sentences(&[], &[]).unwrap();
        assert!(records.is_empty());
    }
}
