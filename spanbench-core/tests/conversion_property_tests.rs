//! Property tests for IOB to span conversion

use proptest::prelude::*;
use spanbench_core::span::{iob_to_biluo, sentence_to_spans};

proptest! {
    /// BILUO normalization never changes the sequence length.
    #[test]
    fn biluo_length_matches_input(
        tags in prop::collection::vec("(O|B-PER|I-PER|B-LOC|I-LOC|U-ORG)", 0..20)
    ) {
        prop_assert_eq!(iob_to_biluo(&tags).len(), tags.len());
    }

    /// Every produced span slices the joined text at valid boundaries and
    /// covers whole tokens, never a joining space.
    #[test]
    fn spans_slice_cleanly(
        rows in prop::collection::vec(("[a-zA-Z0-9éü]{1,8}", "(O|B-PER|I-PER|B-LOC|I-LOC)"), 1..12)
    ) {
        let tokens: Vec<String> = rows.iter().map(|(t, _)| t.clone()).collect();
        let tags: Vec<String> = rows.iter().map(|(_, tag)| tag.clone()).collect();
        let (text, spans) = sentence_to_spans(&tokens, &tags);

        for span in &spans {
            let slice = text.get(span.start..span.end);
            prop_assert!(slice.is_some(), "span {}..{} is not on char boundaries", span.start, span.end);
            let slice = slice.unwrap();
            prop_assert!(!slice.is_empty());
            prop_assert!(!slice.starts_with(' '));
            prop_assert!(!slice.ends_with(' '));
        }
    }

    /// Spans come out sorted and non-overlapping.
    #[test]
    fn spans_are_sorted_and_disjoint(
        rows in prop::collection::vec(("[a-z]{1,6}", "(O|B-PER|I-PER|B-LOC|I-LOC)"), 1..12)
    ) {
        let tokens: Vec<String> = rows.iter().map(|(t, _)| t.clone()).collect();
        let tags: Vec<String> = rows.iter().map(|(_, tag)| tag.clone()).collect();
        let (_, spans) = sentence_to_spans(&tokens, &tags);

        for pair in spans.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
    }

    /// No more spans than labeled tags.
    #[test]
    fn span_count_bounded_by_labeled_tags(
        rows in prop::collection::vec(("[a-z]{1,6}", "(O|B-PER|I-PER|B-LOC|I-LOC)"), 0..12)
    ) {
        let tokens: Vec<String> = rows.iter().map(|(t, _)| t.clone()).collect();
        let tags: Vec<String> = rows.iter().map(|(_, tag)| tag.clone()).collect();
        let (_, spans) = sentence_to_spans(&tokens, &tags);

        let labeled = tags.iter().filter(|t| t.as_str() != "O").count();
        prop_assert!(spans.len() <= labeled);
    }
}
