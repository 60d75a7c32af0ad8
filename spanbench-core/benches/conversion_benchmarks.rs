//! Performance benchmarks for IOB parsing and span conversion
//!
//! Run with: cargo bench --bench conversion_benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spanbench_core::iob::{parse_sentences, InvalidLine};
use spanbench_core::span::sentence_to_spans;
use spanbench_core::PatternRuler;
use std::hint::black_box;
use std::path::Path;

/// Generate IOB content with the given number of sentences
fn generate_iob(sentences: usize) -> String {
    let sentence = "B-Rating\t5\nI-Rating\tstar\nO\tthai\nO\tfood\nO\twith\nB-Amenity\toutdoor\nI-Amenity\tseating\n\n";
    sentence.repeat(sentences)
}

fn bench_parse_sentences(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_sentences");

    for count in [100, 1_000, 10_000] {
        let content = generate_iob(count);

        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("sentences", count),
            &content,
            |b, content| {
                b.iter(|| {
                    let _ = parse_sentences(
                        black_box(content),
                        Path::new("bench.iob"),
                        InvalidLine::Abort,
                    )
                    .unwrap();
                });
            },
        );
    }

    group.finish();
}

fn bench_span_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("span_conversion");

    let content = generate_iob(1_000);
    let sentences = parse_sentences(&content, Path::new("bench.iob"), InvalidLine::Abort).unwrap();

    group.throughput(Throughput::Elements(sentences.len() as u64));
    group.bench_with_input(
        BenchmarkId::new("sentence_to_spans", sentences.len()),
        &sentences,
        |b, sentences| {
            b.iter(|| {
                for sentence in sentences.iter() {
                    let _ = sentence_to_spans(black_box(&sentence.tokens), &sentence.tags);
                }
            });
        },
    );

    group.finish();
}

fn bench_pattern_ruler(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_ruler");

    let ruler = PatternRuler::restaurant();
    let texts: Vec<String> = (0..1_000)
        .map(|i| format!("cheap thai place number {i} with outdoor seating open till 9 pm"))
        .collect();

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_with_input(
        BenchmarkId::new("annotate_batch", texts.len()),
        &texts,
        |b, texts| {
            b.iter(|| {
                use spanbench_core::SpanAnnotator;
                let _ = ruler.annotate_batch(black_box(texts)).unwrap();
            });
        },
    );

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_sentences,
    bench_span_conversion,
    bench_pattern_ruler
);
criterion_main!(benches);
