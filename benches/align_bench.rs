//! Criterion benchmarks for block alignment and the full comparison pipeline.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use text_matcher::align::matching_blocks;
use text_matcher::compare::compare_documents;
use text_matcher::document::Document;
use text_matcher::extend::edit_ratio;
use text_matcher::models::MatchParams;

fn bench_alignment(c: &mut Criterion) {
    // Generate test sequences of different sizes
    let sizes = [100, 1000, 5000];

    let mut group = c.benchmark_group("matching_blocks");

    for size in sizes {
        // Identical sequences (one block)
        let seq: Vec<u32> = (0..size as u32).collect();

        group.bench_with_input(BenchmarkId::new("identical", size), &size, |b, _| {
            b.iter(|| matching_blocks(black_box(&seq), black_box(&seq), true))
        });

        // 70% match: many short blocks, deep recursion
        let seq_b: Vec<u32> = (0..size as u32)
            .map(|i| if i % 10 < 7 { i } else { i + 100_000 })
            .collect();

        group.bench_with_input(BenchmarkId::new("70pct_match", size), &size, |b, _| {
            b.iter(|| matching_blocks(black_box(&seq), black_box(&seq_b), true))
        });

        // No match
        let seq_nomatch: Vec<u32> = (100_000..100_000 + size as u32).collect();

        group.bench_with_input(BenchmarkId::new("no_match", size), &size, |b, _| {
            b.iter(|| matching_blocks(black_box(&seq), black_box(&seq_nomatch), true))
        });
    }

    group.finish();
}

/// Deterministic pseudo-text from a small vocabulary.
fn synthetic_text(words: usize, seed: u64) -> String {
    const VOCAB: [&str; 24] = [
        "harbour", "lantern", "meadow", "quarrel", "whistle", "granite", "saddle", "orchard",
        "thunder", "velvet", "compass", "cinder", "marble", "pilgrim", "ribbon", "tavern",
        "glacier", "falcon", "parlour", "timber", "voyage", "chapel", "ember", "garden",
    ];
    let mut state = seed;
    (0..words)
        .map(|_| {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            VOCAB[(state >> 33) as usize % VOCAB.len()]
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_pipeline(c: &mut Criterion) {
    let params = MatchParams {
        silent: true,
        ..Default::default()
    };

    let mut group = c.benchmark_group("compare_documents");

    for words in [500, 2000] {
        let shared = synthetic_text(words / 4, 7);
        let text_a = format!("{} {} {}", synthetic_text(words / 2, 1), shared, synthetic_text(words / 4, 2));
        let text_b = format!("{} {} {}", synthetic_text(words / 4, 3), shared, synthetic_text(words / 2, 4));

        let doc_a = Document::new(&text_a, "a", true).unwrap();
        let doc_b = Document::new(&text_b, "b", true).unwrap();

        group.bench_with_input(BenchmarkId::new("shared_quarter", words), &words, |b, _| {
            b.iter(|| compare_documents(black_box(&doc_a), black_box(&doc_b), &params))
        });

        group.bench_with_input(BenchmarkId::new("tokenize", words), &words, |b, _| {
            b.iter(|| Document::new(black_box(&text_a), "a", true))
        });
    }

    group.finish();
}

fn bench_edit_ratio(c: &mut Criterion) {
    c.bench_function("edit_ratio", |b| {
        b.iter(|| edit_ratio(black_box("incomprehensibility"), black_box("incomprehensibilities")))
    });
}

criterion_group!(benches, bench_alignment, bench_pipeline, bench_edit_ratio);
criterion_main!(benches);
