//! Searcher and snippet benchmarks
//!
//! Run with: cargo bench --bench searcher_benchmarks
//!
//! Labels:
//! - Searcher (word, substring, snippet)
//! - Field size (small, medium, large)

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use vsm_core::{Document, FieldValue, QueryTerm, QueryTermList, SearcherBuf};
use vsm_search::{
    FieldModifier, FieldSearcher, SnippetModifier, Utf8StrChrFieldSearcher,
    Utf8SubStringFieldSearcher, Utf8SubstringSnippetModifier,
};

// ============================================================================
// Constants and Utilities
// ============================================================================

const FIELD_SIZES: [(&str, usize); 3] = [("small", 16), ("medium", 256), ("large", 4096)];

fn pregenerate_text(words: usize) -> String {
    let vocabulary = [
        "searchable",
        "content",
        "operator",
        "test",
        "benchmark",
        "value",
        "important",
        "quick",
    ];
    (0..words)
        .map(|i| vocabulary[i % vocabulary.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn query(raw: &[&str]) -> QueryTermList {
    raw.iter().map(|t| Arc::new(QueryTerm::parse(t))).collect()
}

fn reset(terms: &QueryTermList) {
    for term in terms {
        term.reset();
    }
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_word_searcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("word");
    for (label, words) in FIELD_SIZES {
        let text = pregenerate_text(words);
        let doc = Document::new().with_field(0, FieldValue::string(&text));
        let terms = query(&["operator", "quick"]);
        let mut searcher = Utf8StrChrFieldSearcher::new(0);
        searcher.prepare(&terms, &SearcherBuf::shared(32));

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("search", label), &doc, |b, doc| {
            b.iter(|| {
                reset(&terms);
                searcher.search(doc)
            })
        });
    }
    group.finish();
}

fn bench_substring_searcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("substring");
    for (label, words) in FIELD_SIZES {
        let text = pregenerate_text(words);
        let doc = Document::new().with_field(0, FieldValue::string(&text));
        group.throughput(Throughput::Bytes(text.len() as u64));

        for (name, raw) in [("single_term", &["era"][..]), ("multi_term", &["era", "ick"][..])] {
            let terms = query(raw);
            let mut searcher = Utf8SubStringFieldSearcher::new(0);
            searcher.prepare(&terms, &SearcherBuf::shared(32));
            group.bench_with_input(BenchmarkId::new(name, label), &doc, |b, doc| {
                b.iter(|| {
                    reset(&terms);
                    searcher.search(doc)
                })
            });
        }
    }
    group.finish();
}

fn bench_snippet(c: &mut Criterion) {
    let mut group = c.benchmark_group("snippet");
    for (label, words) in FIELD_SIZES {
        let value = FieldValue::string(pregenerate_text(words));
        let terms = query(&["era"]);
        let mut searcher = Utf8SubstringSnippetModifier::new(0);
        searcher.prepare(&terms, &SearcherBuf::shared(32));
        let mut modifier = SnippetModifier::new(searcher);

        group.bench_with_input(BenchmarkId::new("modify", label), &value, |b, value| {
            b.iter(|| {
                reset(&terms);
                modifier.modify(value)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_word_searcher,
    bench_substring_searcher,
    bench_snippet
);
criterion_main!(benches);
