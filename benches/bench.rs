//! Criterion benchmarks for ftsmachine.
//!
//! - Text analysis
//! - Bulk loading
//! - Token, prefix and phrase search

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use ftsmachine::analysis::analyzer::Analyzer;
use ftsmachine::document::Row;
use ftsmachine::index::FtsTable;
use ftsmachine::query::{MatchType, SearchQuery};
use ftsmachine::schema::TokenizerConfig;

const WORDS: &[&str] = &[
    "search", "engine", "full", "text", "index", "query", "document", "column", "term",
    "phrase", "ranking", "relevance", "score", "analysis", "tokenization", "stemming",
    "running", "jumped", "foxes", "lazily", "connection", "loader", "memory", "posting",
];

/// Generate deterministic rows of (title, body).
fn generate_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            let title: Vec<&str> = (0..4).map(|j| WORDS[(i * 7 + j * 3) % WORDS.len()]).collect();
            let body: Vec<&str> = (0..40).map(|j| WORDS[(i * 13 + j * 5) % WORDS.len()]).collect();
            vec![title.join(" ").into(), body.join(" ").into()]
        })
        .collect()
}

fn loaded_table(rows: Vec<Row>) -> FtsTable {
    let mut table = FtsTable::create_index(["title", "body"], TokenizerConfig::default())
        .expect("valid schema");
    table.load(rows).expect("rows match schema");
    table
}

fn bench_analysis(c: &mut Criterion) {
    let analyzer = TokenizerConfig::default().analyzer();
    let text = WORDS.join(" ").repeat(10);

    let mut group = c.benchmark_group("analysis");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("porter_unicode61", |b| {
        b.iter(|| analyzer.terms(black_box(&text)).expect("analysis"))
    });
    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let rows = generate_rows(1_000);

    let mut group = c.benchmark_group("load");
    group.throughput(Throughput::Elements(rows.len() as u64));
    group.bench_function("1000_rows", |b| {
        b.iter(|| loaded_table(black_box(rows.clone())))
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let table = loaded_table(generate_rows(10_000));

    let mut group = c.benchmark_group("search");
    group.bench_function("token_one_column", |b| {
        b.iter(|| {
            table
                .search(black_box("foxes"), "body", MatchType::TokenMatch, 5)
                .expect("search")
        })
    });
    group.bench_function("token_all_columns", |b| {
        let query = SearchQuery::all_columns("running search");
        b.iter(|| table.execute(black_box(&query)).expect("search"))
    });
    group.bench_function("prefix", |b| {
        b.iter(|| {
            table
                .search(black_box("se*"), "body", MatchType::PrefixMatch, 5)
                .expect("search")
        })
    });
    group.bench_function("phrase", |b| {
        b.iter(|| {
            table
                .search(black_box("full text"), "title", MatchType::ExactPhrase, 5)
                .expect("search")
        })
    });
    group.finish();
}

criterion_group!(benches, bench_analysis, bench_load, bench_search);
criterion_main!(benches);
