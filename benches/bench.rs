//! Criterion benchmarks for ccoindex.
//!
//! Covers ingestion, optimization and top-k search over synthetic
//! user/item interaction data.

use std::hint::black_box;

use ccoindex::prelude::*;
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::Rng;

const ITEM_COUNT: usize = 5_000;

/// Generate users with random item histories in two fields.
fn generate_documents(count: usize) -> Vec<Document> {
    let mut rng = rand::rng();
    (0..count)
        .map(|i| {
            let viewed: Vec<String> = (0..rng.random_range(5..40))
                .map(|_| format!("item-{}", rng.random_range(0..ITEM_COUNT)))
                .collect();
            let purchased: Vec<String> = (0..rng.random_range(1..8))
                .map(|_| format!("item-{}", rng.random_range(0..ITEM_COUNT)))
                .collect();
            Document::builder()
                .id(format!("user-{i}"))
                .add_text("viewed", viewed.join(","))
                .add_tokens("purchased", purchased)
                .build()
        })
        .collect()
}

fn building_index(docs: &[Document]) -> CcoIndex {
    let mut index = CcoIndex::new();
    index.add_field("viewed").unwrap();
    index.add_field("purchased").unwrap();
    index.add_documents(docs).unwrap();
    index
}

fn random_query(rng: &mut impl Rng) -> Query {
    let items: Vec<String> = (0..10)
        .map(|_| format!("item-{}", rng.random_range(0..ITEM_COUNT)))
        .collect();
    Query::new()
        .with_field("viewed", items.join(","))
        .with_field("purchased", items[..3].to_vec())
}

fn bench_ingestion(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingestion");
    group.sample_size(10);

    for count in [1_000, 10_000] {
        let docs = generate_documents(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("add_documents", count), &docs, |b, docs| {
            b.iter(|| black_box(building_index(docs)))
        });

        group.bench_with_input(BenchmarkId::new("optimize", count), &docs, |b, docs| {
            b.iter_batched(
                || building_index(docs),
                |mut index| {
                    index.optimize();
                    black_box(index)
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    let mut index = building_index(&generate_documents(10_000));
    index.optimize();
    let searcher = index.searcher().unwrap();

    let mut rng = rand::rng();
    let queries: Vec<Query> = (0..100).map(|_| random_query(&mut rng)).collect();

    for limit in [10, 100] {
        group.bench_function(BenchmarkId::new("top_k", limit), |b| {
            b.iter(|| {
                for query in &queries {
                    black_box(searcher.search(query, limit, true));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ingestion, bench_search);
criterion_main!(benches);
