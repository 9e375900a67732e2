//! Benchmarks for timeline planning
//!
//! Tests performance of validating points documents and planning segments.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use temposync::plan::{normalize, plan};
use temposync::points::validate;

/// Points document with `n` points in reverse order, none at zero
fn reversed_document(n: usize) -> Value {
    let points: Vec<Value> = (1..=n)
        .rev()
        .map(|i| json!([i as f64 * 250.0, 0.5 + (i % 7) as f64 * 0.25]))
        .collect();
    json!({ "points": points })
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    for n in [10, 100, 1000] {
        let document = reversed_document(n);
        group.bench_with_input(BenchmarkId::new("points", n), &document, |b, doc| {
            b.iter(|| validate(black_box(doc)));
        });
    }

    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");

    for n in [10, 100, 1000] {
        let set = validate(&reversed_document(n)).unwrap();

        group.bench_with_input(BenchmarkId::new("normalize", n), &set, |b, set| {
            b.iter(|| normalize(black_box(set)));
        });

        group.bench_with_input(BenchmarkId::new("segments", n), &set, |b, set| {
            b.iter(|| plan(black_box(set)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_validate, bench_plan);
criterion_main!(benches);
