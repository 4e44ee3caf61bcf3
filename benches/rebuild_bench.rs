//! Benchmarks for the full rebuild path a setter triggers.

use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use std::hint::black_box;

use fentrace::engine::FenwickEngine;

fn bench_rebuild(c: &mut Criterion) {
    c.bench_function("set_element_full_rebuild_n16", |b| {
        let mut engine = FenwickEngine::new();
        b.iter(|| {
            engine.set_element(black_box(7), black_box(42)).unwrap();
            black_box(engine.update_tree().nodes.len());
        });
    });

    c.bench_function("set_size_full_rebuild_n32", |b| {
        let mut engine = FenwickEngine::new();
        b.iter(|| {
            engine.set_size(black_box(32)).unwrap();
            black_box(engine.query_tree().nodes.len());
        });
    });

    c.bench_function("fresh_engine_max_capacity", |b| {
        b.iter(|| {
            let engine = FenwickEngine::with_max_size(black_box(32));
            black_box(engine.prefix_sums().len());
        });
    });
}

criterion_group!(benches, bench_rebuild);
criterion_main!(benches);
