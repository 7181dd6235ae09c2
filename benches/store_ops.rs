//! Micro-operation benchmarks for the content stores.
//!
//! Run with: `cargo bench --bench store_ops`

use std::hint::black_box;
use std::time::Instant;

use contentkit::store::{ContentManager, Priority};
use contentkit::value::Value;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};

const ENTRIES: u64 = 4_096;

// ============================================================================
// ContentManager
// ============================================================================

fn bench_content_manager(c: &mut Criterion) {
    let mut group = c.benchmark_group("content_manager");
    group.throughput(Throughput::Elements(ENTRIES));

    group.bench_function("add", |b| {
        b.iter(|| {
            let mut store: ContentManager = ContentManager::new();
            for i in 0..ENTRIES {
                black_box(store.add(Value::from(i), None, None));
            }
        })
    });

    group.bench_function("get_hit", |b| {
        b.iter_custom(|iters| {
            let mut store: ContentManager = ContentManager::new();
            let keys: Vec<_> = (0..ENTRIES)
                .map(|i| store.add(Value::from(i), None, None))
                .collect();
            let start = Instant::now();
            for _ in 0..iters {
                for key in &keys {
                    black_box(store.peek(key));
                }
            }
            start.elapsed()
        })
    });

    // Linear scan of one partition per call.
    group.bench_function("add_unique_small", |b| {
        b.iter(|| {
            let mut store: ContentManager = ContentManager::new();
            for i in 0..ENTRIES {
                black_box(store.add_unique(Value::from(i % 64), None, None));
            }
        })
    });

    group.finish();
}

// ============================================================================
// Priority
// ============================================================================

fn bench_priority(c: &mut Criterion) {
    let mut group = c.benchmark_group("priority");
    group.throughput(Throughput::Elements(ENTRIES));

    group.bench_function("add_content", |b| {
        b.iter(|| {
            let mut list: Priority = Priority::new();
            for i in 0..ENTRIES {
                black_box(list.add_content(Value::from(i), (i % 32) as i64, None));
            }
        })
    });

    group.bench_function("get_content_values", |b| {
        let mut list: Priority = Priority::new();
        for i in 0..ENTRIES {
            list.add_content(Value::from(i), (i % 32) as i64, None);
        }
        b.iter(|| black_box(list.get_content_values()))
    });

    group.finish();
}

criterion_group!(benches, bench_content_manager, bench_priority);
criterion_main!(benches);
