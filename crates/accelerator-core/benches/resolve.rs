//! Benchmarks for accelerator resolution.

use accelerator_core::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn benchmark_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    let cases = [
        ("empty", PresenceSnapshot::empty()),
        ("single_xpu", PresenceSnapshot::empty().with(BackendKind::Xpu)),
        (
            "override",
            PresenceSnapshot::from_kinds([BackendKind::PrivateUse1, BackendKind::Cuda]),
        ),
        (
            "conflict",
            PresenceSnapshot::from_kinds([BackendKind::Cuda, BackendKind::Xpu]),
        ),
    ];

    for (name, snapshot) in cases {
        group.bench_with_input(BenchmarkId::new("snapshot", name), &snapshot, |bench, snapshot| {
            bench.iter(|| black_box(resolve_with(black_box(snapshot), false)))
        });
    }

    let registry = BackendRegistry::new();
    registry.register(BackendKind::Hip);
    group.bench_function("registry", |bench| {
        bench.iter(|| black_box(resolve_with(&registry, true)))
    });

    let cached = CachedResolver::new(registry.snapshot());
    group.bench_function("cached", |bench| {
        bench.iter(|| black_box(cached.resolve(true)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_resolve);
criterion_main!(benches);
