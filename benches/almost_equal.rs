//! Benchmarks: exact comparison vs the approximate predicate used by reverse lookups.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lexical_cache::almost_eq;

fn bench_compare(c: &mut Criterion) {
    let values: Vec<f64> = (0..256).map(|i| (i as f64) * 0.1 - 12.8).collect();
    let probe = 0.1 + 0.2;

    let mut group = c.benchmark_group("Float comparison (256 keys)");
    group.bench_function("==", |b| {
        b.iter(|| values.iter().filter(|&&v| v == black_box(probe)).count())
    });
    group.bench_function("almost_eq", |b| {
        b.iter(|| {
            values
                .iter()
                .filter(|&&v| almost_eq(v, black_box(probe)))
                .count()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_compare);
criterion_main!(benches);
