//! Debris field generation and per-frame wrap benchmarks.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use drift_config::DebrisConfig;
use drift_space::DebrisField;
use glam::Vec3;

fn bench_generate(c: &mut Criterion) {
    let config = DebrisConfig::default();
    c.bench_function("debris_generate_2000", |bencher| {
        bencher.iter(|| {
            black_box(DebrisField::new(
                Vec3::ZERO,
                2000,
                50_000.0,
                black_box(1_337_420),
                &config,
            ))
        })
    });
}

fn bench_update(c: &mut Criterion) {
    let config = DebrisConfig::default();
    let mut field = DebrisField::new(Vec3::ZERO, 2000, 50_000.0, 1_337_420, &config);
    let mut anchor = Vec3::ZERO;
    c.bench_function("debris_update_2000", |bencher| {
        bencher.iter(|| {
            anchor.z += 1_000.0;
            field.update_around(black_box(anchor));
        })
    });
}

criterion_group!(benches, bench_generate, bench_update);
criterion_main!(benches);
