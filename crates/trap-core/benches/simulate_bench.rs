// ─────────────────────────────────────────────────────────────────────
// SCPN Trapping — Simulation Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;
use trap_core::batch::run_batch;
use trap_core::simulator::Simulator;
use trap_physics::cross_sections::HydrogenCrossSections;
use trap_physics::field::MagneticField;
use trap_types::config::{BatchConfig, FieldProfile, SimulatorConfig, TrialLimits};

fn config(field: FieldProfile) -> SimulatorConfig {
    SimulatorConfig {
        e_low: 17_000.0,
        theta_transport: 0.4115,
        theta_pinch: 0.3218,
        gas_density: 5e19,
        b_source: 0.6,
        field,
        limits: TrialLimits::default(),
    }
}

fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");

    group.bench_function("uniform_trapped_trial", |b| {
        b.iter_batched(
            || {
                Simulator::new(
                    config(FieldProfile::Uniform),
                    HydrogenCrossSections::tritium(),
                    StdRng::seed_from_u64(42),
                )
                .expect("config should be valid")
            },
            |mut sim| {
                let r = sim.simulate(18_600.0, 1.2, 0.0);
                black_box(r.collision_number);
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.bench_function("mirror_trapped_trial", |b| {
        b.iter_batched(
            || {
                Simulator::new(
                    config(FieldProfile::Mirror { mirror_ratio: 1.5 }),
                    HydrogenCrossSections::tritium(),
                    StdRng::seed_from_u64(42),
                )
                .expect("config should be valid")
            },
            |mut sim| {
                let r = sim.simulate(18_600.0, 1.2, 0.0);
                black_box(r.collision_number);
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    group.sample_size(10);

    let cfg = config(FieldProfile::Uniform);
    let field = MagneticField::uniform(cfg.b_source);
    let xs = HydrogenCrossSections::tritium();
    let batch = BatchConfig {
        trials: 1_000,
        energy: 18_600.0,
        seed: 2026,
        chunk_size: 128,
    };

    group.bench_function("uniform_1000_trials", |b| {
        b.iter(|| {
            let out = run_batch(&cfg, &field, &xs, &batch).expect("batch should run");
            black_box(out.summary.trapping_fraction);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_simulate, bench_batch);
criterion_main!(benches);
