//! Criterion micro-benchmarks for particle, bond and cell capture.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use mdsync_bench::{reference_profile, stress_profile};
use mdsync_snapshot::SnapshotSession;

/// Benchmark: unwrapped particle capture on the reference melt.
fn bench_particles_unwrapped(c: &mut Criterion) {
    let engine = reference_profile(42);
    let mut session = SnapshotSession::default();
    c.bench_function("particles_unwrapped_8k", |b| {
        b.iter(|| {
            let snap = session.sync_particles(Some(&engine), false);
            black_box(snap.positions.handle());
        });
    });
}

/// Benchmark: wrapped particle capture, no image arithmetic.
fn bench_particles_wrapped(c: &mut Criterion) {
    let engine = reference_profile(42);
    let mut session = SnapshotSession::default();
    c.bench_function("particles_wrapped_8k", |b| {
        b.iter(|| {
            let snap = session.sync_particles(Some(&engine), true);
            black_box(snap.positions.handle());
        });
    });
}

/// Benchmark: deduplicated minimum-image bond capture.
fn bench_bonds_unwrapped(c: &mut Criterion) {
    let engine = reference_profile(42);
    let mut session = SnapshotSession::default();
    c.bench_function("bonds_unwrapped_8k", |b| {
        b.iter(|| {
            let snap = session.sync_bonds(Some(&engine), false);
            black_box(snap.count);
        });
    });
}

/// Benchmark: cell capture including corner recomputation.
fn bench_simulation_box(c: &mut Criterion) {
    let mut engine = reference_profile(42);
    let mut session = SnapshotSession::default();
    c.bench_function("simulation_box", |b| {
        b.iter(|| {
            let snap = session.sync_simulation_box(Some(&mut engine));
            black_box(snap.matrix.handle());
        });
    });
}

/// Benchmark: full publish (particles, bonds, cell) on the stress melt.
fn bench_full_publish_stress(c: &mut Criterion) {
    let mut engine = stress_profile(42);
    let mut session = SnapshotSession::default();
    c.bench_function("full_publish_97k", |b| {
        b.iter(|| {
            black_box(session.sync_particles(Some(&engine), false).count);
            black_box(session.sync_bonds(Some(&engine), false).count);
            black_box(session.sync_simulation_box(Some(&mut engine)).lengths.handle());
        });
    });
}

criterion_group!(
    benches,
    bench_particles_unwrapped,
    bench_particles_wrapped,
    bench_bonds_unwrapped,
    bench_simulation_box,
    bench_full_publish_stress
);
criterion_main!(benches);
