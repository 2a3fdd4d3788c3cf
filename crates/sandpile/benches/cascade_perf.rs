//! Benchmark: cascade and full-run cost.
//!
//! Piles are rebuilt with `iter_batched` before every iteration so each
//! measured drop lands on the same pre-loaded state.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use sandpile::{Pile, Simulation, SimulationParams};

/// Pile grown by `grains` center drops, so further drops hit a settled mound.
fn grown_pile(size: usize, threshold: u32, grains: usize) -> Pile {
    let mut pile = Pile::new(size, size, threshold).unwrap();
    let center = size as i64 / 2;
    for _ in 0..grains {
        pile.drop_at(center, center).unwrap();
    }
    pile
}

/// Single grain on an empty pile: baseline of the queue bookkeeping.
fn bench_drop_empty(c: &mut Criterion) {
    c.bench_function("drop_at_empty_64x64", |b| {
        b.iter_batched(
            || Pile::new(64, 64, 2).unwrap(),
            |mut pile| {
                black_box(pile.drop_at(32, 32).unwrap());
            },
            BatchSize::SmallInput,
        );
    });
}

/// Burst of drops on a grown mound, where avalanches of hundreds of falls
/// occur.
fn bench_drops_on_mound(c: &mut Criterion) {
    c.bench_function("drop_at_mound_64x64_x100", |b| {
        b.iter_batched(
            || grown_pile(64, 2, 2_000),
            |mut pile| {
                for _ in 0..100 {
                    black_box(pile.drop_at(32, 32).unwrap());
                }
            },
            BatchSize::SmallInput,
        );
    });
}

/// Default-sized seeded run, what the CLI does.
fn bench_simulation_run(c: &mut Criterion) {
    let params = SimulationParams {
        steps: 10_000,
        seed: Some(42),
        ..SimulationParams::default()
    };
    let simulation = Simulation::new(params).unwrap();
    c.bench_function("simulate_12x12_10k_steps", |b| {
        b.iter(|| black_box(simulation.run().unwrap()));
    });
}

criterion_group!(
    benches,
    bench_drop_empty,
    bench_drops_on_mound,
    bench_simulation_run,
);
criterion_main!(benches);
