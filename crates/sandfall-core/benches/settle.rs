use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use sandfall_core::{FallMode, Grid, NoopStats, SettlingEngine};
use std::hint::black_box;

fn bench_tick(c: &mut Criterion) {
    for (name, mode) in [("step", FallMode::Step), ("telescope", FallMode::Telescope)] {
        let mut rng = Xoshiro256StarStar::seed_from_u64(42);
        let start = Grid::random(400, 300, 0.5, &mut rng);
        let mut engine = SettlingEngine::new(mode);

        c.bench_function(&format!("settle_tick_400x300_{name}"), |b| {
            let mut grid = start.clone();
            b.iter(|| {
                engine.tick(black_box(&mut grid), &mut rng, &mut NoopStats);
            });
        });
    }
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
