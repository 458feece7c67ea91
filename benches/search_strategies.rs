use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::SmallRng, SeedableRng};

use snake_planner::grid::GridSnapshot;
use snake_planner::search::{SearchStrategy, StrategyKind};
use snake_planner::wire_representation::scenario::{random_tick_state, STANDARD_OBSTACLES};

fn boards(size: u32, obstacles: usize) -> Vec<GridSnapshot> {
    let mut rng = SmallRng::seed_from_u64(1234);
    (0..32)
        .map(|_| {
            random_tick_state(&mut rng, size, size, obstacles)
                .as_snapshot(10)
                .expect("random boards are valid")
        })
        .collect()
}

fn bench_strategies(c: &mut Criterion) {
    let mut g = c.benchmark_group("search");
    for (size, obstacles) in [(20, STANDARD_OBSTACLES), (100, 1000), (255, 6500)] {
        let snapshots = boards(size, obstacles);
        for kind in StrategyKind::ALL {
            g.bench_with_input(
                BenchmarkId::new(kind.to_string(), format!("{}x{}", size, size)),
                &snapshots,
                |b, snapshots| {
                    b.iter(|| {
                        for s in snapshots {
                            black_box(kind.search(black_box(s), s.head(), s.target()));
                        }
                    })
                },
            );
        }
    }
    g.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
