use std::time::Instant;

use criterion::{black_box, criterion_group, criterion_main, Bencher, Criterion};
use rand::{rngs::SmallRng, SeedableRng};

use snake_planner::planner::{Planner, PlannerConfig};
use snake_planner::search::StrategyKind;
use snake_planner::types::Direction;
use snake_planner::wire_representation::scenario::{random_tick_state, STANDARD_OBSTACLES};
use snake_planner::wire_representation::{Advance, TickState};

/// plans and applies one move, starting a fresh game whenever the last one ends
fn step(planner: &mut Planner, rng: &mut SmallRng, state: TickState) -> TickState {
    let direction = match planner.tick(black_box(&state), &mut |_: Direction| {}) {
        Ok(d) => d,
        Err(_) => return random_tick_state(rng, 20, 20, STANDARD_OBSTACLES),
    };
    match state.advance(direction, rng) {
        Ok(Advance::Moved(s)) | Ok(Advance::Ate(s)) => s,
        Ok(Advance::BoardFull(_)) | Err(_) => random_tick_state(rng, 20, 20, STANDARD_OBSTACLES),
    }
}

fn bench_planner(b: &mut Bencher, strategy: StrategyKind) {
    b.iter_custom(|iter_count| {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut planner = Planner::new(PlannerConfig {
            strategy,
            ..PlannerConfig::default()
        });
        let mut state = random_tick_state(&mut rng, 20, 20, STANDARD_OBSTACLES);

        let start = Instant::now();
        for _ in 0..iter_count {
            state = step(&mut planner, &mut rng, state);
        }
        start.elapsed()
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut g = c.benchmark_group("pea eater");
    for kind in StrategyKind::ALL {
        g.bench_function(kind.to_string(), |b| bench_planner(b, kind));
    }
    g.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
