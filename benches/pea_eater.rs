use std::fs::File;
use std::time::{Duration, Instant};

use num_format::{Locale, ToFormattedString};
use rand::{rngs::SmallRng, SeedableRng};
use tracing_subscriber::prelude::*;

use snake_planner::planner::{Planner, PlannerConfig};
use snake_planner::search::StrategyKind;
use snake_planner::types::{Direction, PlannerInstruments, SearchStats};
use snake_planner::wire_representation::scenario::{random_tick_state, STANDARD_OBSTACLES};
use snake_planner::wire_representation::{Advance, TickState};

#[derive(Debug, Default)]
struct Instruments {
    expanded: std::cell::Cell<usize>,
    searching: std::cell::Cell<Duration>,
}

impl PlannerInstruments for Instruments {
    fn observe_search(&self, _: StrategyKind, stats: SearchStats) {
        self.expanded.set(self.expanded.get() + stats.expanded);
        self.searching.set(self.searching.get() + stats.elapsed);
    }
}

// targets walled in by obstacles are never reached, so games are cut off
const MAX_TICKS: usize = 5_000;

/// plays one game to the end, returns the number of ticks and the final state
fn run_till_end(
    planner: &mut Planner<Instruments>,
    rng: &mut SmallRng,
    mut state: TickState,
) -> (usize, TickState) {
    let mut ticks = 0;
    while ticks < MAX_TICKS {
        let direction = match planner.tick(&state, &mut |_: Direction| {}) {
            Ok(d) => d,
            Err(_) => return (ticks, state),
        };
        ticks += 1;
        state = match state.advance(direction, rng) {
            Ok(Advance::Moved(s)) | Ok(Advance::Ate(s)) => s,
            Ok(Advance::BoardFull(s)) => return (ticks, s),
            Err(_) => return (ticks, state),
        };
    }
    (ticks, state)
}

fn main() {
    let (flame_layer, _flush_guard) =
        tracing_flame::FlameLayer::with_file("./tracing.folded").unwrap();
    tracing_subscriber::registry().with(flame_layer).init();

    let guard = pprof::ProfilerGuardBuilder::default()
        .frequency(1000)
        .build()
        .unwrap();

    for kind in StrategyKind::ALL {
        let config = PlannerConfig {
            strategy: kind,
            ..PlannerConfig::default()
        };
        let mut planner = Planner::with_instruments(config, Instruments::default());
        let mut rng = SmallRng::seed_from_u64(99);
        let start = Instant::now();
        let mut total_ticks = 0;
        let mut total_length = 0;
        let games = 20;
        for _ in 0..games {
            let initial = random_tick_state(&mut rng, 20, 20, STANDARD_OBSTACLES);
            let (ticks, last) = run_till_end(&mut planner, &mut rng, initial);
            total_ticks += ticks;
            total_length += last.body.len();
        }
        let instruments = planner.instruments();
        println!(
            "{:>8}: {} ticks in {}ms, {} cells expanded in {}us of search, mean final length {}",
            kind,
            total_ticks.to_formatted_string(&Locale::en),
            start.elapsed().as_millis().to_formatted_string(&Locale::en),
            instruments.expanded.get().to_formatted_string(&Locale::en),
            instruments.searching.get().as_micros().to_formatted_string(&Locale::en),
            total_length / games,
        );
    }

    if let Ok(report) = guard.report().build() {
        let file = File::create("flamegraph.svg").unwrap();
        report.flamegraph(file).unwrap();
    }
}
