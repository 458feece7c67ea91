//! random boards for tests and benchmarks
use rand::seq::IteratorRandom;
use rand::Rng;

use super::TickState;
use crate::grid::Cell;

/// length of a freshly spawned snake
pub const INITIAL_LENGTH: usize = 4;

/// number of obstacles on a standard board
pub const STANDARD_OBSTACLES: usize = 40;

impl TickState {
    /// moves the target to a random free cell, returns false when there is none
    pub fn place_target(&mut self, rng: &mut impl Rng) -> bool {
        match self.free_cells().into_iter().choose(rng) {
            Some(cell) => {
                self.target = cell;
                true
            }
            None => false,
        }
    }
}

/// A board with a straight snake of [INITIAL_LENGTH] in the middle facing right,
/// `obstacle_count` random obstacles and a random target. No hazards.
/// Narrow boards get a shorter snake.
pub fn random_tick_state(
    rng: &mut impl Rng,
    width: u32,
    height: u32,
    obstacle_count: usize,
) -> TickState {
    let row = (height / 2) as i32;
    let head_col = (width / 2) as i32;
    let body = (0..INITIAL_LENGTH as i32)
        .map(|i| Cell::new(row, head_col - i))
        .filter(|c| c.col >= 0)
        .collect();

    let mut state = TickState {
        width,
        height,
        body,
        obstacles: vec![],
        target: Cell::new(0, 0),
        hazards: vec![],
        growing: false,
    };
    let mut free = state.free_cells();
    // keep one cell back for the target
    let count = obstacle_count.min(free.len().saturating_sub(1));
    for _ in 0..count {
        let i = rng.gen_range(0..free.len());
        state.obstacles.push(free.swap_remove(i));
    }
    state.place_target(rng);
    state
}
