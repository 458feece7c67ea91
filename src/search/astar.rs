use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::instrument;

use super::{trivial_result, Bookkeeping, SearchResult, SearchStrategy, StrategyKind};
use crate::grid::{Cell, GridSnapshot};
use crate::types::SearchStats;

/// A* with the manhattan distance as heuristic. Every step costs at least one,
/// so the heuristic is admissible and consistent, and the first time the goal
/// is popped its path is optimal.
///
/// The frontier is ordered by `(g + h, h, sequence)`: among equal estimates the
/// cell closer to the goal wins, then whichever was pushed first, which follows
/// neighbor order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl AStar {
    /// the heuristic, exposed for tests
    pub fn heuristic(from: Cell, goal: Cell) -> u32 {
        from.manhattan(goal)
    }
}

impl SearchStrategy for AStar {
    fn kind(&self) -> StrategyKind {
        StrategyKind::AStar
    }

    #[instrument(level = "trace", skip_all, fields(strategy = "astar"))]
    fn search_bounded(
        &self,
        snapshot: &GridSnapshot,
        start: Cell,
        goal: Cell,
        max_expansions: usize,
    ) -> (SearchResult, SearchStats) {
        if let Some(result) = trivial_result(snapshot, start, goal) {
            return result;
        }
        let mut book = Bookkeeping::new(snapshot, max_expansions);
        let goal_idx = snapshot.index_of(goal);
        let start_idx = snapshot.index_of(start);

        let mut cost_so_far = vec![u32::MAX; snapshot.cell_count()];
        let mut sequence: u32 = 0;
        let mut frontier = BinaryHeap::new();
        cost_so_far[start_idx.as_usize()] = 0;
        let h = Self::heuristic(start, goal);
        frontier.push(Reverse((h, h, sequence, start_idx)));

        while let Some(Reverse((_, _, _, current))) = frontier.pop() {
            if book.is_seen(current) {
                continue;
            }
            if !book.try_expand() {
                break;
            }
            book.mark_seen(current);
            if current == goal_idx {
                return book.found(snapshot, goal_idx);
            }
            let g = cost_so_far[current.as_usize()];
            for next in snapshot.neighbors(snapshot.cell_at(current)) {
                let next_idx = snapshot.index_of(next);
                if book.is_seen(next_idx) || !snapshot.is_traversable(next) {
                    continue;
                }
                let next_g = g.saturating_add(snapshot.step_cost(next));
                if next_g < cost_so_far[next_idx.as_usize()] {
                    cost_so_far[next_idx.as_usize()] = next_g;
                    book.set_parent(next_idx, current);
                    let h = Self::heuristic(next, goal);
                    sequence += 1;
                    frontier.push(Reverse((next_g.saturating_add(h), h, sequence, next_idx)));
                }
            }
        }
        book.not_found()
    }
}
