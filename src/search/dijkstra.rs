use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::instrument;

use super::{trivial_result, Bookkeeping, SearchResult, SearchStrategy, StrategyKind};
use crate::grid::{Cell, GridSnapshot};
use crate::types::SearchStats;

/// Dijkstra's algorithm keyed on accumulated step cost. Equal costs pop in
/// insertion order via a sequence number. On a board without hazards every step
/// costs one and the paths match breadth first; hazards make it route around
/// expensive cells when a cheaper detour exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl SearchStrategy for Dijkstra {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Dijkstra
    }

    #[instrument(level = "trace", skip_all, fields(strategy = "dijkstra"))]
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

        let mut best_cost = vec![u32::MAX; snapshot.cell_count()];
        let mut sequence: u32 = 0;
        let mut frontier = BinaryHeap::new();
        best_cost[start_idx.as_usize()] = 0;
        frontier.push(Reverse((0u32, sequence, start_idx)));

        while let Some(Reverse((cost, _, current))) = frontier.pop() {
            // stale entry, a cheaper one was already expanded
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
            for next in snapshot.neighbors(snapshot.cell_at(current)) {
                let next_idx = snapshot.index_of(next);
                if book.is_seen(next_idx) || !snapshot.is_traversable(next) {
                    continue;
                }
                let next_cost = cost.saturating_add(snapshot.step_cost(next));
                if next_cost < best_cost[next_idx.as_usize()] {
                    best_cost[next_idx.as_usize()] = next_cost;
                    book.set_parent(next_idx, current);
                    sequence += 1;
                    frontier.push(Reverse((next_cost, sequence, next_idx)));
                }
            }
        }
        book.not_found()
    }
}
