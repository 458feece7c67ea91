use std::collections::VecDeque;

use tracing::instrument;

use super::{trivial_result, Bookkeeping, SearchResult, SearchStrategy, StrategyKind};
use crate::grid::{Cell, GridSnapshot};
use crate::types::SearchStats;

/// Breadth first search. A cell is marked as seen when it is first enqueued, so
/// every cell enters the queue once and the first path to reach the goal is a
/// shortest one by number of moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl SearchStrategy for BreadthFirst {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Bfs
    }

    #[instrument(level = "trace", skip_all, fields(strategy = "bfs"))]
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

        let mut queue = VecDeque::with_capacity(snapshot.cell_count());
        book.mark_seen(start_idx);
        queue.push_back(start_idx);

        while let Some(current) = queue.pop_front() {
            if !book.try_expand() {
                break;
            }
            if current == goal_idx {
                return book.found(snapshot, goal_idx);
            }
            for next in snapshot.neighbors(snapshot.cell_at(current)) {
                let next_idx = snapshot.index_of(next);
                if book.is_seen(next_idx) || !snapshot.is_traversable(next) {
                    continue;
                }
                book.mark_seen(next_idx);
                book.set_parent(next_idx, current);
                queue.push_back(next_idx);
            }
        }
        book.not_found()
    }
}
