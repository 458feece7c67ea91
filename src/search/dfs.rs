use tracing::instrument;

use super::{trivial_result, Bookkeeping, SearchResult, SearchStrategy, StrategyKind};
use crate::grid::{Cell, CellIndex, GridSnapshot};
use crate::types::SearchStats;

/// Depth first search over an explicit stack, so board size never turns in to
/// recursion depth. Cells are closed when popped, and neighbors are pushed in
/// reverse so the first direction in neighbor order is explored first.
/// Paths are rarely shortest.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl SearchStrategy for DepthFirst {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Dfs
    }

    #[instrument(level = "trace", skip_all, fields(strategy = "dfs"))]
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

        // (cell, the cell it was pushed from)
        let mut stack: Vec<(CellIndex, Option<CellIndex>)> = vec![(snapshot.index_of(start), None)];

        while let Some((current, parent)) = stack.pop() {
            if book.is_seen(current) {
                continue;
            }
            if !book.try_expand() {
                break;
            }
            book.mark_seen(current);
            if let Some(parent) = parent {
                book.set_parent(current, parent);
            }
            if current == goal_idx {
                return book.found(snapshot, goal_idx);
            }

            let cell = snapshot.cell_at(current);
            let mut pushes = [None; 4];
            for (slot, next) in pushes.iter_mut().zip(snapshot.neighbors(cell)) {
                let next_idx = snapshot.index_of(next);
                if !book.is_seen(next_idx) && snapshot.is_traversable(next) {
                    *slot = Some(next_idx);
                }
            }
            stack.extend(pushes.iter().rev().flatten().map(|&n| (n, Some(current))));
        }
        book.not_found()
    }
}
