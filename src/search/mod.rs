//! Search strategies over a [GridSnapshot]
//!
//! All four strategies implement [SearchStrategy] and are interchangeable: given
//! the same snapshot they are deterministic, they never expand more cells than
//! the board holds, and running out of frontier is reported as
//! [SearchResult::NotFound] rather than as an error.
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::grid::{Cell, CellIndex, GridSnapshot};
use crate::types::SearchStats;

mod astar;
mod bfs;
mod dfs;
mod dijkstra;

pub use astar::AStar;
pub use bfs::BreadthFirst;
pub use dfs::DepthFirst;
pub use dijkstra::Dijkstra;

/// Outcome of a single search call
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SearchResult {
    /// cells from start to goal, both inclusive
    Found(Vec<Cell>),
    /// the frontier emptied, or the expansion cap was hit, before the goal was reached
    NotFound,
}

impl SearchResult {
    #[allow(missing_docs)]
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }

    /// the path, if one was found
    pub fn path(&self) -> Option<&[Cell]> {
        match self {
            SearchResult::Found(path) => Some(path),
            SearchResult::NotFound => None,
        }
    }

    /// number of moves along the path
    pub fn moves(&self) -> Option<usize> {
        self.path().map(|p| p.len() - 1)
    }
}

/// The capability every strategy provides: find a path from `start` to `goal`
pub trait SearchStrategy: fmt::Debug {
    /// which strategy this is
    fn kind(&self) -> StrategyKind;

    /// search, stopping with [SearchResult::NotFound] once `max_expansions` cells
    /// have been expanded
    fn search_bounded(
        &self,
        snapshot: &GridSnapshot,
        start: Cell,
        goal: Cell,
        max_expansions: usize,
    ) -> (SearchResult, SearchStats);

    /// search with the board size as the expansion bound, returning the counters too
    fn search_with_stats(
        &self,
        snapshot: &GridSnapshot,
        start: Cell,
        goal: Cell,
    ) -> (SearchResult, SearchStats) {
        self.search_bounded(snapshot, start, goal, snapshot.cell_count())
    }

    #[allow(missing_docs)]
    fn search(&self, snapshot: &GridSnapshot, start: Cell, goal: Cell) -> SearchResult {
        self.search_with_stats(snapshot, start, goal).0
    }
}

/// Identifies one of the strategies, this is what gets configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    #[allow(missing_docs)]
    #[serde(rename = "bfs")]
    Bfs,
    #[allow(missing_docs)]
    #[serde(rename = "dfs")]
    Dfs,
    #[allow(missing_docs)]
    #[serde(rename = "dijkstra")]
    Dijkstra,
    #[allow(missing_docs)]
    #[serde(rename = "astar")]
    AStar,
}

impl StrategyKind {
    /// every strategy, in menu order
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Bfs,
        StrategyKind::Dfs,
        StrategyKind::Dijkstra,
        StrategyKind::AStar,
    ];

    /// maps the "1" to "4" menu choices, anything else falls back to breadth first
    pub fn from_menu_choice(choice: &str) -> Self {
        match choice.trim() {
            "2" => StrategyKind::Dfs,
            "3" => StrategyKind::Dijkstra,
            "4" => StrategyKind::AStar,
            _ => StrategyKind::Bfs,
        }
    }
}

impl Default for StrategyKind {
    fn default() -> Self {
        StrategyKind::Bfs
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Bfs => write!(f, "bfs"),
            StrategyKind::Dfs => write!(f, "dfs"),
            StrategyKind::Dijkstra => write!(f, "dijkstra"),
            StrategyKind::AStar => write!(f, "astar"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(StrategyKind::Bfs),
            "dfs" => Ok(StrategyKind::Dfs),
            "dijkstra" => Ok(StrategyKind::Dijkstra),
            "astar" | "a*" => Ok(StrategyKind::AStar),
            other => Err(format!("unknown search strategy: {}", other).into()),
        }
    }
}

impl SearchStrategy for StrategyKind {
    fn kind(&self) -> StrategyKind {
        *self
    }

    fn search_bounded(
        &self,
        snapshot: &GridSnapshot,
        start: Cell,
        goal: Cell,
        max_expansions: usize,
    ) -> (SearchResult, SearchStats) {
        match self {
            StrategyKind::Bfs => BreadthFirst.search_bounded(snapshot, start, goal, max_expansions),
            StrategyKind::Dfs => DepthFirst.search_bounded(snapshot, start, goal, max_expansions),
            StrategyKind::Dijkstra => {
                Dijkstra.search_bounded(snapshot, start, goal, max_expansions)
            }
            StrategyKind::AStar => AStar.search_bounded(snapshot, start, goal, max_expansions),
        }
    }
}

/// Per-call bookkeeping shared by the strategies. Lives for one search only.
struct Bookkeeping {
    parents: Vec<Option<CellIndex>>,
    seen: Vec<bool>,
    expanded: usize,
    max_expansions: usize,
    started: Instant,
}

impl Bookkeeping {
    fn new(snapshot: &GridSnapshot, max_expansions: usize) -> Self {
        let n = snapshot.cell_count();
        Bookkeeping {
            parents: vec![None; n],
            seen: vec![false; n],
            expanded: 0,
            max_expansions: max_expansions.min(n),
            started: Instant::now(),
        }
    }

    fn is_seen(&self, idx: CellIndex) -> bool {
        self.seen[idx.as_usize()]
    }

    fn mark_seen(&mut self, idx: CellIndex) {
        self.seen[idx.as_usize()] = true;
    }

    fn set_parent(&mut self, idx: CellIndex, parent: CellIndex) {
        self.parents[idx.as_usize()] = Some(parent);
    }

    /// counts one expansion, false once the cap has been reached
    fn try_expand(&mut self) -> bool {
        if self.expanded >= self.max_expansions {
            return false;
        }
        self.expanded += 1;
        true
    }

    fn stats(&self) -> SearchStats {
        SearchStats {
            expanded: self.expanded,
            elapsed: self.started.elapsed(),
        }
    }

    fn trace_path(&self, snapshot: &GridSnapshot, goal: CellIndex) -> Vec<Cell> {
        let mut path = vec![snapshot.cell_at(goal)];
        let mut current = goal;
        while let Some(parent) = self.parents[current.as_usize()] {
            path.push(snapshot.cell_at(parent));
            current = parent;
        }
        path.reverse();
        path
    }

    fn found(&self, snapshot: &GridSnapshot, goal: CellIndex) -> (SearchResult, SearchStats) {
        (
            SearchResult::Found(self.trace_path(snapshot, goal)),
            self.stats(),
        )
    }

    fn not_found(&self) -> (SearchResult, SearchStats) {
        (SearchResult::NotFound, self.stats())
    }
}

/// checks shared by every strategy before any expansion happens
fn trivial_result(
    snapshot: &GridSnapshot,
    start: Cell,
    goal: Cell,
) -> Option<(SearchResult, SearchStats)> {
    if !snapshot.in_bounds(start) || !snapshot.in_bounds(goal) {
        return Some((SearchResult::NotFound, SearchStats::default()));
    }
    if start == goal {
        return Some((SearchResult::Found(vec![start]), SearchStats::default()));
    }
    None
}
