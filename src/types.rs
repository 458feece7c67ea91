//! various types that are useful for planning snake moves
use crate::grid::Cell;
use crate::search::StrategyKind;
use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A vector with which to do positional math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// row offset, positive is down
    pub row: i64,
    /// column offset, positive is right
    pub col: i64,
}

/// Represents a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Right,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Left,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Right => write!(f, "right"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
        }
    }
}

impl Direction {
    /// all directions in neighbor order. Every search expands neighbors in this
    /// order, which is what makes tie-breaking identical across strategies
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// convert this move to a vector
    pub fn to_vector(self) -> Vector {
        match self {
            Direction::Up => Vector { row: -1, col: 0 },
            Direction::Right => Vector { row: 0, col: 1 },
            Direction::Down => Vector { row: 1, col: 0 },
            Direction::Left => Vector { row: 0, col: -1 },
        }
    }

    /// create a Direction from a unit vector, None for anything that isn't one
    pub fn from_vector(vector: Vector) -> Option<Self> {
        match vector {
            Vector { row: -1, col: 0 } => Some(Self::Up),
            Vector { row: 0, col: 1 } => Some(Self::Right),
            Vector { row: 1, col: 0 } => Some(Self::Down),
            Vector { row: 0, col: -1 } => Some(Self::Left),
            _ => None,
        }
    }

    /// the direction that steps from `from` to the orthogonally adjacent `to`
    pub fn between(from: Cell, to: Cell) -> Option<Self> {
        Self::from_vector(to.offset_from(from))
    }

    /// the opposite direction
    pub fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// converts a path of cells in to the moves that walk it, dropping any step
/// that isn't between adjacent cells
pub fn path_to_directions(path: &[Cell]) -> Vec<Direction> {
    path.windows(2)
        .filter_map(|w| Direction::between(w[0], w[1]))
        .collect()
}

/// Counters collected by a single search call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// number of cells popped from the frontier and expanded
    pub expanded: usize,
    /// wall time spent in the search
    pub elapsed: Duration,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cells expanded in {}us",
            self.expanded.to_formatted_string(&Locale::en),
            self.elapsed.as_micros().to_formatted_string(&Locale::en)
        )
    }
}

/// Instruments to be used with planning
pub trait PlannerInstruments: std::fmt::Debug {
    #[allow(missing_docs)]
    fn observe_search(&self, strategy: StrategyKind, stats: SearchStats);
}

/// Instruments that ignore everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInstruments;

impl PlannerInstruments for NoopInstruments {
    fn observe_search(&self, _strategy: StrategyKind, _stats: SearchStats) {}
}
