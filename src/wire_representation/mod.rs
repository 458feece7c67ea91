#![allow(missing_docs)]
//! types to match the per tick state handed over by the game loop
pub mod scenario;
mod simulator;

use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::{Cell, GridSnapshot, InvalidSnapshot};

pub use simulator::{Advance, Collision};

/// Everything the game loop knows about one tick, as it arrives over the boundary:
/// ```
/// # use snake_planner::wire_representation::TickState;
/// let body = br#"{
///     "width": 5, "height": 5,
///     "body": [{"row": 2, "col": 2}, {"row": 2, "col": 1}],
///     "obstacles": [{"row": 0, "col": 0}],
///     "target": {"row": 4, "col": 4}
/// }"#;
/// let t: TickState = serde_json::from_slice(body).unwrap();
/// assert!(t.hazards.is_empty());
/// assert!(!t.growing);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TickState {
    pub width: u32,
    pub height: u32,
    /// head first, tail last
    pub body: Vec<Cell>,
    #[serde(default)]
    pub obstacles: Vec<Cell>,
    pub target: Cell,
    #[serde(default)]
    pub hazards: Vec<Cell>,
    /// the snake ate on the previous tick, so its tail stays put on the next move
    #[serde(default)]
    pub growing: bool,
}

impl TickState {
    pub fn head(&self) -> Option<Cell> {
        self.body.first().copied()
    }

    pub fn off_board(&self, cell: Cell) -> bool {
        cell.row < 0
            || cell.col < 0
            || cell.row >= self.height as i32
            || cell.col >= self.width as i32
    }

    pub fn obstacle_set(&self) -> FxHashSet<Cell> {
        self.obstacles.iter().copied().collect()
    }

    /// cells that are neither body nor obstacle
    pub fn free_cells(&self) -> Vec<Cell> {
        let mut taken: FxHashSet<Cell> = self.obstacle_set();
        taken.extend(self.body.iter().copied());
        (0..self.height as i32)
            .flat_map(|row| (0..self.width as i32).map(move |col| Cell::new(row, col)))
            .filter(|c| !taken.contains(c))
            .collect()
    }

    /// validates this tick and builds the snapshot the planner searches
    pub fn as_snapshot(&self, hazard_cost: u32) -> Result<GridSnapshot, InvalidSnapshot> {
        GridSnapshot::from_tick(self, hazard_cost)
    }
}

impl fmt::Display for TickState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let obstacles = self.obstacle_set();
        let hazards: FxHashSet<Cell> = self.hazards.iter().copied().collect();
        let body: FxHashSet<Cell> = self.body.iter().copied().collect();
        writeln!(f)?;
        for row in 0..self.height as i32 {
            for col in 0..self.width as i32 {
                let cell = Cell::new(row, col);
                if self.head() == Some(cell) {
                    write!(f, "H")?;
                } else if body.contains(&cell) {
                    write!(f, "s")?;
                } else if self.target == cell {
                    write!(f, "f")?;
                } else if obstacles.contains(&cell) {
                    write!(f, "#")?;
                } else if hazards.contains(&cell) {
                    write!(f, "x")?;
                } else {
                    write!(f, ".")?;
                }
                write!(f, " ")?;
            }
            writeln!(f)?;
        }
        write!(f, "(length: {} growing: {})", self.body.len(), self.growing)
    }
}
