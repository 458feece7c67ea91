//! The occupancy grid a snake plans against
//!
//! A [GridSnapshot] is built once per tick from a
//! [crate::wire_representation::TickState] and only ever read afterwards.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Direction, Vector};

pub mod dimensions;
mod snapshot;

pub use dimensions::Dimensions;
pub use snapshot::{GridSnapshot, InvalidSnapshot};

/// A coordinate on the grid. Row 0 is the top row, so [Direction::Up] decreases the row.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    #[allow(missing_docs)]
    pub row: i32,
    #[allow(missing_docs)]
    pub col: i32,
}

impl Cell {
    #[allow(missing_docs)]
    pub const fn new(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    /// the cell reached by adding the given vector
    pub fn add_vec(&self, v: Vector) -> Cell {
        Cell {
            row: (self.row as i64 + v.row) as i32,
            col: (self.col as i64 + v.col) as i32,
        }
    }

    /// the vector that takes `other` to `self`
    pub fn offset_from(&self, other: Cell) -> Vector {
        Vector {
            row: self.row as i64 - other.row as i64,
            col: self.col as i64 - other.col as i64,
        }
    }

    /// the neighboring cell in the given direction, may be off the board
    pub fn step(&self, direction: Direction) -> Cell {
        self.add_vec(direction.to_vector())
    }

    /// manhattan distance between two cells
    pub fn manhattan(&self, other: Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// whether the two cells share an edge
    pub fn is_adjacent(&self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// wrapper type for an index in to the board
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct CellIndex(pub u16);

impl CellIndex {
    /// makes a new cell index from an on-board cell, needs to know the width of the board
    pub fn new(cell: Cell, width: u8) -> Self {
        Self((cell.row * width as i32 + cell.col) as u16)
    }

    /// get a usize from a CellIndex
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// converts a cellindex to a cell
    pub fn into_cell(self, width: u8) -> Cell {
        let row = self.0 as i32 / width as i32;
        let col = self.0 as i32 % width as i32;
        Cell { row, col }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_index_roundtrip() {
        let width = 7;
        for row in 0..5 {
            for col in 0..width as i32 {
                let c = Cell::new(row, col);
                let idx = CellIndex::new(c, width);
                assert_eq!(idx.as_usize(), (row * width as i32 + col) as usize);
                assert_eq!(idx.into_cell(width), c);
            }
        }
    }

    #[test]
    fn test_step_and_offset() {
        let c = Cell::new(3, 3);
        assert_eq!(c.step(Direction::Up), Cell::new(2, 3));
        assert_eq!(c.step(Direction::Right), Cell::new(3, 4));
        assert_eq!(c.step(Direction::Down), Cell::new(4, 3));
        assert_eq!(c.step(Direction::Left), Cell::new(3, 2));
        assert_eq!(Direction::between(c, c.step(Direction::Left)), Some(Direction::Left));
        assert_eq!(Direction::between(c, Cell::new(5, 3)), None);
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Cell::new(0, 0).manhattan(Cell::new(4, 4)), 8);
        assert_eq!(Cell::new(4, 1).manhattan(Cell::new(1, 4)), 6);
        assert!(Cell::new(1, 1).is_adjacent(Cell::new(1, 2)));
        assert!(!Cell::new(1, 1).is_adjacent(Cell::new(2, 2)));
        assert!(!Cell::new(1, 1).is_adjacent(Cell::new(1, 1)));
    }
}
