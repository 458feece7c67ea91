//! Board dimensions
//!
//! Both sides are stored as a `u8`, so the largest board is 255x255 and every
//! cell fits in a `u16` [super::CellIndex].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Cell;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// The width and height of a grid
pub struct Dimensions {
    width: u8,
    height: u8,
}

impl Dimensions {
    /// Convert from a width and a height to this dimension
    pub fn from_dimensions(width: u8, height: u8) -> Self {
        Self { width, height }
    }

    /// Get the width of this dimension
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Get the height of this dimension
    pub fn height(&self) -> u8 {
        self.height
    }

    /// total number of cells on the board, also the expansion bound of every search
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// whether the cell lies on the board
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && cell.row < self.height as i32
            && cell.col < self.width as i32
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let d = Dimensions::from_dimensions(3, 2);
        assert!(d.contains(Cell::new(0, 0)));
        assert!(d.contains(Cell::new(1, 2)));
        assert!(!d.contains(Cell::new(2, 0)));
        assert!(!d.contains(Cell::new(0, 3)));
        assert!(!d.contains(Cell::new(-1, 0)));
        assert_eq!(d.cell_count(), 6);
        assert_eq!(d.to_string(), "3x2");
    }
}
