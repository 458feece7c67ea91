use std::error::Error;
use std::fmt;

use tracing::instrument;

use super::{Cell, CellIndex, Dimensions};
use crate::types::Direction;
use crate::wire_representation::TickState;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
enum CellFlag {
    Empty = 0x00,
    Hazard = 0x01,
    Obstacle = 0x02,
    Body = 0x03,
}

/// Reasons a [TickState] can't be turned in to a [GridSnapshot]. Nothing is ever repaired,
/// the first problem found is returned.
///
/// Boards are capped at 255x255 so a side fits in a `u8` and a [CellIndex] in a `u16`.
/// Anything larger is [InvalidSnapshot::GridTooLarge] even when it is otherwise well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidSnapshot {
    /// width or height is zero
    ZeroSizedGrid,
    /// a side is longer than 255, the most a snapshot can index
    GridTooLarge {
        #[allow(missing_docs)]
        width: u32,
        #[allow(missing_docs)]
        height: u32,
    },
    /// the tick was for a different board than the one the planner was configured for
    DimensionMismatch {
        #[allow(missing_docs)]
        expected: Dimensions,
        #[allow(missing_docs)]
        found: Dimensions,
    },
    /// the snake has no head
    EmptyBody,
    #[allow(missing_docs)]
    BodyOutOfBounds(Cell),
    #[allow(missing_docs)]
    ObstacleOutOfBounds(Cell),
    #[allow(missing_docs)]
    HazardOutOfBounds(Cell),
    #[allow(missing_docs)]
    TargetOutOfBounds(Cell),
    /// the same cell appears twice in the body
    DuplicateBodyCell(Cell),
    #[allow(missing_docs)]
    BodyOnObstacle(Cell),
    #[allow(missing_docs)]
    TargetOnObstacle(Cell),
    #[allow(missing_docs)]
    TargetOnBody(Cell),
}

impl fmt::Display for InvalidSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidSnapshot::ZeroSizedGrid => write!(f, "grid has no cells"),
            InvalidSnapshot::GridTooLarge { width, height } => {
                write!(f, "grid {}x{} is larger than 255x255", width, height)
            }
            InvalidSnapshot::DimensionMismatch { expected, found } => {
                write!(f, "expected a {} grid, got {}", expected, found)
            }
            InvalidSnapshot::EmptyBody => write!(f, "snake body is empty"),
            InvalidSnapshot::BodyOutOfBounds(c) => write!(f, "body cell {} is off the grid", c),
            InvalidSnapshot::ObstacleOutOfBounds(c) => {
                write!(f, "obstacle {} is off the grid", c)
            }
            InvalidSnapshot::HazardOutOfBounds(c) => write!(f, "hazard {} is off the grid", c),
            InvalidSnapshot::TargetOutOfBounds(c) => write!(f, "target {} is off the grid", c),
            InvalidSnapshot::DuplicateBodyCell(c) => {
                write!(f, "body cell {} appears more than once", c)
            }
            InvalidSnapshot::BodyOnObstacle(c) => write!(f, "body cell {} is an obstacle", c),
            InvalidSnapshot::TargetOnObstacle(c) => write!(f, "target {} is an obstacle", c),
            InvalidSnapshot::TargetOnBody(c) => write!(f, "target {} is inside the body", c),
        }
    }
}

impl Error for InvalidSnapshot {}

/// Read only view of one tick: who is where, and what can be walked on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    dimensions: Dimensions,
    cells: Vec<CellFlag>,
    body: Vec<Cell>,
    target: Cell,
    hazard_cost: u32,
    growing: bool,
}

impl GridSnapshot {
    /// Builds a snapshot in O(cells), validating every cell in the tick.
    /// `hazard_cost` is the step cost of entering a hazard; it is clamped to at least 1
    /// so the manhattan heuristic stays admissible.
    #[instrument(level = "trace", skip_all)]
    pub fn from_tick(tick: &TickState, hazard_cost: u32) -> Result<Self, InvalidSnapshot> {
        if tick.width == 0 || tick.height == 0 {
            return Err(InvalidSnapshot::ZeroSizedGrid);
        }
        if tick.width > u8::MAX as u32 || tick.height > u8::MAX as u32 {
            return Err(InvalidSnapshot::GridTooLarge {
                width: tick.width,
                height: tick.height,
            });
        }
        if tick.body.is_empty() {
            return Err(InvalidSnapshot::EmptyBody);
        }

        let dimensions = Dimensions::from_dimensions(tick.width as u8, tick.height as u8);
        let width = dimensions.width();
        let mut cells = vec![CellFlag::Empty; dimensions.cell_count()];

        for &obstacle in tick.obstacles.iter() {
            if !dimensions.contains(obstacle) {
                return Err(InvalidSnapshot::ObstacleOutOfBounds(obstacle));
            }
            cells[CellIndex::new(obstacle, width).as_usize()] = CellFlag::Obstacle;
        }

        for &hazard in tick.hazards.iter() {
            if !dimensions.contains(hazard) {
                return Err(InvalidSnapshot::HazardOutOfBounds(hazard));
            }
            let flag = &mut cells[CellIndex::new(hazard, width).as_usize()];
            // an obstacle is never softened in to a hazard
            if *flag == CellFlag::Empty {
                *flag = CellFlag::Hazard;
            }
        }

        for &segment in tick.body.iter() {
            if !dimensions.contains(segment) {
                return Err(InvalidSnapshot::BodyOutOfBounds(segment));
            }
            let flag = &mut cells[CellIndex::new(segment, width).as_usize()];
            match flag {
                CellFlag::Obstacle => return Err(InvalidSnapshot::BodyOnObstacle(segment)),
                CellFlag::Body => return Err(InvalidSnapshot::DuplicateBodyCell(segment)),
                CellFlag::Empty | CellFlag::Hazard => *flag = CellFlag::Body,
            }
        }

        let target = tick.target;
        if !dimensions.contains(target) {
            return Err(InvalidSnapshot::TargetOutOfBounds(target));
        }
        match cells[CellIndex::new(target, width).as_usize()] {
            CellFlag::Obstacle => return Err(InvalidSnapshot::TargetOnObstacle(target)),
            CellFlag::Body => return Err(InvalidSnapshot::TargetOnBody(target)),
            CellFlag::Empty | CellFlag::Hazard => {}
        }

        Ok(GridSnapshot {
            dimensions,
            cells,
            body: tick.body.clone(),
            target,
            hazard_cost: hazard_cost.max(1),
            growing: tick.growing,
        })
    }

    #[allow(missing_docs)]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// the first body cell
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// the last body cell, which is the head for a snake of length one
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// the body from head to tail
    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    #[allow(missing_docs)]
    pub fn target(&self) -> Cell {
        self.target
    }

    /// whether the snake ate on the last tick and so keeps its tail on the next one
    pub fn is_growing(&self) -> bool {
        self.growing
    }

    #[allow(missing_docs)]
    pub fn hazard_cost(&self) -> u32 {
        self.hazard_cost
    }

    /// index of an on-board cell
    pub fn index_of(&self, cell: Cell) -> CellIndex {
        CellIndex::new(cell, self.dimensions.width())
    }

    /// cell at the given index
    pub fn cell_at(&self, index: CellIndex) -> Cell {
        index.into_cell(self.dimensions.width())
    }

    #[allow(missing_docs)]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.dimensions.contains(cell)
    }

    fn flag(&self, cell: Cell) -> Option<CellFlag> {
        if self.in_bounds(cell) {
            Some(self.cells[self.index_of(cell).as_usize()])
        } else {
            None
        }
    }

    #[allow(missing_docs)]
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.flag(cell) == Some(CellFlag::Obstacle)
    }

    /// whether any body segment, head and tail included, is on this cell
    pub fn is_body(&self, cell: Cell) -> bool {
        self.flag(cell) == Some(CellFlag::Body)
    }

    /// hazards underneath the body don't count
    pub fn is_hazard(&self, cell: Cell) -> bool {
        self.flag(cell) == Some(CellFlag::Hazard)
    }

    /// The tail moves forward in step with the head unless the snake is growing.
    /// On a snake of two cells the tail is also the neck, and stepping on to the
    /// neck is a reversal, so it never counts as vacated.
    pub fn tail_vacates(&self) -> bool {
        self.body.len() > 2 && !self.growing
    }

    /// true iff the cell is on the board, not an obstacle and not part of the body,
    /// except for a tail that [Self::tail_vacates]
    pub fn is_traversable(&self, cell: Cell) -> bool {
        match self.flag(cell) {
            None | Some(CellFlag::Obstacle) => false,
            Some(CellFlag::Empty) | Some(CellFlag::Hazard) => true,
            Some(CellFlag::Body) => cell == self.tail() && self.tail_vacates(),
        }
    }

    /// cost of stepping on to the cell, only the weighted strategies look at this
    pub fn step_cost(&self, cell: Cell) -> u32 {
        if self.is_hazard(cell) {
            self.hazard_cost
        } else {
            1
        }
    }

    /// returns the on-board neighboring cells, always in the order up, right, down, left
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.possible_moves(cell).map(|(_, c)| c)
    }

    /// returns the on-board neighboring cells, and the Direction required to get to each
    pub fn possible_moves(&self, cell: Cell) -> impl Iterator<Item = (Direction, Cell)> + '_ {
        Direction::ALL
            .iter()
            .map(move |&d| (d, cell.step(d)))
            .filter(move |(_, c)| self.in_bounds(*c))
    }
}

impl fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for row in 0..self.dimensions.height() as i32 {
            for col in 0..self.dimensions.width() as i32 {
                let cell = Cell::new(row, col);
                let c = if cell == self.head() {
                    'H'
                } else if cell == self.target {
                    'f'
                } else {
                    match self.cells[self.index_of(cell).as_usize()] {
                        CellFlag::Body => 's',
                        CellFlag::Obstacle => '#',
                        CellFlag::Hazard => 'x',
                        CellFlag::Empty => '.',
                    }
                };
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
