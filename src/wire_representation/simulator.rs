use rand::Rng;
use std::error::Error;
use std::fmt;

use super::TickState;
use crate::grid::Cell;
use crate::types::Direction;

/// Why a move ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// the head left the board
    OffBoard(Cell),
    /// the head hit an obstacle
    Obstacle(Cell),
    /// the head ran in to the body
    Body(Cell),
    /// the move was straight back in to the neck
    Reversal(Direction),
    /// there was no snake to move
    Headless,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collision::OffBoard(c) => write!(f, "left the board at {}", c),
            Collision::Obstacle(c) => write!(f, "hit an obstacle at {}", c),
            Collision::Body(c) => write!(f, "ran in to itself at {}", c),
            Collision::Reversal(d) => write!(f, "reversed by moving {}", d),
            Collision::Headless => write!(f, "the snake has no body"),
        }
    }
}

impl Error for Collision {}

/// The state after a move that didn't collide
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// plain move
    Moved(TickState),
    /// the target was eaten and a new one placed
    Ate(TickState),
    /// the target was eaten and there is nowhere left to put another
    BoardFull(TickState),
}

impl Advance {
    /// the new state, whatever happened
    pub fn into_state(self) -> TickState {
        match self {
            Advance::Moved(s) | Advance::Ate(s) | Advance::BoardFull(s) => s,
        }
    }
}

impl TickState {
    /// Applies one move the way the game loop does. The head steps forward and
    /// the tail follows unless the snake is growing. Eating the target grows the
    /// snake by one on the next move and places a new target with `rng`.
    pub fn advance(&self, direction: Direction, rng: &mut impl Rng) -> Result<Advance, Collision> {
        let head = match self.head() {
            Some(head) => head,
            None => return Err(Collision::Headless),
        };
        let facing = self
            .body
            .get(1)
            .and_then(|&neck| Direction::between(neck, head));
        if facing == Some(direction.reverse()) {
            return Err(Collision::Reversal(direction));
        }
        let new_head = head.step(direction);
        if self.off_board(new_head) {
            return Err(Collision::OffBoard(new_head));
        }
        if self.obstacles.contains(&new_head) {
            return Err(Collision::Obstacle(new_head));
        }

        let mut body = self.body.clone();
        if !self.growing {
            body.pop();
        }
        if body.contains(&new_head) {
            return Err(Collision::Body(new_head));
        }
        body.insert(0, new_head);

        let ate = new_head == self.target;
        let mut next = TickState {
            body,
            growing: ate,
            ..self.clone()
        };
        if !ate {
            return Ok(Advance::Moved(next));
        }
        if next.place_target(rng) {
            Ok(Advance::Ate(next))
        } else {
            Ok(Advance::BoardFull(next))
        }
    }
}
