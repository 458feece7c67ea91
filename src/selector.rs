//! Turns a search result in to the move for this tick
//!
//! When there is a path the first step of it is taken. When there isn't, the
//! snake stops chasing the target and moves toward whichever neighbor opens on
//! to the most room, so it survives until a path shows up again.
use std::collections::VecDeque;
use std::error::Error;
use std::fmt;

use itertools::Itertools;
use tracing::{debug, instrument, trace};

use crate::grid::{Cell, GridSnapshot};
use crate::search::SearchResult;
use crate::types::Direction;

/// Every neighbor of the head is blocked. This is the snake losing, not a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoSafeMove {
    /// where the head was stuck
    pub head: Cell,
}

impl fmt::Display for NoSafeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no safe move from {}", self.head)
    }
}

impl Error for NoSafeMove {}

/// Picks the direction for this tick.
///
/// A found path yields the step from the head to `path[1]`, as long as that
/// step doesn't [trap](leads_into_trap) the snake. Anything else falls back to
/// [best_open_neighbor].
pub fn select_move(result: &SearchResult, snapshot: &GridSnapshot) -> Result<Direction, NoSafeMove> {
    let head = snapshot.head();
    if let SearchResult::Found(path) = result {
        match path.get(1).and_then(|next| Direction::between(head, *next)) {
            Some(direction) if path[0] == head => {
                if !leads_into_trap(snapshot, path[1]) {
                    return Ok(direction);
                }
                debug!(%direction, path_len = path.len(), "path leads in to a trap");
            }
            _ => debug!(path_len = path.len(), "path does not start with a step from the head"),
        }
    }
    best_open_neighbor(snapshot)
}

/// True when the region reachable from `next` has fewer cells than the snake
/// is long, so following the path there would box the snake in.
pub fn leads_into_trap(snapshot: &GridSnapshot, next: Cell) -> bool {
    let needed = snapshot.body().len();
    flood_fill(snapshot, next, needed) < needed
}

/// Scores every traversable neighbor of the head by the size of the region
/// reachable from it once the head has moved there, and returns the direction of
/// the largest. Ties go to the earlier direction in neighbor order.
#[instrument(level = "trace", skip_all)]
pub fn best_open_neighbor(snapshot: &GridSnapshot) -> Result<Direction, NoSafeMove> {
    let head = snapshot.head();
    let scored = snapshot
        .possible_moves(head)
        .filter(|(_, cell)| snapshot.is_traversable(*cell))
        .map(|(direction, cell)| {
            let region = flood_fill(snapshot, cell, snapshot.cell_count());
            trace!(%direction, region, "scored fallback move");
            (direction, region)
        })
        .collect_vec();

    // max_by_key keeps the last maximum, so walk the moves backwards
    let best = scored
        .iter()
        .rev()
        .max_by_key(|(_, region)| *region)
        .map(|(direction, _)| *direction);

    match best {
        Some(direction) => {
            debug!(%direction, candidates = scored.len(), "falling back to open space");
            Ok(direction)
        }
        None => {
            debug!(%head, "no traversable neighbor");
            Err(NoSafeMove { head })
        }
    }
}

/// Counts the traversable cells connected to `from`, `from` included, stopping at
/// `limit`. The head is never counted since it is body. Returns 0 when `from`
/// itself can't be entered.
#[instrument(level = "trace", skip_all)]
pub fn flood_fill(snapshot: &GridSnapshot, from: Cell, limit: usize) -> usize {
    if !snapshot.is_traversable(from) || limit == 0 {
        return 0;
    }
    let mut seen = vec![false; snapshot.cell_count()];
    let mut queue = VecDeque::new();
    seen[snapshot.index_of(from).as_usize()] = true;
    queue.push_back(from);
    let mut count = 0;

    while let Some(cell) = queue.pop_front() {
        count += 1;
        if count >= limit {
            break;
        }
        for next in snapshot.neighbors(cell) {
            let idx = snapshot.index_of(next).as_usize();
            if !seen[idx] && snapshot.is_traversable(next) {
                seen[idx] = true;
                queue.push_back(next);
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchStrategy, StrategyKind};
    use crate::tick_fixture;
    use crate::wire_representation::TickState;

    fn snapshot(t: &TickState) -> GridSnapshot {
        GridSnapshot::from_tick(t, 10).unwrap()
    }

    #[test]
    fn test_follows_found_path() {
        let t = tick_fixture(include_str!("../fixtures/walled_corridor.json"));
        let s = snapshot(&t);
        let r = StrategyKind::AStar.search(&s, s.head(), s.target());
        assert_eq!(select_move(&r, &s), Ok(Direction::Right));
    }

    #[test]
    fn test_avoids_path_in_to_pocket() {
        let t = tick_fixture(include_str!("../fixtures/target_pocket.json"));
        let s = snapshot(&t);
        for kind in StrategyKind::ALL {
            let r = kind.search(&s, s.head(), s.target());
            assert_eq!(r.path().map(|p| p[1]), Some(Cell::new(0, 3)), "{}", kind);
            // the pocket holds two cells, the snake is four long
            assert!(leads_into_trap(&s, Cell::new(0, 3)));
            assert_eq!(select_move(&r, &s), Ok(Direction::Left), "{}", kind);
        }
        assert_eq!(flood_fill(&s, Cell::new(0, 3), 36), 2);
        assert_eq!(flood_fill(&s, Cell::new(0, 1), 36), 18);
    }

    #[test]
    fn test_path_with_room_is_followed() {
        let t = tick_fixture(include_str!("../fixtures/target_pocket.json"));
        let mut short = t.clone();
        short.body.truncate(2);
        let s = snapshot(&short);
        let r = StrategyKind::Bfs.search(&s, s.head(), s.target());
        // a two cell snake fits in the pocket
        assert!(!leads_into_trap(&s, Cell::new(0, 3)));
        assert_eq!(select_move(&r, &s), Ok(Direction::Right));
    }

    #[test]
    fn test_falls_back_to_largest_region() {
        let t = tick_fixture(include_str!("../fixtures/dead_end_pocket.json"));
        let s = snapshot(&t);
        for kind in StrategyKind::ALL {
            let r = kind.search(&s, s.head(), s.target());
            assert_eq!(r, SearchResult::NotFound);
            // right leads in to a one cell pocket, left to the rest of the board
            assert_eq!(select_move(&r, &s), Ok(Direction::Left));
        }
        assert_eq!(flood_fill(&s, Cell::new(0, 5), 36), 1);
        assert_eq!(flood_fill(&s, Cell::new(0, 3), 36), 29);
    }

    #[test]
    fn test_boxed_in_is_no_safe_move() {
        let t = tick_fixture(include_str!("../fixtures/boxed_in.json"));
        let s = snapshot(&t);
        let r = StrategyKind::Bfs.search(&s, s.head(), s.target());
        assert_eq!(r, SearchResult::NotFound);
        assert_eq!(
            select_move(&r, &s),
            Err(NoSafeMove {
                head: Cell::new(1, 1)
            })
        );
    }

    #[test]
    fn test_fallback_never_enters_body_or_obstacles() {
        // head surrounded by an obstacle above, body to the right and below
        let t = TickState {
            width: 4,
            height: 4,
            body: vec![
                Cell::new(1, 1),
                Cell::new(1, 2),
                Cell::new(2, 2),
                Cell::new(2, 1),
                Cell::new(3, 1),
            ],
            obstacles: vec![Cell::new(0, 1)],
            target: Cell::new(3, 3),
            hazards: vec![],
            growing: false,
        };
        let s = snapshot(&t);
        assert_eq!(best_open_neighbor(&s), Ok(Direction::Left));
    }

    #[test]
    fn test_fallback_ties_use_neighbor_order() {
        let t = TickState {
            width: 3,
            height: 3,
            body: vec![Cell::new(1, 1)],
            obstacles: vec![],
            target: Cell::new(0, 0),
            hazards: vec![],
            growing: false,
        };
        let s = snapshot(&t);
        // every neighbor reaches the same 8 cells
        assert_eq!(best_open_neighbor(&s), Ok(Direction::Up));
    }

    #[test]
    fn test_vacating_tail_counts_as_room() {
        // the only way out is the tail, which moves away this tick
        let t = TickState {
            width: 3,
            height: 2,
            body: vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 1),
                Cell::new(1, 0),
            ],
            obstacles: vec![Cell::new(0, 2)],
            target: Cell::new(1, 2),
            hazards: vec![],
            growing: false,
        };
        let s = snapshot(&t);
        let r = StrategyKind::Bfs.search(&s, s.head(), s.target());
        assert_eq!(r, SearchResult::NotFound);
        assert_eq!(select_move(&r, &s), Ok(Direction::Down));
        assert_eq!(flood_fill(&s, Cell::new(1, 0), 6), 1);

        let mut growing = t.clone();
        growing.growing = true;
        let s = snapshot(&growing);
        assert!(best_open_neighbor(&s).is_err());
    }

    #[test]
    fn test_flood_fill_limit() {
        let t = TickState {
            width: 10,
            height: 10,
            body: vec![Cell::new(0, 0)],
            obstacles: vec![],
            target: Cell::new(9, 9),
            hazards: vec![],
            growing: false,
        };
        let s = snapshot(&t);
        assert_eq!(flood_fill(&s, Cell::new(5, 5), 100), 99);
        assert_eq!(flood_fill(&s, Cell::new(5, 5), 10), 10);
        assert_eq!(flood_fill(&s, Cell::new(0, 0), 100), 0);
        assert_eq!(flood_fill(&s, Cell::new(5, 5), 0), 0);
    }

    #[test]
    fn test_malformed_path_falls_back() {
        let t = TickState {
            width: 3,
            height: 3,
            body: vec![Cell::new(1, 1)],
            obstacles: vec![],
            target: Cell::new(0, 0),
            hazards: vec![],
            growing: false,
        };
        let s = snapshot(&t);
        let r = SearchResult::Found(vec![Cell::new(1, 1)]);
        assert_eq!(select_move(&r, &s), Ok(Direction::Up));
    }
}
