#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Move planning for a grid snake.
//!
//! Every tick the game loop hands over a [TickState](wire_representation::TickState).
//! The [Planner](planner::Planner) turns it in to an immutable
//! [GridSnapshot](grid::GridSnapshot), runs the configured search strategy from
//! the head to the target, and picks the direction to move. When no path exists
//! the snake heads for the neighbor with the most open space instead, and only
//! a head with no traversable neighbor at all is reported as an error.
//!
//! ```
//! use snake_planner::planner::{Planner, PlannerConfig};
//! use snake_planner::search::StrategyKind;
//! use snake_planner::types::Direction;
//!
//! let tick = snake_planner::tick_fixture(
//!     r#"{"width": 5, "height": 5,
//!         "body": [{"row": 2, "col": 1}, {"row": 2, "col": 0}],
//!         "target": {"row": 2, "col": 4}}"#,
//! );
//! let config = PlannerConfig {
//!     strategy: StrategyKind::AStar,
//!     grid_width: 5,
//!     grid_height: 5,
//!     ..PlannerConfig::default()
//! };
//! let mut planner = Planner::new(config);
//! let mut moves = vec![];
//! planner.tick(&tick, &mut |d: Direction| moves.push(d)).unwrap();
//! assert_eq!(moves, vec![Direction::Right]);
//! ```

use wire_representation::TickState;

pub mod grid;
pub mod planner;
pub mod search;
pub mod selector;
pub mod types;
pub mod wire_representation;

/// Loads a tick from a given json string
pub fn tick_fixture(tick_fixture: &str) -> TickState {
    let t: Result<TickState, _> = serde_json::from_str(tick_fixture);
    t.expect("the json literal is valid")
}
