//! The once-per-tick planning loop
//!
//! A [Planner] is configured once per session, only its strategy may be
//! switched between ticks. Each call to [Planner::tick]
//! takes a fresh [TickState], walks the phases
//! `Idle -> Snapshotting -> Searching -> Selecting -> Done`, hands the chosen
//! [Direction] to a [MoveExecutor] and drops back to `Idle`. Nothing from one
//! tick is kept for the next.
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use tracing::{debug, instrument, trace};

use crate::grid::{Dimensions, GridSnapshot, InvalidSnapshot};
use crate::search::{SearchResult, SearchStrategy, StrategyKind};
use crate::selector::{select_move, NoSafeMove};
use crate::types::{Direction, NoopInstruments, PlannerInstruments};
use crate::wire_representation::TickState;

/// Session configuration, usually read from json:
/// ```
/// # use snake_planner::planner::PlannerConfig;
/// # use snake_planner::search::StrategyKind;
/// let c = PlannerConfig::from_json(r#"{"strategy": "astar", "grid_width": 24}"#).unwrap();
/// assert_eq!(c.strategy, StrategyKind::AStar);
/// assert_eq!(c.grid_height, 20);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PlannerConfig {
    /// which search runs every tick
    pub strategy: StrategyKind,
    #[allow(missing_docs)]
    pub grid_width: u8,
    #[allow(missing_docs)]
    pub grid_height: u8,
    /// cap on expanded cells per search, the board size when unset
    pub max_expansions: Option<usize>,
    /// step cost of a hazard for the weighted strategies
    pub hazard_cost: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            strategy: StrategyKind::Bfs,
            grid_width: 20,
            grid_height: 20,
            max_expansions: None,
            hazard_cost: 10,
        }
    }
}

impl PlannerConfig {
    /// parses a config, filling in defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: PlannerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// rejects configs no tick could ever satisfy
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(format!(
                "grid must have cells, got {}x{}",
                self.grid_width, self.grid_height
            )
            .into());
        }
        if self.max_expansions == Some(0) {
            return Err("max_expansions must be at least 1".into());
        }
        Ok(())
    }

    #[allow(missing_docs)]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::from_dimensions(self.grid_width, self.grid_height)
    }
}

/// Where the planner is within a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerPhase {
    #[allow(missing_docs)]
    Idle,
    #[allow(missing_docs)]
    Snapshotting,
    #[allow(missing_docs)]
    Searching,
    #[allow(missing_docs)]
    Selecting,
    #[allow(missing_docs)]
    Done,
}

impl PlannerPhase {
    /// the only phase that may follow this one
    pub fn next(self) -> PlannerPhase {
        match self {
            PlannerPhase::Idle => PlannerPhase::Snapshotting,
            PlannerPhase::Snapshotting => PlannerPhase::Searching,
            PlannerPhase::Searching => PlannerPhase::Selecting,
            PlannerPhase::Selecting => PlannerPhase::Done,
            PlannerPhase::Done => PlannerPhase::Idle,
        }
    }
}

/// The side of the game loop that applies moves to the real game state
pub trait MoveExecutor {
    /// apply the planned move for this tick
    fn execute(&mut self, direction: Direction);
}

impl<F: FnMut(Direction)> MoveExecutor for F {
    fn execute(&mut self, direction: Direction) {
        self(direction)
    }
}

/// What can stop a tick from producing a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    /// the tick state was malformed
    InvalidSnapshot(InvalidSnapshot),
    /// the snake is boxed in, the game is lost
    NoSafeMove(NoSafeMove),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::InvalidSnapshot(e) => write!(f, "invalid snapshot: {}", e),
            PlanError::NoSafeMove(e) => write!(f, "{}", e),
        }
    }
}

impl Error for PlanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlanError::InvalidSnapshot(e) => Some(e),
            PlanError::NoSafeMove(e) => Some(e),
        }
    }
}

impl From<InvalidSnapshot> for PlanError {
    fn from(e: InvalidSnapshot) -> Self {
        PlanError::InvalidSnapshot(e)
    }
}

impl From<NoSafeMove> for PlanError {
    fn from(e: NoSafeMove) -> Self {
        PlanError::NoSafeMove(e)
    }
}

/// Plans one move per tick with the configured strategy
#[derive(Debug)]
pub struct Planner<I: PlannerInstruments = NoopInstruments> {
    config: PlannerConfig,
    phase: PlannerPhase,
    instruments: I,
}

impl Planner<NoopInstruments> {
    #[allow(missing_docs)]
    pub fn new(config: PlannerConfig) -> Self {
        Self::with_instruments(config, NoopInstruments)
    }
}

impl<I: PlannerInstruments> Planner<I> {
    /// a planner that reports every search to `instruments`
    pub fn with_instruments(config: PlannerConfig, instruments: I) -> Self {
        Planner {
            config,
            phase: PlannerPhase::Idle,
            instruments,
        }
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    #[allow(missing_docs)]
    pub fn strategy(&self) -> StrategyKind {
        self.config.strategy
    }

    /// Switches strategy from the next tick on. Called between ticks, a plan
    /// already in `Done` is unaffected.
    pub fn set_strategy(&mut self, strategy: StrategyKind) {
        debug!(from = %self.config.strategy, to = %strategy, "strategy changed");
        self.config.strategy = strategy;
    }

    /// current phase, `Idle` between ticks
    pub fn phase(&self) -> PlannerPhase {
        self.phase
    }

    #[allow(missing_docs)]
    pub fn instruments(&self) -> &I {
        &self.instruments
    }

    fn advance_to(&mut self, phase: PlannerPhase) {
        debug_assert_eq!(self.phase.next(), phase, "planner phases run strictly in order");
        trace!(from = ?self.phase, to = ?phase, "planner phase");
        self.phase = phase;
    }

    /// Plans this tick's move and hands it to `executor`. On error nothing is
    /// executed and the planner is back to `Idle`, ready for the next tick.
    #[instrument(level = "trace", skip_all, fields(strategy = %self.config.strategy))]
    pub fn tick<E: MoveExecutor>(
        &mut self,
        tick: &TickState,
        executor: &mut E,
    ) -> Result<Direction, PlanError> {
        let planned = self.plan(tick);
        if let Ok(direction) = planned {
            executor.execute(direction);
            self.advance_to(PlannerPhase::Idle);
        } else {
            self.phase = PlannerPhase::Idle;
        }
        planned
    }

    /// Plans this tick's move without handing it anywhere. Leaves the planner in
    /// `Done` on success, the caller of [Self::tick] resets it.
    pub fn plan(&mut self, tick: &TickState) -> Result<Direction, PlanError> {
        if self.phase != PlannerPhase::Idle {
            // a previous plan was never handed over
            self.phase = PlannerPhase::Idle;
        }

        self.advance_to(PlannerPhase::Snapshotting);
        let snapshot = match self.snapshot(tick) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.phase = PlannerPhase::Idle;
                debug!(error = %e, "rejected tick");
                return Err(e.into());
            }
        };

        self.advance_to(PlannerPhase::Searching);
        let result = self.search(&snapshot);

        self.advance_to(PlannerPhase::Selecting);
        let selected = select_move(&result, &snapshot);
        match selected {
            Ok(direction) => {
                self.advance_to(PlannerPhase::Done);
                Ok(direction)
            }
            Err(e) => {
                self.phase = PlannerPhase::Idle;
                Err(e.into())
            }
        }
    }

    fn snapshot(&self, tick: &TickState) -> Result<GridSnapshot, InvalidSnapshot> {
        let snapshot = GridSnapshot::from_tick(tick, self.config.hazard_cost)?;
        let expected = self.config.dimensions();
        if snapshot.dimensions() != expected {
            return Err(InvalidSnapshot::DimensionMismatch {
                expected,
                found: snapshot.dimensions(),
            });
        }
        Ok(snapshot)
    }

    fn search(&self, snapshot: &GridSnapshot) -> SearchResult {
        let strategy = self.config.strategy;
        let max_expansions = self
            .config
            .max_expansions
            .unwrap_or_else(|| snapshot.cell_count());
        let (result, stats) =
            strategy.search_bounded(snapshot, snapshot.head(), snapshot.target(), max_expansions);
        self.instruments.observe_search(strategy, stats);
        debug!(
            %strategy,
            expanded = stats.expanded,
            path_len = result.path().map(|p| p.len()).unwrap_or(0),
            "searched"
        );
        result
    }
}
