//! This module defines the `GridWalker` struct, which simulates a single walker moving
//! across the board. It tracks the walker's position, the cells it has visited, and the
//! coins collected along the way.

use crate::types::{Board, Direction, GridWalkerError, Halt, Outcome, Position, Scenario, Step};
use crate::validator::validate;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Simulates one walk over a validated scenario.
///
/// The walker starts on the scenario's initial cell, which counts as visited but is not
/// a coin. Each step consumes one movement:
///
/// - a move off the board aborts the walk with [`GridWalkerError::OutOfBounds`],
/// - a move into a wall is discarded and the walker stays put,
/// - any other move is taken, and a coin is collected the first time a cell is entered.
pub struct GridWalker {
    scenario: Scenario,
    directions: Vec<Direction>,
    position: Position,
    visited: HashSet<Position>,
    coins: usize,
    step_count: usize,
    halted: Option<Halt>,
}

impl GridWalker {
    /// Creates a new `GridWalker` for the given `Scenario`.
    ///
    /// The scenario is validated first, so a walker can only exist for a scenario whose
    /// board, start, movements and walls are all well formed.
    ///
    /// # Returns
    ///
    /// * `Ok(GridWalker)` positioned on the scenario's start cell.
    /// * `Err(GridWalkerError)` with the first validation failure.
    pub fn new(scenario: Scenario) -> Result<Self, GridWalkerError> {
        validate(&scenario)?;

        let directions = scenario.directions();
        let position = scenario.start;

        Ok(Self {
            scenario,
            directions,
            position,
            visited: HashSet::from([position]),
            coins: 0,
            step_count: 0,
            halted: None,
        })
    }

    /// Executes a single movement.
    ///
    /// # Returns
    ///
    /// * `Step::Moved` if the walker entered a free cell.
    /// * `Step::Blocked` if the target cell is a wall.
    /// * `Step::Halt(Halt::Ok)` once every movement has been processed.
    /// * `Step::Halt(Halt::Err(_))` if the move would leave the board. The walker stays
    ///   halted with that error from then on.
    pub fn step(&mut self) -> Step {
        if let Some(halt) = &self.halted {
            return Step::Halt(halt.clone());
        }

        let Some(&direction) = self.directions.get(self.step_count) else {
            self.halted = Some(Halt::Ok);
            return Step::Halt(Halt::Ok);
        };

        let target = self.position.step(direction);

        if !self.scenario.board.contains(target) {
            let error = GridWalkerError::OutOfBounds {
                step: self.step_count,
                direction,
                position: target,
            };
            warn!(%error, "walk aborted");

            self.halted = Some(Halt::Err(error.clone()));
            return Step::Halt(Halt::Err(error));
        }

        self.step_count += 1;

        if self.scenario.is_wall(target) {
            debug!(step = self.step_count, at = %target, "blocked by wall");
            return Step::Blocked { at: target };
        }

        self.position = target;
        let collected = self.visited.insert(target);
        if collected {
            self.coins += 1;
        }
        debug!(step = self.step_count, to = %target, collected, "moved");

        Step::Moved {
            to: target,
            collected,
        }
    }

    /// Runs the walker until every movement is processed or the walk is aborted.
    pub fn run(&mut self) -> Result<Outcome, GridWalkerError> {
        loop {
            match self.step() {
                Step::Moved { .. } | Step::Blocked { .. } => continue,
                Step::Halt(Halt::Ok) => return Ok(self.outcome()),
                Step::Halt(Halt::Err(e)) => return Err(e),
            }
        }
    }

    /// Resets the walker to the start cell with no coins and an empty history.
    pub fn reset(&mut self) {
        self.position = self.scenario.start;
        self.visited = HashSet::from([self.position]);
        self.coins = 0;
        self.step_count = 0;
        self.halted = None;
    }

    /// Returns the current position and coin count.
    pub fn outcome(&self) -> Outcome {
        Outcome::new(self.position, self.coins)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn coins(&self) -> usize {
        self.coins
    }

    /// Returns every cell the walker has stood on, the start cell included.
    pub fn visited(&self) -> &HashSet<Position> {
        &self.visited
    }

    /// Returns the number of movements processed so far, blocked ones included.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the movements that have not been processed yet.
    pub fn remaining(&self) -> &[Direction] {
        self.directions.get(self.step_count..).unwrap_or_default()
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    pub fn board(&self) -> Board {
        self.scenario.board
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }
}

/// Validates and walks a scenario described by already-typed arguments.
///
/// This is a pure function: identical arguments always give identical results.
///
/// # Returns
///
/// * `Ok(Outcome)` with the final position and coins collected.
/// * `Err(GridWalkerError)` if validation fails or a move leaves the board.
pub fn try_simulate(
    board: Board,
    start: Position,
    movements: &str,
    walls: &HashSet<Position>,
) -> Result<Outcome, GridWalkerError> {
    try_simulate_scenario(Scenario {
        board,
        start,
        movements: movements.to_string(),
        walls: walls.clone(),
    })
}

/// Like [`try_simulate`], but reports every failure as the `(-1, -1, 0)` sentinel.
pub fn simulate(
    board: Board,
    start: Position,
    movements: &str,
    walls: &HashSet<Position>,
) -> Outcome {
    Outcome::from_result(try_simulate(board, start, movements, walls))
}

/// Validates and walks a parsed `Scenario`.
pub fn try_simulate_scenario(scenario: Scenario) -> Result<Outcome, GridWalkerError> {
    GridWalker::new(scenario)?.run()
}
