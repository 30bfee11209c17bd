//! This module checks a parsed scenario before it is walked: the board must be non-empty,
//! the start and every wall must lie on the board, and the movement string may only
//! contain `N`, `E`, `S` and `W`.

use crate::types::{Board, Direction, GridWalkerError, Position, Scenario};

/// Represents the problems that can be found while validating a scenario.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ValidationError {
    /// The board has a non-positive width or height.
    EmptyBoard(Board),
    /// The initial position is not on the board.
    StartOutOfBounds(Position),
    /// The movement string contains a symbol that is not a cardinal direction.
    UnknownMovement { symbol: char, index: usize },
    /// A wall is not on the board.
    WallOutOfBounds(Position),
}

impl From<ValidationError> for GridWalkerError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::EmptyBoard(board) => GridWalkerError::InvalidBoard(board),
            ValidationError::StartOutOfBounds(pos) => GridWalkerError::InvalidStart(pos),
            ValidationError::UnknownMovement { symbol, index } => {
                GridWalkerError::InvalidMovement { symbol, index }
            }
            ValidationError::WallOutOfBounds(pos) => GridWalkerError::InvalidWall(pos),
        }
    }
}

type Check = fn(&Scenario) -> Result<(), ValidationError>;

/// Validates a `Scenario` before simulation.
///
/// Checks run in a fixed order and stop at the first failure: board dimensions, the
/// initial position, the movement symbols, then the walls.
///
/// # Returns
///
/// * `Ok(())` if the scenario can be walked.
/// * `Err(GridWalkerError)` describing the first violated rule.
pub fn validate(scenario: &Scenario) -> Result<(), GridWalkerError> {
    const CHECKS: [Check; 4] = [check_board, check_start, check_movements, check_walls];

    for check in CHECKS {
        check(scenario)?;
    }

    Ok(())
}

/// Checks that both board dimensions are strictly positive.
fn check_board(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.board.is_valid() {
        Ok(())
    } else {
        Err(ValidationError::EmptyBoard(scenario.board))
    }
}

fn check_start(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.board.contains(scenario.start) {
        Ok(())
    } else {
        Err(ValidationError::StartOutOfBounds(scenario.start))
    }
}

/// Checks that every movement symbol maps to a `Direction`.
fn check_movements(scenario: &Scenario) -> Result<(), ValidationError> {
    match scenario
        .movements
        .chars()
        .enumerate()
        .find(|(_, symbol)| Direction::from_symbol(*symbol).is_none())
    {
        Some((index, symbol)) => Err(ValidationError::UnknownMovement { symbol, index }),
        None => Ok(()),
    }
}

fn check_walls(scenario: &Scenario) -> Result<(), ValidationError> {
    // Sorted so the reported wall does not depend on hash order.
    let mut outside: Vec<Position> = scenario
        .walls
        .iter()
        .copied()
        .filter(|wall| !scenario.board.contains(*wall))
        .collect();
    outside.sort();

    match outside.first() {
        Some(wall) => Err(ValidationError::WallOutOfBounds(*wall)),
        None => Ok(()),
    }
}
