//! This module defines the core data structures and types used throughout the grid walker,
//! including the board, positions, movement directions, parsed scenarios, simulation
//! outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::Rule;

/// The movement symbols accepted in a movement string, in `N`, `E`, `S`, `W` order.
pub const MOVEMENT_SYMBOLS: [char; 4] = ['N', 'E', 'S', 'W'];

/// The result reported for every failed run: `(-1, -1, 0)`.
pub const SENTINEL: Outcome = Outcome {
    x: -1,
    y: -1,
    coins: 0,
};

/// Dimensions of the rectangular board. Cells are indexed `[0, width) × [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub width: i64,
    pub height: i64,
}

impl Board {
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    /// A board is usable only when both dimensions are strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Checks whether `position` lies on the board.
    pub fn contains(&self, position: Position) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A cell coordinate. `(0, 0)` is the bottom left corner of the board.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring position one unit away in `direction`.
    ///
    /// The result is not bounds checked; callers test it against a [`Board`].
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl From<(i64, i64)> for Position {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Represents the four cardinal directions the walker can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Increases `y` by one.
    North,
    /// Increases `x` by one.
    East,
    /// Decreases `y` by one.
    South,
    /// Decreases `x` by one.
    West,
}

impl Direction {
    /// Maps a movement symbol (`N`, `E`, `S` or `W`) to its direction.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }

    /// Returns the movement symbol used for this direction in scenario text.
    pub fn symbol(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    /// The `(dx, dy)` offset of a single move.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }
}

/// A fully parsed walk: the board, where the walker starts, the raw movement string,
/// and the wall cells.
///
/// A scenario is not necessarily valid. Run it through [`crate::validator::validate`]
/// (or construct a [`crate::GridWalker`], which does so) before simulating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub board: Board,
    pub start: Position,
    pub movements: String,
    pub walls: HashSet<Position>,
}

impl Scenario {
    pub fn new(
        board: Board,
        start: Position,
        movements: impl Into<String>,
        walls: impl IntoIterator<Item = Position>,
    ) -> Self {
        Self {
            board,
            start,
            movements: movements.into(),
            walls: walls.into_iter().collect(),
        }
    }

    /// Returns the movement string as directions, skipping any unknown symbols.
    pub fn directions(&self) -> Vec<Direction> {
        self.movements
            .chars()
            .filter_map(Direction::from_symbol)
            .collect()
    }

    pub fn is_wall(&self, position: Position) -> bool {
        self.walls.contains(&position)
    }
}

/// The final position of the walker and the number of coins it collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    pub x: i64,
    pub y: i64,
    pub coins: usize,
}

impl Outcome {
    /// The sentinel outcome reported for any invalid run.
    pub const INVALID: Outcome = SENTINEL;

    pub fn new(position: Position, coins: usize) -> Self {
        Self {
            x: position.x,
            y: position.y,
            coins,
        }
    }

    /// Collapses a tagged result into an outcome, replacing any error with the sentinel.
    pub fn from_result(result: Result<Outcome, GridWalkerError>) -> Self {
        result.unwrap_or(Self::INVALID)
    }

    pub fn is_invalid(&self) -> bool {
        *self == Self::INVALID
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Returns the outcome as an `(x, y, coins)` triple.
    pub fn as_tuple(&self) -> (i64, i64, usize) {
        (self.x, self.y, self.coins)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.coins)
    }
}

/// Represents the outcome of a single walker step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The walker moved onto a free cell. `collected` is true when the cell was new.
    Moved { to: Position, collected: bool },
    /// The target cell is a wall; the move was discarded.
    Blocked { at: Position },
    /// The walker has no more moves to make, or the walk was aborted.
    Halt(Halt),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// Every movement has been processed.
    Ok,

    Err(GridWalkerError),
}

/// Represents the errors that can occur while loading, validating, or walking a scenario.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridWalkerError {
    /// Indicates a syntax error in the scenario text, or a number that cannot be represented.
    #[error("Scenario parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates that the board has a non-positive width or height.
    #[error("Invalid board dimensions: {0}")]
    InvalidBoard(Board),
    /// Indicates that the initial position is not on the board.
    #[error("Initial position {0} is outside the board")]
    InvalidStart(Position),
    /// Indicates a movement symbol other than `N`, `E`, `S` or `W`.
    #[error("Invalid movement {symbol:?} at index {index}")]
    InvalidMovement { symbol: char, index: usize },
    /// Indicates a wall that is not on the board.
    #[error("Wall {0} is outside the board")]
    InvalidWall(Position),
    /// Indicates that a move would have left the board, which aborts the walk.
    #[error("Move {step} ({direction:?}) leaves the board at {position}")]
    OutOfBounds {
        step: usize,
        direction: Direction,
        position: Position,
    },
    /// Indicates an error related to reading scenario files.
    #[error("File error: {0}")]
    FileError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let north = Direction::North;
        let west = Direction::West;

        let north_json = serde_json::to_string(&north).unwrap();
        let west_json = serde_json::to_string(&west).unwrap();

        assert_eq!(north_json, "\"North\"");
        assert_eq!(west_json, "\"West\"");

        let north_deserialized: Direction = serde_json::from_str(&north_json).unwrap();
        assert_eq!(north, north_deserialized);
    }

    #[test]
    fn test_direction_symbols() {
        for symbol in MOVEMENT_SYMBOLS {
            let direction = Direction::from_symbol(symbol).unwrap();
            assert_eq!(direction.symbol(), symbol);
        }

        assert_eq!(Direction::from_symbol('n'), None);
        assert_eq!(Direction::from_symbol('X'), None);
    }

    #[test]
    fn test_position_step() {
        let origin = Position::new(2, 2);

        assert_eq!(origin.step(Direction::North), Position::new(2, 3));
        assert_eq!(origin.step(Direction::East), Position::new(3, 2));
        assert_eq!(origin.step(Direction::South), Position::new(2, 1));
        assert_eq!(origin.step(Direction::West), Position::new(1, 2));
    }

    #[test]
    fn test_board_contains() {
        let board = Board::new(3, 2);

        assert!(board.contains(Position::new(0, 0)));
        assert!(board.contains(Position::new(2, 1)));
        assert!(!board.contains(Position::new(3, 1)));
        assert!(!board.contains(Position::new(2, 2)));
        assert!(!board.contains(Position::new(-1, 0)));
        assert!(!Board::new(0, 5).is_valid());
    }

    #[test]
    fn test_scenario_collapses_duplicate_walls() {
        let scenario = Scenario::new(
            Board::new(3, 3),
            Position::new(0, 0),
            "NE",
            [Position::new(1, 1), Position::new(1, 1), Position::new(2, 0)],
        );

        assert_eq!(scenario.walls.len(), 2);
        assert!(scenario.is_wall(Position::new(1, 1)));
        assert_eq!(
            scenario.directions(),
            vec![Direction::North, Direction::East]
        );
    }

    #[test]
    fn test_outcome_sentinel() {
        let failed = Outcome::from_result(Err(GridWalkerError::InvalidBoard(Board::new(0, 5))));

        assert!(failed.is_invalid());
        assert_eq!(failed.as_tuple(), (-1, -1, 0));
        assert_eq!(failed.to_string(), "-1 -1 0");
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = Outcome::new(Position::new(4, 4), 8);
        let json = serde_json::to_string(&outcome).unwrap();

        assert_eq!(json, r#"{"x":4,"y":4,"coins":8}"#);
    }

    #[test]
    fn test_error_display() {
        let error = GridWalkerError::InvalidMovement {
            symbol: 'X',
            index: 3,
        };

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid movement"));
        assert!(error_msg.contains("'X'"));
        assert!(error_msg.contains("3"));
    }
}
