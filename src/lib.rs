//! This crate provides the core logic for a grid walk simulator.
//! It includes modules for parsing walk scenarios, validating them, simulating a single
//! walker moving across the board, and writing scenarios back to text.

pub mod encoder;
pub mod loader;
pub mod parser;
pub mod types;
pub mod validator;
pub mod walker;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `encode` function from the encoder module.
pub use encoder::encode;
/// Re-exports the `ScenarioLoader` struct and the file based entry points.
pub use loader::{simulate_from_file, try_simulate_from_file, ScenarioLoader};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the scenario, outcome and error types from the types module.
pub use types::{
    Board, Direction, GridWalkerError, Halt, Outcome, Position, Scenario, Step,
    MOVEMENT_SYMBOLS, SENTINEL,
};
/// Re-exports the `validate` function and `ValidationError` enum from the validator module.
pub use validator::{validate, ValidationError};
/// Re-exports the `GridWalker` struct and the in-memory entry points.
pub use walker::{simulate, try_simulate, try_simulate_scenario, GridWalker};
