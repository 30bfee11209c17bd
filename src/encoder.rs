//! This module provides encoding functionality for writing a `Scenario` back into the
//! scenario text format.

use crate::types::{Position, Scenario};

/// Encodes a scenario into its canonical text form.
///
/// Format, one group per line:
/// - `width height`
/// - `x y` of the initial position
/// - the movement string
/// - `x y` for each wall, sorted by `x` then `y`
///
/// Parsing the result with [`crate::parse`] yields an equal scenario.
///
/// # Returns
///
/// * `Some(String)` with the encoded scenario.
/// * `None` if the movement string is empty or contains whitespace, since the text
///   format has no way to write such a token.
pub fn encode(scenario: &Scenario) -> Option<String> {
    if scenario.movements.is_empty() || scenario.movements.chars().any(char::is_whitespace) {
        return None;
    }

    let mut lines = vec![
        format!("{} {}", scenario.board.width, scenario.board.height),
        encode_position(scenario.start),
        scenario.movements.clone(),
    ];
    lines.extend(sorted_walls(scenario).into_iter().map(encode_position));

    Some(lines.join("\n") + "\n")
}

fn encode_position(position: Position) -> String {
    format!("{} {}", position.x, position.y)
}

/// Walls in a stable order so that equal scenarios encode to identical text.
fn sorted_walls(scenario: &Scenario) -> Vec<Position> {
    let mut walls: Vec<Position> = scenario.walls.iter().copied().collect();
    walls.sort();
    walls
}
