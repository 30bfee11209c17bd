//! This module provides the `ScenarioLoader` struct, responsible for loading scenarios
//! from files and strings, and the file based simulation entry points.

use crate::parser::parse;
use crate::types::{GridWalkerError, Outcome, Scenario};
use crate::walker::try_simulate_scenario;
use std::fs;
use std::path::Path;
use tracing::debug;

/// `ScenarioLoader` is a utility struct for loading grid walk scenarios.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Loads a scenario from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the scenario file.
    ///
    /// # Returns
    ///
    /// * `Ok(Scenario)` if the file is read and parsed successfully.
    /// * `Err(GridWalkerError::FileError)` if the file cannot be read.
    /// * `Err(GridWalkerError::ParseError)` if the content is not a valid scenario.
    pub fn load_scenario(path: &Path) -> Result<Scenario, GridWalkerError> {
        let content = fs::read_to_string(path).map_err(|e| {
            GridWalkerError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), bytes = content.len(), "loaded scenario file");

        parse(&content)
    }

    /// Loads a scenario from the provided string content, e.g. piped standard input.
    pub fn load_scenario_from_string(content: &str) -> Result<Scenario, GridWalkerError> {
        parse(content)
    }
}

/// Reads, parses, validates and walks the scenario stored at `path`.
///
/// # Returns
///
/// * `Ok(Outcome)` with the final position and coins collected.
/// * `Err(GridWalkerError)` for I/O, parse, validation or out-of-bounds failures.
pub fn try_simulate_from_file(path: impl AsRef<Path>) -> Result<Outcome, GridWalkerError> {
    let scenario = ScenarioLoader::load_scenario(path.as_ref())?;
    try_simulate_scenario(scenario)
}

/// Like [`try_simulate_from_file`], but reports every failure, unreadable files included,
/// as the `(-1, -1, 0)` sentinel.
pub fn simulate_from_file(path: impl AsRef<Path>) -> Outcome {
    Outcome::from_result(try_simulate_from_file(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Board, Position};
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_scenario(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let file_path = dir.join(name);
        let mut file = File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file_path
    }

    #[test]
    fn test_load_valid_scenario() {
        let dir = tempdir().unwrap();
        let file_path = write_scenario(dir.path(), "walk.txt", "5 5\n1 2\nNNE\n1 0\n");

        let scenario = ScenarioLoader::load_scenario(&file_path).unwrap();

        assert_eq!(scenario.board, Board::new(5, 5));
        assert_eq!(scenario.start, Position::new(1, 2));
        assert_eq!(scenario.movements, "NNE");
        assert!(scenario.is_wall(Position::new(1, 0)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = ScenarioLoader::load_scenario(&dir.path().join("missing.txt"));

        match result {
            Err(GridWalkerError::FileError(msg)) => assert!(msg.contains("missing.txt")),
            other => panic!("Expected a FileError, but got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_string() {
        let scenario = ScenarioLoader::load_scenario_from_string("2 2 0 0 N 0 1").unwrap();

        assert!(scenario.is_wall(Position::new(0, 1)));
    }

    #[test]
    fn test_simulate_from_file_cases() {
        let dir = tempdir().unwrap();
        let cases = [
            // The worked example from the task statement.
            ("given.txt", "5 5\n1 2\nNNESEESWNWW\n1 0\n2 2\n2 3\n", (1, 4, 7)),
            // Same walk with leading zeros and Windows line endings.
            (
                "zeros.txt",
                "05 05\r\n01 02\r\nNNESEESWNWW\r\n01 00\r\n02 02\r\n02 03\r\n",
                (1, 4, 7),
            ),
            ("off_board.txt", "3 3\n0 0\nW\n", (-1, -1, 0)),
            ("no_moves.txt", "5 5\n0 0\n", (-1, -1, 0)),
            ("bad_start.txt", "5 5\n5 0\nN\n", (-1, -1, 0)),
            ("bad_dimension.txt", "5 five\n0 0\nN\n", (-1, -1, 0)),
            ("corridor.txt", "10 1\n0 0\nEEEEEEEEE\n", (9, 0, 9)),
            ("blocked.txt", "2 2\n0 0\nN\n0 1\n", (0, 0, 0)),
        ];

        for (name, content, expected) in cases {
            let file_path = write_scenario(dir.path(), name, content);

            assert_eq!(
                simulate_from_file(&file_path).as_tuple(),
                expected,
                "scenario {}",
                name
            );
        }
    }

    #[test]
    fn test_simulate_from_file_roundabout() {
        let dir = tempdir().unwrap();
        // Spiral inwards over a 4x4 board, then step onto an already visited cell.
        let file_path = write_scenario(dir.path(), "spiral.txt", "4 4\n0 0\nNNNEEESSSWWNNESW\n");

        assert_eq!(simulate_from_file(&file_path).as_tuple(), (1, 1, 15));
    }

    #[test]
    fn test_simulate_large_board() {
        let dir = tempdir().unwrap();
        let file_path = write_scenario(
            dir.path(),
            "large.txt",
            "1000000000 1000000000\n999999998 999999998\nNE\n0 0\n",
        );

        let outcome = simulate_from_file(&file_path);
        assert!(!outcome.is_invalid());
        assert_eq!(outcome.as_tuple(), (999_999_999, 999_999_999, 2));
    }

    #[test]
    fn test_unreadable_file_is_sentinel() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.txt");

        assert!(simulate_from_file(&path).is_invalid());
        assert!(matches!(
            try_simulate_from_file(&path),
            Err(GridWalkerError::FileError(_))
        ));
    }
}
