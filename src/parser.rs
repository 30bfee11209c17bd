//! This module provides the parser for grid walk scenarios, utilizing the `pest` crate.
//! It defines the grammar for scenario text and functions to turn the input into a
//! `Scenario` struct.

use crate::types::{Board, GridWalkerError, Position, Scenario};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::HashSet;
use tracing::debug;

/// Derives a `PestParser` for the scenario grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct ScenarioParser;

/// Parses the given input string into a `Scenario` struct.
///
/// This is the main entry point for reading scenario text. Tokens are positional:
/// board width and height, start x and y, the movement string, then wall coordinates
/// consumed in pairs. A trailing token without a partner is ignored.
///
/// Parsing only checks the shape of the input. Bounds and movement symbols are checked
/// by [`crate::validator::validate`].
///
/// # Arguments
///
/// * `input` - A string slice containing the scenario text.
///
/// # Returns
///
/// * `Ok(Scenario)` if the input is well formed.
/// * `Err(GridWalkerError::ParseError)` if tokens are missing, a numeric field is not a
///   base-10 integer, or a number does not fit in an `i64`.
pub fn parse(input: &str) -> Result<Scenario, GridWalkerError> {
    let root = ScenarioParser::parse(Rule::scenario, input)
        .map_err(|e| GridWalkerError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| parse_error_at_start("Empty scenario", input))?;

    parse_scenario(root)
}

/// Walks the top-level `scenario` pair and assembles a `Scenario`.
fn parse_scenario(pair: Pair<Rule>) -> Result<Scenario, GridWalkerError> {
    let span = pair.as_span();
    let mut board: Option<Board> = None;
    let mut start: Option<Position> = None;
    let mut movements: Option<String> = None;
    let mut walls: HashSet<Position> = HashSet::new();

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::dimensions => {
                let (width, height) = parse_pair(p)?;
                board = Some(Board::new(width, height));
            }
            Rule::start => start = Some(parse_pair(p)?.into()),
            Rule::movements => movements = Some(p.as_str().to_string()),
            Rule::wall => {
                walls.insert(parse_pair(p)?.into());
            }
            Rule::dangling => debug!(token = p.as_str(), "ignoring unpaired trailing token"),
            _ => {} // EOI
        }
    }

    Ok(Scenario {
        board: required(board, "board dimensions", span)?,
        start: required(start, "initial position", span)?,
        movements: required(movements, "movement string", span)?,
        walls,
    })
}

/// Parses a rule made of exactly two `integer` pairs (`dimensions`, `start`, `wall`).
fn parse_pair(pair: Pair<Rule>) -> Result<(i64, i64), GridWalkerError> {
    let span = pair.as_span();
    let mut values = pair.into_inner().map(parse_integer);

    match (values.next(), values.next()) {
        (Some(first), Some(second)) => Ok((first?, second?)),
        _ => Err(parse_error("Expected two integers", span)),
    }
}

/// Parses a base-10 `integer` token. Single underscores between digits are accepted
/// and ignored, as are leading zeros.
fn parse_integer(pair: Pair<Rule>) -> Result<i64, GridWalkerError> {
    let digits: String = pair.as_str().chars().filter(|&c| c != '_').collect();

    digits
        .parse::<i64>()
        .map_err(|e| parse_error(&format!("Invalid integer: {}", e), pair.as_span()))
}

/// Unwraps a section that the grammar guarantees, reporting a parse error otherwise.
fn required<T>(value: Option<T>, name: &str, span: Span) -> Result<T, GridWalkerError> {
    value.ok_or_else(|| parse_error(&format!("Missing {}", name), span))
}

/// Creates a `GridWalkerError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> GridWalkerError {
    GridWalkerError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

/// Creates a `GridWalkerError::ParseError` pointing at the beginning of `input`.
fn parse_error_at_start(msg: &str, input: &str) -> GridWalkerError {
    GridWalkerError::ParseError(Box::new(Error::new_from_pos(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        pest::Position::from_start(input),
    )))
}
