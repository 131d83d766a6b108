//! Text notation for moves and rolls.
//!
//! Points are numbered 1 to 24 from the mover's side: 1 is the last point
//! before bearing off, 24 is the first point after entering. The home-bar
//! entry is written `bar` and the tray `off`.
//!
//! A move is `from/to` (`13/8`, `bar/22`, `6/off`), an action is moves
//! separated by spaces, and a roll is its values separated by spaces.

use thiserror::Error;

use crate::board::{CheckerMove, Color, Spot, Variant, MAX_DIE, POINT_COUNT};

/// Errors that can occur when parsing move or roll notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("expected 'from/to', got '{0}'")]
    MalformedMove(String),

    #[error("unknown spot '{0}'")]
    UnknownSpot(String),

    #[error("invalid die '{0}'")]
    InvalidDie(String),
}

/// Point number of a board index as seen by `color`, or `None` for an index
/// past the last point.
pub fn point_number(variant: Variant, color: Color, point: u8) -> Option<u8> {
    if point as usize >= POINT_COUNT {
        return None;
    }
    Some(POINT_COUNT as u8 - variant.progress_of(color, point))
}

/// Board index of a point number as seen by `color`.
pub fn point_from_number(variant: Variant, color: Color, number: u8) -> Option<u8> {
    if !(1..=POINT_COUNT as u8).contains(&number) {
        return None;
    }
    Some(variant.point_at(color, POINT_COUNT as u8 - number))
}

pub fn format_spot(variant: Variant, color: Color, spot: Spot) -> String {
    match spot {
        Spot::Point(p) => match point_number(variant, color, p) {
            Some(number) => number.to_string(),
            None => "?".to_string(),
        },
        Spot::Bar(_) => "bar".to_string(),
        Spot::Off(_) => "off".to_string(),
    }
}

pub fn format_move(variant: Variant, color: Color, mv: CheckerMove) -> String {
    format!(
        "{}/{}",
        format_spot(variant, color, mv.from),
        format_spot(variant, color, mv.to)
    )
}

pub fn format_moves(variant: Variant, color: Color, moves: &[CheckerMove]) -> String {
    moves
        .iter()
        .map(|&mv| format_move(variant, color, mv))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_roll(values: &[u8]) -> String {
    values
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_spot(variant: Variant, color: Color, s: &str) -> Result<Spot, NotationError> {
    match s.to_ascii_lowercase().as_str() {
        "bar" => Ok(Spot::Bar(color)),
        "off" => Ok(Spot::Off(color)),
        other => other
            .parse::<u8>()
            .ok()
            .and_then(|n| point_from_number(variant, color, n))
            .map(Spot::Point)
            .ok_or_else(|| NotationError::UnknownSpot(s.to_string())),
    }
}

/// Parses a single `from/to` move.
pub fn parse_move(variant: Variant, color: Color, s: &str) -> Result<CheckerMove, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::EmptyInput);
    }
    let (from, to) = s
        .split_once('/')
        .ok_or_else(|| NotationError::MalformedMove(s.to_string()))?;
    Ok(CheckerMove::new(
        parse_spot(variant, color, from)?,
        parse_spot(variant, color, to)?,
    ))
}

/// Parses space-separated moves.
pub fn parse_moves(
    variant: Variant,
    color: Color,
    s: &str,
) -> Result<Vec<CheckerMove>, NotationError> {
    if s.trim().is_empty() {
        return Err(NotationError::EmptyInput);
    }
    s.split_whitespace()
        .map(|token| parse_move(variant, color, token))
        .collect()
}

/// Parses space-separated die values.
pub fn parse_roll(s: &str) -> Result<Vec<u8>, NotationError> {
    if s.trim().is_empty() {
        return Err(NotationError::EmptyInput);
    }
    s.split_whitespace()
        .map(|token| {
            token
                .parse::<u8>()
                .ok()
                .filter(|d| (1..=MAX_DIE).contains(d))
                .ok_or_else(|| NotationError::InvalidDie(token.to_string()))
        })
        .collect()
}
