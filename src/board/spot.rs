//! Colors, board spots, and elementary checker moves.
//!
//! A spot is either one of the 24 real points or one of the four per-color
//! sentinels: the home-bar entry and the bear-off tray. Sentinels are used
//! uniformly by legality checks, the executor, and history notation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of real points on the board.
pub const POINT_COUNT: usize = 24;

/// The two sides. White checkers are stored as negative counts, black as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

/// Both colors, white first.
pub const ALL_COLORS: [Color; 2] = [Color::White, Color::Black];

impl Color {
    /// Returns the other side.
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Index into per-color arrays (white 0, black 1).
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Sign used for this color's checkers in a field value.
    pub const fn sign(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub const fn from_is_white(is_white: bool) -> Color {
        if is_white {
            Color::White
        } else {
            Color::Black
        }
    }

    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    /// Returns the owner of a field value, or None for an empty point.
    pub fn owner_of(value: i8) -> Option<Color> {
        match value.signum() {
            -1 => Some(Color::White),
            1 => Some(Color::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// A place a checker can move from or to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spot {
    /// A real board index, 0..=23.
    Point(u8),
    /// Home-bar entry sentinel for the given color.
    Bar(Color),
    /// Bear-off sentinel for the given color.
    Off(Color),
}

impl Spot {
    /// Returns the board index for an in-range point.
    pub fn point_index(self) -> Option<usize> {
        match self {
            Spot::Point(p) if (p as usize) < POINT_COUNT => Some(p as usize),
            _ => None,
        }
    }

    pub fn is_point(self) -> bool {
        self.point_index().is_some()
    }

    /// True for a real point or a sentinel belonging to `color`.
    pub fn is_valid_for(self, color: Color) -> bool {
        match self {
            Spot::Point(p) => (p as usize) < POINT_COUNT,
            Spot::Bar(c) | Spot::Off(c) => c == color,
        }
    }
}

impl fmt::Display for Spot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spot::Point(p) => write!(f, "{}", p),
            Spot::Bar(c) => write!(f, "bar-{}", c),
            Spot::Off(c) => write!(f, "off-{}", c),
        }
    }
}

/// An elementary move of one checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckerMove {
    pub from: Spot,
    pub to: Spot,
}

impl CheckerMove {
    pub const fn new(from: Spot, to: Spot) -> Self {
        Self { from, to }
    }
}
