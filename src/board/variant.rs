//! Game variants and their direction-aware operators.
//!
//! Every variant shares the 24-point board but routes each color along its
//! own track. A checker's *progress* is its distance travelled along that
//! track: 0 is the first point of the start quadrant, 23 the last point of
//! the home board. The bar sits at progress -1 and the bear-off tray at 24,
//! which turns every movement rule into plain arithmetic on progress values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::invert::BoardMapping;
use super::spot::{Color, Spot, POINT_COUNT};

/// Checkers per color in every variant.
pub const CHECKERS_PER_COLOR: u8 = 15;

/// Minimum opposing checkers that make a point impassable.
pub const BLOCK_AMOUNT: u8 = 2;

/// Track length; progress 24 means borne off.
pub const TRACK_LENGTH: i8 = POINT_COUNT as i8;

/// First progress value of the home board.
pub const HOME_START: i8 = 18;

/// Last progress value of the start quadrant.
pub const START_END: i8 = 5;

/// Largest value a die can show.
pub const MAX_DIE: u8 = 6;

/// Standard opening layout as (progress, count) pairs, used by the
/// backgammon family.
const STANDARD_LAYOUT: [(u8, i8); 4] = [(0, 2), (11, 5), (16, 3), (18, 5)];

/// Layout with every checker stacked on the first track point.
const STACKED_LAYOUT: [(u8, i8); 1] = [(0, 15)];

/// A supported rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Backgammon,
    Portes,
    Plakoto,
    Tavla,
    Fevga,
}

pub const ALL_VARIANTS: [Variant; 5] = [
    Variant::Backgammon,
    Variant::Portes,
    Variant::Plakoto,
    Variant::Tavla,
    Variant::Fevga,
];

/// Per-variant constants and capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Lone checkers can be hit and sent to the home bar.
    pub home_bar: bool,
    /// Lone checkers are pinned in place instead of hit.
    pub pinning: bool,
    pub doubling_cube: bool,
    pub block_amount: u8,
    pub win_condition_count: u8,
}

/// An inclusive range of board indices. `first` may be greater than `last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRange {
    pub first: u8,
    pub last: u8,
}

impl PointRange {
    pub fn contains(&self, point: u8) -> bool {
        let (lo, hi) = if self.first <= self.last {
            (self.first, self.last)
        } else {
            (self.last, self.first)
        };
        (lo..=hi).contains(&point)
    }

    /// Iterates from `first` to `last`, in whichever direction the range runs.
    pub fn points(&self) -> Vec<u8> {
        if self.first <= self.last {
            (self.first..=self.last).collect()
        } else {
            (self.last..=self.first).rev().collect()
        }
    }
}

/// Error returned when a variant name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variant '{0}'")]
pub struct ParseVariantError(pub String);

impl Variant {
    /// Lowercase name, also accepted by `FromStr`.
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Backgammon => "backgammon",
            Variant::Portes => "portes",
            Variant::Plakoto => "plakoto",
            Variant::Tavla => "tavla",
            Variant::Fevga => "fevga",
        }
    }

    pub const fn rules(self) -> Rules {
        let (home_bar, pinning, doubling_cube) = match self {
            Variant::Backgammon => (true, false, true),
            Variant::Portes | Variant::Tavla => (true, false, false),
            Variant::Plakoto => (false, true, false),
            Variant::Fevga => (false, false, false),
        };
        Rules {
            home_bar,
            pinning,
            doubling_cube,
            block_amount: BLOCK_AMOUNT,
            win_condition_count: CHECKERS_PER_COLOR,
        }
    }

    /// Index mapping that presents the board from the other side.
    ///
    /// Fevga starts the colors on diagonally opposite quadrants, so its
    /// board is rotated rather than mirrored.
    pub const fn mapping(self) -> BoardMapping {
        match self {
            Variant::Fevga => BoardMapping::DiagonalHorizontal,
            _ => BoardMapping::Horizontal,
        }
    }

    /// Converts a board index to the color's track progress.
    pub fn progress_of(self, color: Color, point: u8) -> u8 {
        // Both track mappings are their own inverse.
        self.point_at(color, point)
    }

    /// Converts a track progress (0..=23) to a board index.
    pub fn point_at(self, color: Color, progress: u8) -> u8 {
        debug_assert!((progress as usize) < POINT_COUNT, "progress {} off the track", progress);
        let last = POINT_COUNT as u8 - 1;
        match (self, color) {
            (_, Color::White) => progress,
            (Variant::Fevga, Color::Black) => (progress + 12) % POINT_COUNT as u8,
            (_, Color::Black) => last - progress,
        }
    }

    /// Progress of any spot on `color`'s track, or None for an out-of-range
    /// point or another color's sentinel.
    pub fn spot_progress(self, color: Color, spot: Spot) -> Option<i8> {
        if !spot.is_valid_for(color) {
            return None;
        }
        match spot {
            Spot::Point(p) => Some(self.progress_of(color, p) as i8),
            Spot::Bar(_) => Some(-1),
            Spot::Off(_) => Some(TRACK_LENGTH),
        }
    }

    /// The spot reached at a given progress: the bar below 0, off at 24 and beyond.
    pub fn spot_at_progress(self, color: Color, progress: i8) -> Spot {
        if progress < 0 {
            Spot::Bar(color)
        } else if progress >= TRACK_LENGTH {
            Spot::Off(color)
        } else {
            Spot::Point(self.point_at(color, progress as u8))
        }
    }

    /// Moves `die` steps forward from `from`. Overshooting the track lands on
    /// the bear-off sentinel. Returns None for a bad die or an invalid origin.
    pub fn advance(self, from: Spot, die: u8, color: Color) -> Option<Spot> {
        if !(1..=MAX_DIE).contains(&die) || matches!(from, Spot::Off(_)) {
            return None;
        }
        let start = self.spot_progress(color, from)?;
        Some(self.spot_at_progress(color, start + die as i8))
    }

    /// Recovers the die implied by a move. For bear-offs this is the exact
    /// distance to the tray, the smallest die that can make the move.
    pub fn recover_roll(self, from: Spot, to: Spot, color: Color) -> Option<u8> {
        let start = self.spot_progress(color, from)?;
        let end = self.spot_progress(color, to)?;
        if end <= start {
            return None;
        }
        Some((end - start) as u8)
    }

    pub fn is_in_home(self, point: u8, color: Color) -> bool {
        (point as usize) < POINT_COUNT && self.progress_of(color, point) as i8 >= HOME_START
    }

    /// Distance from a point to the bear-off tray.
    pub fn distance_to_off(self, point: u8, color: Color) -> u8 {
        (TRACK_LENGTH - self.progress_of(color, point) as i8) as u8
    }

    /// Bear-off rule: an exact die always clears the point, a larger die only
    /// when no checker of the color sits farther from home.
    pub fn bears_off(self, distance: u8, die: u8, farther_occupied: bool) -> bool {
        die == distance || (die > distance && !farther_occupied)
    }

    pub fn home_range(self, color: Color) -> PointRange {
        PointRange {
            first: self.point_at(color, HOME_START as u8),
            last: self.point_at(color, TRACK_LENGTH as u8 - 1),
        }
    }

    pub fn start_range(self, color: Color) -> PointRange {
        PointRange {
            first: self.point_at(color, 0),
            last: self.point_at(color, START_END as u8),
        }
    }

    /// Opening position for this variant.
    pub fn start_layout(self) -> [i8; POINT_COUNT] {
        let layout: &[(u8, i8)] = match self {
            Variant::Backgammon | Variant::Portes | Variant::Tavla => &STANDARD_LAYOUT,
            Variant::Plakoto | Variant::Fevga => &STACKED_LAYOUT,
        };
        let mut fields = [0i8; POINT_COUNT];
        for color in [Color::White, Color::Black] {
            for &(progress, count) in layout {
                fields[self.point_at(color, progress) as usize] = count * color.sign();
            }
        }
        fields
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ALL_VARIANTS
            .iter()
            .copied()
            .find(|v| v.name() == lower)
            .ok_or(ParseVariantError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_roundtrip() {
        for v in ALL_VARIANTS {
            assert_eq!(v.name().parse::<Variant>(), Ok(v));
        }
        assert_eq!("Backgammon".parse::<Variant>(), Ok(Variant::Backgammon));
        assert!("chess".parse::<Variant>().is_err());
    }

    #[test]
    fn standard_layout_matches_backgammon_opening() {
        let f = Variant::Backgammon.start_layout();
        assert_eq!(f[0], -2);
        assert_eq!(f[5], 5);
        assert_eq!(f[7], 3);
        assert_eq!(f[11], -5);
        assert_eq!(f[12], 5);
        assert_eq!(f[16], -3);
        assert_eq!(f[18], -5);
        assert_eq!(f[23], 2);
    }

    #[test]
    fn fevga_black_starts_across_the_board() {
        let f = Variant::Fevga.start_layout();
        assert_eq!(f[0], -15);
        assert_eq!(f[12], 15);
        let home = Variant::Fevga.home_range(Color::Black);
        assert_eq!((home.first, home.last), (6, 11));
    }

    #[test]
    fn black_home_range_runs_high_to_low() {
        let home = Variant::Portes.home_range(Color::Black);
        assert_eq!((home.first, home.last), (5, 0));
        assert!(home.contains(0));
        assert!(home.contains(5));
        assert!(!home.contains(6));
        assert_eq!(home.points(), vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn advance_enters_and_bears_off() {
        let v = Variant::Backgammon;
        assert_eq!(v.advance(Spot::Bar(Color::White), 3, Color::White), Some(Spot::Point(2)));
        assert_eq!(v.advance(Spot::Bar(Color::Black), 3, Color::Black), Some(Spot::Point(21)));
        assert_eq!(v.advance(Spot::Point(22), 4, Color::White), Some(Spot::Off(Color::White)));
        assert_eq!(v.advance(Spot::Point(3), 4, Color::Black), Some(Spot::Off(Color::Black)));
        assert_eq!(v.advance(Spot::Point(3), 0, Color::Black), None);
        assert_eq!(v.advance(Spot::Bar(Color::Black), 3, Color::White), None);
    }

    #[test]
    fn fevga_black_wraps_around() {
        let v = Variant::Fevga;
        assert_eq!(v.advance(Spot::Point(22), 3, Color::Black), Some(Spot::Point(1)));
        assert_eq!(v.advance(Spot::Point(10), 2, Color::Black), Some(Spot::Off(Color::Black)));
    }

    #[test]
    fn recover_roll_through_sentinels() {
        let v = Variant::Tavla;
        assert_eq!(v.recover_roll(Spot::Bar(Color::White), Spot::Point(4), Color::White), Some(5));
        assert_eq!(v.recover_roll(Spot::Point(21), Spot::Off(Color::White), Color::White), Some(3));
        assert_eq!(v.recover_roll(Spot::Point(2), Spot::Off(Color::Black), Color::Black), Some(3));
        assert_eq!(v.recover_roll(Spot::Point(5), Spot::Point(3), Color::White), None);
    }

    #[test]
    fn capability_table() {
        assert!(Variant::Backgammon.rules().doubling_cube);
        assert!(!Variant::Portes.rules().doubling_cube);
        assert!(Variant::Plakoto.rules().pinning);
        assert!(!Variant::Plakoto.rules().home_bar);
        let fevga = Variant::Fevga.rules();
        assert!(!fevga.home_bar && !fevga.pinning && !fevga.doubling_cube);
        for v in ALL_VARIANTS {
            assert_eq!(v.rules().win_condition_count, 15);
            assert_eq!(v.rules().block_amount, 2);
        }
    }
}
