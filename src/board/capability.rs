//! Optional per-variant facets attached to a board.
//!
//! A variant carries any subset of: a home bar for hit checkers, a pinned
//! field layer, and a doubling cube. Each facet is an `Option` on the board
//! and is queried with a plain accessor rather than a type test.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::spot::{Color, POINT_COUNT};

/// Highest value the doubling cube can reach.
pub const MAX_CUBE_VALUE: u32 = 64;

/// Holding area for hit checkers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeBar {
    counts: [u8; 2],
}

impl HomeBar {
    pub fn count(&self, color: Color) -> u8 {
        self.counts[color.index()]
    }

    pub(crate) fn add(&mut self, color: Color, count: u8) {
        self.counts[color.index()] += count;
    }

    /// Takes one checker of `color` off the bar. Returns false when there is none.
    pub(crate) fn remove(&mut self, color: Color) -> bool {
        match self.counts[color.index()].checked_sub(1) {
            Some(n) => {
                self.counts[color.index()] = n;
                true
            }
            None => false,
        }
    }

    pub(crate) fn swapped(&self) -> HomeBar {
        HomeBar {
            counts: [self.counts[1], self.counts[0]],
        }
    }
}

/// Per-point record of checkers held down by a single opposing checker.
///
/// A value uses the same sign convention as the board fields and names the
/// pinned color; the pinning checker itself is on the board fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pinning {
    pinned: [i8; POINT_COUNT],
}

impl Default for Pinning {
    fn default() -> Self {
        Pinning {
            pinned: [0; POINT_COUNT],
        }
    }
}

impl Pinning {
    pub fn from_fields(pinned: [i8; POINT_COUNT]) -> Self {
        Pinning { pinned }
    }

    pub fn fields(&self) -> &[i8; POINT_COUNT] {
        &self.pinned
    }

    /// The pinned color and count at a point, if any.
    pub fn pinned_at(&self, point: usize) -> Option<(Color, u8)> {
        let value = self.pinned[point];
        Color::owner_of(value).map(|c| (c, value.unsigned_abs()))
    }

    /// Total checkers of `color` currently pinned.
    pub fn pinned_count(&self, color: Color) -> u8 {
        self.pinned
            .iter()
            .filter(|&&v| Color::owner_of(v) == Some(color))
            .map(|v| v.unsigned_abs())
            .sum()
    }

    pub(crate) fn set(&mut self, point: usize, value: i8) {
        self.pinned[point] = value;
    }
}

/// Stake multiplier and the color allowed to offer the next double.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoublingCube {
    value: u32,
    owner: Option<Color>,
}

impl Default for DoublingCube {
    fn default() -> Self {
        DoublingCube {
            value: 1,
            owner: None,
        }
    }
}

impl DoublingCube {
    pub fn value(&self) -> u32 {
        self.value
    }

    /// None while the cube is centered.
    pub fn owner(&self) -> Option<Color> {
        self.owner
    }

    pub fn can_double(&self, color: Color) -> bool {
        self.value < MAX_CUBE_VALUE && self.owner.map_or(true, |o| o == color)
    }

    /// Doubles the stake on `color`'s offer; the opponent takes the cube.
    pub fn double(&mut self, color: Color) -> Result<u32, EngineError> {
        if !self.can_double(color) {
            return Err(EngineError::CubeNotAvailable(color));
        }
        self.value *= 2;
        self.owner = Some(color.opponent());
        Ok(self.value)
    }

    pub(crate) fn flipped(&self) -> DoublingCube {
        DoublingCube {
            value: self.value,
            owner: self.owner.map(Color::opponent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_starts_centered() {
        let cube = DoublingCube::default();
        assert_eq!(cube.value(), 1);
        assert_eq!(cube.owner(), None);
        assert!(cube.can_double(Color::White));
        assert!(cube.can_double(Color::Black));
    }

    #[test]
    fn double_passes_ownership() {
        let mut cube = DoublingCube::default();
        assert_eq!(cube.double(Color::White), Ok(2));
        assert_eq!(cube.owner(), Some(Color::Black));
        assert_eq!(cube.double(Color::White), Err(EngineError::CubeNotAvailable(Color::White)));
        assert_eq!(cube.double(Color::Black), Ok(4));
        assert_eq!(cube.owner(), Some(Color::White));
    }

    #[test]
    fn cube_caps_at_max() {
        let mut cube = DoublingCube::default();
        let mut color = Color::White;
        while cube.can_double(color) {
            cube.double(color).unwrap();
            color = color.opponent();
        }
        assert_eq!(cube.value(), MAX_CUBE_VALUE);
    }

    #[test]
    fn pinned_counts() {
        let mut pins = Pinning::default();
        pins.set(3, -1);
        pins.set(20, 1);
        assert_eq!(pins.pinned_at(3), Some((Color::White, 1)));
        assert_eq!(pins.pinned_at(4), None);
        assert_eq!(pins.pinned_count(Color::White), 1);
        assert_eq!(pins.pinned_count(Color::Black), 1);
    }

    #[test]
    fn empty_bar_remove_is_refused() {
        let mut bar = HomeBar::default();
        assert!(!bar.remove(Color::White));
        assert_eq!(bar.count(Color::White), 0);
        bar.add(Color::White, 1);
        assert!(bar.remove(Color::White));
        assert!(!bar.remove(Color::White));
    }

    #[test]
    fn home_bar_swap() {
        let mut bar = HomeBar::default();
        bar.add(Color::White, 2);
        let swapped = bar.swapped();
        assert_eq!(swapped.count(Color::Black), 2);
        assert_eq!(swapped.count(Color::White), 0);
    }
}
