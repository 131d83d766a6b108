//! Board position representation.
//!
//! Holds one game position: signed point occupancy, bear-off trays, the
//! variant's optional facets, and the history log of the round.

use crate::error::EngineError;

use super::capability::{DoublingCube, HomeBar, Pinning};
use super::history::History;
use super::spot::{Color, Spot, POINT_COUNT};
use super::variant::{PointRange, Variant, CHECKERS_PER_COLOR, TRACK_LENGTH};

/// Pip value of a checker waiting on the home bar.
const BAR_PIPS: u32 = 25;

/// A complete position of one round.
///
/// Uses a fixed-size signed array so clones are cheap: the move generator
/// searches on scratch copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) variant: Variant,
    /// Negative = white checkers, positive = black.
    pub(crate) fields: [i8; POINT_COUNT],
    pub(crate) bear_off: [u8; 2],
    pub(crate) home_bar: Option<HomeBar>,
    pub(crate) pinning: Option<Pinning>,
    pub(crate) cube: Option<DoublingCube>,
    pub(crate) history: History,
}

impl Board {
    /// Creates the opening position for a variant.
    pub fn new(variant: Variant) -> Self {
        let mut board = Board::empty(variant);
        board.fields = variant.start_layout();
        board
    }

    /// Creates a board for the variant with no checkers placed.
    pub fn empty(variant: Variant) -> Self {
        let rules = variant.rules();
        Board {
            variant,
            fields: [0; POINT_COUNT],
            bear_off: [0; 2],
            home_bar: rules.home_bar.then(HomeBar::default),
            pinning: rules.pinning.then(Pinning::default),
            cube: rules.doubling_cube.then(DoublingCube::default),
            history: History::default(),
        }
    }

    /// Copy used for speculative search. The history is left behind.
    pub fn scratch(&self) -> Board {
        Board {
            variant: self.variant,
            fields: self.fields,
            bear_off: self.bear_off,
            home_bar: self.home_bar,
            pinning: self.pinning,
            cube: self.cube,
            history: History::default(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn fields(&self) -> &[i8; POINT_COUNT] {
        &self.fields
    }

    /// Signed occupancy of a point, or `None` past the last point.
    pub fn field(&self, point: usize) -> Option<i8> {
        self.fields.get(point).copied()
    }

    /// Replaces the board occupancy wholesale.
    ///
    /// Rejects a layout that would give a color more than its checkers once
    /// bar, borne-off and pinned checkers are counted, or that leaves a
    /// pinned checker without its pinner on top.
    pub fn set_fields(&mut self, fields: [i8; POINT_COUNT]) -> Result<(), EngineError> {
        let previous = std::mem::replace(&mut self.fields, fields);
        if let Err(err) = self.check_pins() {
            self.fields = previous;
            return Err(err);
        }
        for color in [Color::White, Color::Black] {
            let count = self.checker_total(color);
            if count > CHECKERS_PER_COLOR as u32 {
                self.fields = previous;
                return Err(EngineError::CheckerCountMismatch {
                    color,
                    count,
                    expected: CHECKERS_PER_COLOR,
                });
            }
        }
        Ok(())
    }

    /// Every pinned stack needs a checker of the other color on top.
    pub(crate) fn check_pins(&self) -> Result<(), EngineError> {
        let Some(pinning) = self.pinning.as_ref() else {
            return Ok(());
        };
        for (point, &value) in pinning.fields().iter().enumerate() {
            if value != 0 && self.fields[point].signum() != -value.signum() {
                return Err(EngineError::InvalidMove {
                    from: Spot::Point(point as u8),
                    to: Spot::Point(point as u8),
                });
            }
        }
        Ok(())
    }

    /// Checkers of `color` standing free (not pinned) on a point.
    pub fn checkers_at(&self, point: usize, color: Color) -> u8 {
        let value = self.fields[point];
        if Color::owner_of(value) == Some(color) {
            value.unsigned_abs()
        } else {
            0
        }
    }

    /// Points where `color` has at least one movable checker, in board order.
    pub fn occupied_points(&self, color: Color) -> impl Iterator<Item = u8> + '_ {
        (0..POINT_COUNT as u8).filter(move |&p| self.checkers_at(p as usize, color) > 0)
    }

    pub fn home_range(&self, color: Color) -> PointRange {
        self.variant.home_range(color)
    }

    pub fn start_range(&self, color: Color) -> PointRange {
        self.variant.start_range(color)
    }

    pub fn win_condition_count(&self) -> u8 {
        self.variant.rules().win_condition_count
    }

    pub fn block_amount(&self) -> u8 {
        self.variant.rules().block_amount
    }

    pub fn bear_off_count(&self, color: Color) -> u8 {
        self.bear_off[color.index()]
    }

    /// Moves `count` checkers straight to the tray. Used to seed positions.
    pub fn bear_off_checker(&mut self, color: Color, count: u8) -> Result<(), EngineError> {
        let total = self.checker_total(color) + count as u32;
        if total > CHECKERS_PER_COLOR as u32 {
            return Err(EngineError::CheckerCountMismatch {
                color,
                count: total,
                expected: CHECKERS_PER_COLOR,
            });
        }
        self.bear_off[color.index()] += count;
        Ok(())
    }

    pub fn home_bar(&self) -> Option<&HomeBar> {
        self.home_bar.as_ref()
    }

    /// Checkers on the bar; 0 for variants without one.
    pub fn home_bar_count(&self, color: Color) -> u8 {
        self.home_bar.map_or(0, |bar| bar.count(color))
    }

    /// Places `count` checkers of `color` on its home bar. Used to seed positions.
    pub fn add_to_home_bar(&mut self, color: Color, count: u8) -> Result<(), EngineError> {
        let total = self.checker_total(color) + count as u32;
        let variant = self.variant;
        let bar = self.home_bar.as_mut().ok_or(EngineError::CapabilityMissing {
            variant,
            capability: "home bar",
        })?;
        if total > CHECKERS_PER_COLOR as u32 {
            return Err(EngineError::CheckerCountMismatch {
                color,
                count: total,
                expected: CHECKERS_PER_COLOR,
            });
        }
        bar.add(color, count);
        Ok(())
    }

    pub fn pinning(&self) -> Option<&Pinning> {
        self.pinning.as_ref()
    }

    pub fn pinned_fields(&self) -> Option<&[i8; POINT_COUNT]> {
        self.pinning.as_ref().map(Pinning::fields)
    }

    /// Pins a single `pinned` checker under a lone opposing checker. Used to seed positions.
    pub fn set_pin(&mut self, point: usize, pinned: Color) -> Result<(), EngineError> {
        if point >= POINT_COUNT {
            return Err(EngineError::PointOutOfRange(point));
        }
        let variant = self.variant;
        let total = self.checker_total(pinned) + 1;
        let pinning = self.pinning.as_mut().ok_or(EngineError::CapabilityMissing {
            variant,
            capability: "pinning",
        })?;
        if self.fields[point] != pinned.opponent().sign() || pinning.pinned_at(point).is_some() {
            return Err(EngineError::InvalidMove {
                from: Spot::Point(point as u8),
                to: Spot::Point(point as u8),
            });
        }
        if total > CHECKERS_PER_COLOR as u32 {
            return Err(EngineError::CheckerCountMismatch {
                color: pinned,
                count: total,
                expected: CHECKERS_PER_COLOR,
            });
        }
        pinning.set(point, pinned.sign());
        Ok(())
    }

    /// True when each color's mother checker (the last one left on its first
    /// track point) is pinned by the other.
    pub fn both_mothers_pinned(&self) -> bool {
        let Some(pinning) = self.pinning.as_ref() else {
            return false;
        };
        [Color::White, Color::Black].into_iter().all(|color| {
            let mother = self.variant.point_at(color, 0) as usize;
            matches!(pinning.pinned_at(mother), Some((c, _)) if c == color)
        })
    }

    pub fn cube(&self) -> Option<&DoublingCube> {
        self.cube.as_ref()
    }

    /// Offers a double for `color`. Returns the new cube value.
    pub fn double(&mut self, color: Color) -> Result<u32, EngineError> {
        let variant = self.variant;
        self.cube
            .as_mut()
            .ok_or(EngineError::CapabilityMissing {
                variant,
                capability: "doubling cube",
            })?
            .double(color)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Sum of distances to the tray for every checker of `color` still in play.
    ///
    /// Always derived from the fields, never cached.
    pub fn pip_count(&self, color: Color) -> u32 {
        let on_board: u32 = (0..POINT_COUNT)
            .map(|p| {
                let count = self.checkers_at(p, color) as u32 + self.pinned_at(p, color) as u32;
                count * self.variant.distance_to_off(p as u8, color) as u32
            })
            .sum();
        on_board + self.home_bar_count(color) as u32 * BAR_PIPS
    }

    pub fn pip_count_white(&self) -> u32 {
        self.pip_count(Color::White)
    }

    pub fn pip_count_black(&self) -> u32 {
        self.pip_count(Color::Black)
    }

    /// Checkers of `color` pinned at a point.
    pub fn pinned_at(&self, point: usize, color: Color) -> u8 {
        match self.pinning.as_ref().and_then(|p| p.pinned_at(point)) {
            Some((c, n)) if c == color => n,
            _ => 0,
        }
    }

    /// All checkers of `color`: on points, pinned, on the bar, and borne off.
    pub fn checker_total(&self, color: Color) -> u32 {
        let on_board: u32 = (0..POINT_COUNT)
            .map(|p| self.checkers_at(p, color) as u32 + self.pinned_at(p, color) as u32)
            .sum();
        on_board + self.home_bar_count(color) as u32 + self.bear_off_count(color) as u32
    }

    /// Checks that each color accounts for exactly its 15 checkers.
    pub fn validate(&self) -> Result<(), EngineError> {
        for color in [Color::White, Color::Black] {
            let count = self.checker_total(color);
            if count != CHECKERS_PER_COLOR as u32 {
                return Err(EngineError::CheckerCountMismatch {
                    color,
                    count,
                    expected: CHECKERS_PER_COLOR,
                });
            }
        }
        Ok(())
    }

    /// The color that has borne off every checker, if any.
    pub fn winner(&self) -> Option<Color> {
        let target = self.win_condition_count();
        [Color::White, Color::Black]
            .into_iter()
            .find(|&c| self.bear_off_count(c) >= target)
    }

    /// Progress of the checker of `color` farthest from home, or None when
    /// the color has nothing left on the board or bar.
    pub(crate) fn rearmost_progress(&self, color: Color) -> Option<i8> {
        if self.home_bar_count(color) > 0 {
            return Some(-1);
        }
        (0..TRACK_LENGTH as u8)
            .map(|progress| (progress, self.variant.point_at(color, progress) as usize))
            .find(|&(_, point)| {
                self.checkers_at(point, color) > 0 || self.pinned_at(point, color) > 0
            })
            .map(|(progress, _)| progress as i8)
    }
}
