//! Single-move legality predicates.
//!
//! Side-effect free checks used by the move generator and by callers that
//! validate a request before handing it to the executor.

use super::spot::{Color, Spot};
use super::state::Board;
use super::variant::{HOME_START, MAX_DIE};

impl Board {
    /// True when `color` has checkers on its home bar and must enter them
    /// before anything else moves. Always false without a home bar.
    pub fn must_enter_from_home_bar(&self, color: Color) -> bool {
        self.home_bar_count(color) > 0
    }

    /// True when every checker of `color` still in play is on its home board.
    pub fn all_pieces_in_home_range(&self, color: Color) -> bool {
        match self.rearmost_progress(color) {
            Some(progress) => progress >= HOME_START,
            None => true,
        }
    }

    /// True when a point cannot be landed on by `color`.
    ///
    /// Two or more opposing checkers always block. A lone opposing checker
    /// blocks when it already pins one of ours (a point holds at most one
    /// pin), or when the variant can neither hit nor pin it.
    pub fn is_blocked(&self, point: usize, color: Color) -> bool {
        let opposing = self.checkers_at(point, color.opponent());
        if opposing == 0 {
            return false;
        }
        if opposing >= self.block_amount() {
            return true;
        }
        if let Some(pinning) = self.pinning() {
            return pinning.pinned_at(point).is_some();
        }
        self.home_bar().is_none()
    }

    /// True when landing on `point` would send an opposing blot to its home bar.
    pub fn can_send_to_home_bar(&self, point: usize, color: Color) -> bool {
        self.home_bar().is_some() && self.checkers_at(point, color.opponent()) == 1
    }

    /// Whether one checker of `color` may move from `from` to `to`.
    ///
    /// `to` may be the color's bear-off sentinel, in which case only the
    /// home-board requirement is checked; use [`Board::can_bear_off`] to
    /// check a particular die.
    pub fn can_move(&self, from: Spot, to: Spot, color: Color) -> bool {
        if !from.is_valid_for(color) || !to.is_valid_for(color) {
            return false;
        }
        if matches!(from, Spot::Off(_)) || matches!(to, Spot::Bar(_)) {
            return false;
        }

        let has_checker = match from {
            Spot::Point(p) => self.checkers_at(p as usize, color) > 0,
            Spot::Bar(_) => self.home_bar_count(color) > 0,
            Spot::Off(_) => false,
        };
        if !has_checker {
            return false;
        }

        if self.must_enter_from_home_bar(color) && from != Spot::Bar(color) {
            return false;
        }

        match self.variant.recover_roll(from, to, color) {
            Some(distance) if distance <= MAX_DIE => {}
            _ => return false,
        }

        match to {
            Spot::Point(p) => !self.is_blocked(p as usize, color),
            Spot::Off(_) => self.all_pieces_in_home_range(color),
            Spot::Bar(_) => false,
        }
    }

    /// Whether `die` bears a checker of `color` off from `from`.
    pub fn can_bear_off(&self, from: Spot, die: u8, color: Color) -> bool {
        if !(1..=MAX_DIE).contains(&die) {
            return false;
        }
        let Some(point) = from.point_index() else {
            return false;
        };
        if self.checkers_at(point, color) == 0 || !self.all_pieces_in_home_range(color) {
            return false;
        }

        let progress = self.variant.progress_of(color, point as u8) as i8;
        let farther_occupied = self
            .rearmost_progress(color)
            .is_some_and(|rear| rear < progress);
        let distance = self.variant.distance_to_off(point as u8, color);
        self.variant.bears_off(distance, die, farther_occupied)
    }
}
