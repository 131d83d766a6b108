//! Applying and reverting single checker moves.
//!
//! The executor validates a move with the legality predicates, then mutates
//! the board in place: leaving the origin (releasing a pin if the last
//! pinning checker leaves), hitting or pinning a lone opposing checker, and
//! landing on a point or in the tray. The returned [`AppliedMove`] records
//! enough to undo the move exactly.

use tracing::trace;

use crate::error::EngineError;

use super::spot::{Color, Spot};
use super::state::Board;
use super::variant::MAX_DIE;

/// A move as it was applied, including what happened to opposing checkers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppliedMove {
    pub from: Spot,
    pub to: Spot,
    pub color: Color,
    /// A lone opposing checker was sent to its home bar.
    pub hit: bool,
    /// A lone opposing checker was pinned at `to`.
    pub pinned: bool,
    /// Leaving `from` freed a checker this color had pinned there.
    pub released: bool,
}

impl Board {
    /// Moves a checker of `color` from `from` by `die` pips.
    pub fn move_checker(
        &mut self,
        from: Spot,
        die: u8,
        color: Color,
    ) -> Result<AppliedMove, EngineError> {
        if !(1..=MAX_DIE).contains(&die) {
            return Err(EngineError::DieOutOfRange(die));
        }
        let to = self
            .variant
            .advance(from, die, color)
            .ok_or(EngineError::InvalidMove { from, to: from })?;
        let legal = match to {
            Spot::Off(_) => self.can_bear_off(from, die, color),
            _ => self.can_move(from, to, color),
        };
        if !legal {
            return Err(match to {
                Spot::Off(_) => EngineError::InvalidBearOff { from, die },
                _ => EngineError::InvalidMove { from, to },
            });
        }
        Ok(self.apply(from, to, color))
    }

    /// Moves a checker of `color` to a literal destination point or sentinel.
    pub fn move_checker_to(
        &mut self,
        from: Spot,
        to: Spot,
        color: Color,
    ) -> Result<AppliedMove, EngineError> {
        if !self.can_move(from, to, color) {
            return Err(EngineError::InvalidMove { from, to });
        }
        Ok(self.apply(from, to, color))
    }

    /// Reverts a move previously returned by the executor.
    ///
    /// Moves must be undone in reverse order. A record that no longer fits
    /// the board is rejected and the board is left untouched.
    pub fn undo_move(&mut self, applied: &AppliedMove) -> Result<(), EngineError> {
        self.check_undo(applied)?;
        self.revert(applied);
        Ok(())
    }

    /// Checks that `applied` is the latest move touching its points, so that
    /// reverting it conserves every checker.
    pub(crate) fn check_undo(&self, applied: &AppliedMove) -> Result<(), EngineError> {
        let mismatch = EngineError::InvalidMove {
            from: applied.to,
            to: applied.from,
        };
        let color = applied.color;
        let opponent = color.opponent();

        let fits_to = match applied.to {
            Spot::Off(_) => self.bear_off_count(color) > 0,
            Spot::Point(q) => {
                let q = q as usize;
                let own = self.checkers_at(q, color);
                if applied.hit {
                    own == 1 && self.home_bar_count(opponent) > 0
                } else if applied.pinned {
                    own == 1
                        && matches!(
                            self.pinning.as_ref().and_then(|p| p.pinned_at(q)),
                            Some((c, _)) if c == opponent
                        )
                } else {
                    own > 0
                }
            }
            Spot::Bar(_) => false,
        };

        let fits_from = match applied.from {
            Spot::Bar(c) => c == color && self.home_bar.is_some(),
            Spot::Point(p) => {
                let p = p as usize;
                if applied.released {
                    // The freed checker must still stand alone, unpinned.
                    self.fields[p] == opponent.sign()
                        && self.pinning.as_ref().is_some_and(|pin| pin.pinned_at(p).is_none())
                } else {
                    self.checkers_at(p, opponent) == 0
                }
            }
            Spot::Off(_) => false,
        };

        if fits_to && fits_from {
            Ok(())
        } else {
            Err(mismatch)
        }
    }

    /// Applies a move already known to be legal.
    pub(crate) fn apply(&mut self, from: Spot, to: Spot, color: Color) -> AppliedMove {
        let sign = color.sign();
        let mut applied = AppliedMove {
            from,
            to,
            color,
            hit: false,
            pinned: false,
            released: false,
        };

        match from {
            Spot::Bar(_) => {
                if let Some(bar) = self.home_bar.as_mut() {
                    let removed = bar.remove(color);
                    debug_assert!(removed, "entered from an empty bar");
                }
            }
            Spot::Point(p) => {
                let p = p as usize;
                self.fields[p] -= sign;
                if self.fields[p] == 0 {
                    if let Some(pinning) = self.pinning.as_mut() {
                        if let Some((pinned, n)) = pinning.pinned_at(p) {
                            self.fields[p] = pinned.sign() * n as i8;
                            pinning.set(p, 0);
                            applied.released = true;
                            trace!(point = p, %color, "pin released");
                        }
                    }
                }
            }
            Spot::Off(_) => {}
        }

        match to {
            Spot::Off(_) => self.bear_off[color.index()] += 1,
            Spot::Point(q) => {
                let q = q as usize;
                if self.fields[q] == -sign {
                    if let Some(bar) = self.home_bar.as_mut() {
                        bar.add(color.opponent(), 1);
                        self.fields[q] = 0;
                        applied.hit = true;
                        trace!(point = q, %color, "hit");
                    } else if let Some(pinning) = self.pinning.as_mut() {
                        pinning.set(q, self.fields[q]);
                        self.fields[q] = 0;
                        applied.pinned = true;
                        trace!(point = q, %color, "pinned");
                    }
                }
                self.fields[q] += sign;
            }
            Spot::Bar(_) => {}
        }

        applied
    }

    /// Exact inverse of [`Board::apply`].
    pub(crate) fn revert(&mut self, applied: &AppliedMove) {
        let color = applied.color;
        let sign = color.sign();

        match applied.to {
            Spot::Off(_) => self.bear_off[color.index()] -= 1,
            Spot::Point(q) => {
                let q = q as usize;
                self.fields[q] -= sign;
                if applied.hit {
                    if let Some(bar) = self.home_bar.as_mut() {
                        let removed = bar.remove(color.opponent());
                        debug_assert!(removed, "hit checker missing from the bar");
                    }
                    self.fields[q] = -sign;
                } else if applied.pinned {
                    if let Some(pinning) = self.pinning.as_mut() {
                        let (pinned, n) = pinning.pinned_at(q).unwrap_or((color.opponent(), 1));
                        self.fields[q] = pinned.sign() * n as i8;
                        pinning.set(q, 0);
                    }
                }
            }
            Spot::Bar(_) => {}
        }

        match applied.from {
            Spot::Bar(_) => {
                if let Some(bar) = self.home_bar.as_mut() {
                    bar.add(color, 1);
                }
            }
            Spot::Point(p) => {
                let p = p as usize;
                if applied.released {
                    if let Some(pinning) = self.pinning.as_mut() {
                        pinning.set(p, self.fields[p]);
                        self.fields[p] = 0;
                    }
                }
                self.fields[p] += sign;
            }
            Spot::Off(_) => {}
        }
    }
}
