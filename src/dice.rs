//! Dice rolls and per-die usage.
//!
//! A roll holds two dice, or four equal dice on a pasch. Each die is marked
//! used as the matcher consumes it and can be restored one at a time.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::MAX_DIE;
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die {
    pub value: u8,
    pub used: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    dice: Vec<Die>,
}

/// Rolls `count` dice with `sides` faces each.
pub fn roll_dice(rng: &mut impl Rng, count: usize, sides: u8) -> Result<Vec<u8>, EngineError> {
    if count == 0 {
        return Err(EngineError::DiceCountOutOfRange(count));
    }
    if sides < 2 {
        return Err(EngineError::DiceSidesOutOfRange(sides));
    }
    Ok((0..count).map(|_| rng.gen_range(1..=sides)).collect())
}

impl DiceRoll {
    /// Builds a roll from two faces, expanding a pasch to four dice.
    pub fn from_values(first: u8, second: u8) -> Result<Self, EngineError> {
        for value in [first, second] {
            if !(1..=MAX_DIE).contains(&value) {
                return Err(EngineError::DieOutOfRange(value));
            }
        }
        Ok(DiceRoll::from_faces(first, second))
    }

    /// Rolls two six-sided dice.
    pub fn roll(rng: &mut impl Rng) -> Self {
        let first = rng.gen_range(1..=MAX_DIE);
        let second = rng.gen_range(1..=MAX_DIE);
        DiceRoll::from_faces(first, second)
    }

    fn from_faces(first: u8, second: u8) -> Self {
        let count = if first == second { 4 } else { 2 };
        let values = [first, second, first, second];
        DiceRoll {
            dice: values[..count]
                .iter()
                .map(|&value| Die { value, used: false })
                .collect(),
        }
    }

    pub fn is_pasch(&self) -> bool {
        self.dice.len() == 4
    }

    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// All rolled values in roll order.
    pub fn values(&self) -> Vec<u8> {
        self.dice.iter().map(|d| d.value).collect()
    }

    /// Values still available to play.
    pub fn unused(&self) -> Vec<u8> {
        self.dice.iter().filter(|d| !d.used).map(|d| d.value).collect()
    }

    pub fn is_exhausted(&self) -> bool {
        self.dice.iter().all(|d| d.used)
    }

    /// Marks one unused die of `value` as used.
    pub fn mark_used(&mut self, value: u8) -> Result<(), EngineError> {
        let die = self
            .dice
            .iter_mut()
            .find(|d| d.value == value && !d.used)
            .ok_or(EngineError::DieUnavailable(value))?;
        die.used = true;
        Ok(())
    }

    /// Marks every value in `values` used, or none of them.
    pub fn mark_all_used(&mut self, values: &[u8]) -> Result<(), EngineError> {
        let mut next = self.clone();
        for &value in values {
            next.mark_used(value)?;
        }
        *self = next;
        Ok(())
    }

    /// Restores exactly one used die of `value`.
    pub fn undo(&mut self, value: u8) -> Result<(), EngineError> {
        let die = self
            .dice
            .iter_mut()
            .rev()
            .find(|d| d.value == value && d.used)
            .ok_or(EngineError::DieNotUsed(value))?;
        die.used = false;
        Ok(())
    }
}
