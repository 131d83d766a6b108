//! Sequence generation over every possible roll.
//!
//! Used for hints and position analysis. The 21 distinct rolls are
//! searched in parallel, each on its own scratch copy of the board.

use rayon::prelude::*;

use crate::board::{Board, Color, MAX_DIE};
use crate::error::EngineError;

use super::{legal_move_sequences, MoveSequence};

/// Legal sequences for one roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollSequences {
    /// The two faces, higher first.
    pub roll: (u8, u8),
    pub sequences: Vec<MoveSequence>,
}

/// All 21 distinct rolls, higher face first.
pub fn distinct_rolls() -> Vec<(u8, u8)> {
    (1..=MAX_DIE)
        .flat_map(|high| (1..=high).map(move |low| (high, low)))
        .collect()
}

/// Dice to play for a roll: four copies of a pasch, otherwise both faces.
pub fn roll_dice(roll: (u8, u8)) -> Vec<u8> {
    if roll.0 == roll.1 {
        vec![roll.0; 4]
    } else {
        vec![roll.0, roll.1]
    }
}

/// Legal sequences for every distinct roll.
pub fn sequences_for_all_rolls(
    board: &Board,
    color: Color,
) -> Result<Vec<RollSequences>, EngineError> {
    distinct_rolls()
        .into_par_iter()
        .map(|roll| -> Result<RollSequences, EngineError> {
            let sequences = legal_move_sequences(board, color, &roll_dice(roll))?;
            Ok(RollSequences { roll, sequences })
        })
        .collect()
}

/// Rolls with which `color` cannot move at all.
pub fn blocked_rolls(board: &Board, color: Color) -> Result<Vec<(u8, u8)>, EngineError> {
    Ok(sequences_for_all_rolls(board, color)?
        .into_iter()
        .filter(|r| r.sequences.is_empty())
        .map(|r| r.roll)
        .collect())
}
