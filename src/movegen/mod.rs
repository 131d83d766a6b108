//! Legal move generation.
//!
//! One backtracking search enumerates every way a color can play a roll.
//! At each level every unused die value is tried from every origin the
//! color may move (only the bar while it has checkers there); accepted
//! steps are applied to a scratch board, searched deeper, and reverted.
//! A branch ends when no die can be played from anywhere.
//!
//! Only the longest chains are kept, so "play as many dice as possible"
//! falls out of the search. First-step choices are a projection of the
//! same result.

pub mod all_rolls;

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, CheckerMove, Color, Spot, MAX_DIE};
use crate::error::EngineError;

/// One generated step: a checker move and the die it consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Play {
    pub from: Spot,
    pub to: Spot,
    pub die: u8,
}

impl Play {
    pub fn checker_move(&self) -> CheckerMove {
        CheckerMove::new(self.from, self.to)
    }
}

/// An ordered chain of plays from one roll.
pub type MoveSequence = Vec<Play>;

/// Checks a die list: 1 to 4 values, each a face of a six-sided die.
pub fn validate_dice(dice: &[u8]) -> Result<(), EngineError> {
    if dice.is_empty() || dice.len() > 4 {
        return Err(EngineError::DiceCountOutOfRange(dice.len()));
    }
    if let Some(&bad) = dice.iter().find(|&&d| !(1..=MAX_DIE).contains(&d)) {
        return Err(EngineError::DieOutOfRange(bad));
    }
    Ok(())
}

/// Every maximal sequence `color` can play with `dice`.
///
/// `dice` is the unused part of a roll: two values, four equal values for
/// a pasch, or fewer once some have been played. Returns an empty list
/// when nothing can be played.
pub fn legal_move_sequences(
    board: &Board,
    color: Color,
    dice: &[u8],
) -> Result<Vec<MoveSequence>, EngineError> {
    validate_dice(dice)?;

    let mut scratch = board.scratch();
    let mut remaining = dice.to_vec();
    let mut path = Vec::with_capacity(dice.len());
    let mut found = Vec::new();
    search(&mut scratch, color, &mut remaining, &mut path, &mut found);

    let longest = found.iter().map(Vec::len).max().unwrap_or(0);
    let mut seen = HashSet::new();
    found.retain(|seq| seq.len() == longest && seen.insert(seq.clone()));

    debug!(%color, ?dice, sequences = found.len(), length = longest, "generated sequences");
    Ok(found)
}

/// Distinct first steps of all maximal sequences.
pub fn legal_moves(board: &Board, color: Color, dice: &[u8]) -> Result<Vec<CheckerMove>, EngineError> {
    let sequences = legal_move_sequences(board, color, dice)?;
    let mut seen = HashSet::new();
    Ok(sequences
        .iter()
        .filter_map(|seq| seq.first())
        .map(Play::checker_move)
        .filter(|mv| seen.insert(*mv))
        .collect())
}

/// Picks one legal sequence uniformly at random, or None when the roll
/// cannot be played.
pub fn random_sequence(
    board: &Board,
    color: Color,
    dice: &[u8],
    rng: &mut impl Rng,
) -> Result<Option<MoveSequence>, EngineError> {
    let mut sequences = legal_move_sequences(board, color, dice)?;
    if sequences.is_empty() {
        return Ok(None);
    }
    let idx = rng.gen_range(0..sequences.len());
    Ok(Some(sequences.swap_remove(idx)))
}

/// Origins `color` may move from right now.
fn origins(board: &Board, color: Color) -> Vec<Spot> {
    if board.must_enter_from_home_bar(color) {
        return vec![Spot::Bar(color)];
    }
    board.occupied_points(color).map(Spot::Point).collect()
}

fn search(
    board: &mut Board,
    color: Color,
    remaining: &mut Vec<u8>,
    path: &mut Vec<Play>,
    found: &mut Vec<MoveSequence>,
) {
    let mut extended = false;
    let mut tried = [false; MAX_DIE as usize + 1];

    for i in 0..remaining.len() {
        let die = remaining[i];
        // Equal dice lead to identical subtrees.
        if tried[die as usize] {
            continue;
        }
        tried[die as usize] = true;

        for from in origins(board, color) {
            let Some(to) = board.variant().advance(from, die, color) else {
                continue;
            };
            let legal = match to {
                Spot::Off(_) => board.can_bear_off(from, die, color),
                _ => board.can_move(from, to, color),
            };
            if !legal {
                continue;
            }

            extended = true;
            let applied = board.apply(from, to, color);
            remaining.remove(i);
            path.push(Play { from, to, die });

            search(board, color, remaining, path, found);

            path.pop();
            remaining.insert(i, die);
            board.revert(&applied);
        }
    }

    if !extended && !path.is_empty() {
        found.push(path.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Variant, POINT_COUNT};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board_with(variant: Variant, placements: &[(usize, i8)]) -> Board {
        let mut board = Board::empty(variant);
        let mut fields = [0i8; POINT_COUNT];
        for &(p, v) in placements {
            fields[p] = v;
        }
        board.set_fields(fields).unwrap();
        board
    }

    #[test]
    fn rejects_bad_dice() {
        let board = Board::new(Variant::Backgammon);
        assert_eq!(
            legal_move_sequences(&board, Color::White, &[]),
            Err(EngineError::DiceCountOutOfRange(0))
        );
        assert_eq!(
            legal_move_sequences(&board, Color::White, &[3, 3, 3, 3, 3]),
            Err(EngineError::DiceCountOutOfRange(5))
        );
        assert_eq!(
            legal_move_sequences(&board, Color::White, &[7, 1]),
            Err(EngineError::DieOutOfRange(7))
        );
    }

    #[test]
    fn opening_roll_uses_both_dice() {
        let board = Board::new(Variant::Backgammon);
        let sequences = legal_move_sequences(&board, Color::White, &[3, 1]).unwrap();
        assert!(!sequences.is_empty());
        assert!(sequences.iter().all(|s| s.len() == 2));
        // White makes its 5-point (index 19) with 16 -> 19 and 18 -> 19.
        let makes_point = sequences.iter().any(|s| {
            let moves: Vec<CheckerMove> = s.iter().map(Play::checker_move).collect();
            moves.contains(&CheckerMove::new(Spot::Point(16), Spot::Point(19)))
                && moves.contains(&CheckerMove::new(Spot::Point(18), Spot::Point(19)))
        });
        assert!(makes_point);
    }

    #[test]
    fn first_steps_are_deduplicated() {
        let board = Board::new(Variant::Backgammon);
        let moves = legal_moves(&board, Color::White, &[3, 1]).unwrap();
        let unique: HashSet<_> = moves.iter().collect();
        assert_eq!(unique.len(), moves.len());
        assert!(moves.contains(&CheckerMove::new(Spot::Point(0), Spot::Point(3))));
        assert!(moves.contains(&CheckerMove::new(Spot::Point(0), Spot::Point(1))));
        // Point 5 is black's.
        assert!(!moves.iter().any(|m| m.to == Spot::Point(5)));
    }

    #[test]
    fn pasch_plays_four_times() {
        let board = Board::new(Variant::Backgammon);
        let sequences = legal_move_sequences(&board, Color::White, &[2, 2, 2, 2]).unwrap();
        assert!(!sequences.is_empty());
        assert!(sequences.iter().all(|s| s.len() == 4 && s.iter().all(|p| p.die == 2)));
    }

    #[test]
    fn chained_single_checker_distance() {
        // One white checker alone: 5 then 3 reaches point 8.
        let board = board_with(Variant::Portes, &[(0, -1), (23, 15)]);
        let sequences = legal_move_sequences(&board, Color::White, &[5, 3]).unwrap();
        assert!(sequences.iter().any(|s| s.last().unwrap().to == Spot::Point(8)));
    }

    #[test]
    fn bar_restricts_origins() {
        let mut board = board_with(Variant::Backgammon, &[(0, -14), (23, 15)]);
        board.add_to_home_bar(Color::White, 1).unwrap();
        let moves = legal_moves(&board, Color::White, &[4, 6]).unwrap();
        assert!(moves.iter().all(|m| m.from == Spot::Bar(Color::White)));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn closed_board_has_no_plays() {
        // Black owns white's entry points 0..=5.
        let placements = [(0, 2), (1, 2), (2, 2), (3, 2), (4, 2), (5, 2), (23, 3), (12, -14)];
        let mut board = board_with(Variant::Tavla, &placements);
        board.add_to_home_bar(Color::White, 1).unwrap();
        let sequences = legal_move_sequences(&board, Color::White, &[6, 6, 6, 6]).unwrap();
        assert!(sequences.is_empty());
        assert!(legal_moves(&board, Color::White, &[1, 2]).unwrap().is_empty());
    }

    #[test]
    fn shorter_plays_are_discarded() {
        // A 5 first strands the back checker on 17; a 6 first lets the 5 bear off from 19.
        let mut board = board_with(Variant::Portes, &[(12, -1), (19, -1), (23, 2), (2, 13)]);
        board.bear_off_checker(Color::White, 13).unwrap();
        let sequences = legal_move_sequences(&board, Color::White, &[5, 6]).unwrap();
        assert_eq!(
            sequences,
            vec![vec![
                Play { from: Spot::Point(12), to: Spot::Point(18), die: 6 },
                Play { from: Spot::Point(19), to: Spot::Off(Color::White), die: 5 },
            ]]
        );
        assert_eq!(
            legal_moves(&board, Color::White, &[5, 6]).unwrap(),
            vec![CheckerMove::new(Spot::Point(12), Spot::Point(18))]
        );
    }

    #[test]
    fn generator_leaves_board_untouched() {
        let board = Board::new(Variant::Plakoto);
        let before = board.clone();
        legal_move_sequences(&board, Color::Black, &[6, 5]).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn random_sequence_is_legal_and_seeded() {
        let board = Board::new(Variant::Backgammon);
        let all = legal_move_sequences(&board, Color::Black, &[6, 4]).unwrap();
        let a = random_sequence(&board, Color::Black, &[6, 4], &mut StdRng::seed_from_u64(7)).unwrap();
        let b = random_sequence(&board, Color::Black, &[6, 4], &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert!(all.contains(&a.unwrap()));
    }
}
