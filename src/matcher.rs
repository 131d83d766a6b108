//! Dice-to-move matching.
//!
//! A caller asks for a checker to go from one spot to another. The matcher
//! finds which die, or which chain of dice moving that one checker, the
//! request stands for by looking for it as a prefix of a legal sequence.
//!
//! Resolution order:
//! - the fewest dice wins, so a single die beats a combination reaching the
//!   same spot;
//! - among equally long prefixes a bear-off with the exact die beats one
//!   with an oversized die, then the smaller total wins.
//!
//! Requests are all-or-nothing: on failure no die changes state.

use tracing::debug;

use crate::board::{AppliedMove, Board, CheckerMove, Color, EventId, Variant};
use crate::dice::DiceRoll;
use crate::error::EngineError;
use crate::movegen::{legal_move_sequences, MoveSequence, Play};

/// A request that was matched and played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedRequest {
    pub plays: Vec<Play>,
    pub applied: Vec<AppliedMove>,
    /// History entry recording the action.
    pub event: EventId,
}

/// Longest prefix of `seq` that moves one checker in an unbroken chain
/// starting at `from`, and every prefix length along it ending at `to`.
fn chain_prefix_lengths(seq: &[Play], request: CheckerMove) -> impl Iterator<Item = usize> + '_ {
    let mut chained = 0;
    if seq.first().is_some_and(|p| p.from == request.from) {
        chained = 1;
        while chained < seq.len() && seq[chained].from == seq[chained - 1].to {
            chained += 1;
        }
    }
    (1..=chained).filter(move |&k| seq[k - 1].to == request.to)
}

/// Resolves a request against generated sequences without touching any state.
pub fn resolve_request(
    variant: Variant,
    color: Color,
    sequences: &[MoveSequence],
    request: CheckerMove,
) -> Option<Vec<Play>> {
    let distance = variant.recover_roll(request.from, request.to, color)?;

    sequences
        .iter()
        .flat_map(|seq| chain_prefix_lengths(seq, request).map(move |k| &seq[..k]))
        .min_by_key(|prefix| {
            let total: u32 = prefix.iter().map(|p| p.die as u32).sum();
            (prefix.len(), total != distance as u32, total)
        })
        .map(<[Play]>::to_vec)
}

/// Matches a request against the unused dice and marks the matching dice
/// used. The board is not changed.
pub fn consume_request(
    board: &Board,
    dice: &mut DiceRoll,
    color: Color,
    request: CheckerMove,
) -> Result<Vec<Play>, EngineError> {
    let no_match = EngineError::NoMatchingMove {
        from: request.from,
        to: request.to,
    };
    if dice.is_exhausted() {
        return Err(no_match);
    }

    let sequences = legal_move_sequences(board, color, &dice.unused())?;
    let plays = resolve_request(board.variant(), color, &sequences, request).ok_or(no_match)?;
    let used: Vec<u8> = plays.iter().map(|p| p.die).collect();
    dice.mark_all_used(&used)?;

    debug!(%color, from = %request.from, to = %request.to, ?used, "request matched");
    Ok(plays)
}

/// Matches a request, plays it on the board, and records it in history.
///
/// Either everything happens or nothing does.
pub fn play_request(
    board: &mut Board,
    dice: &mut DiceRoll,
    color: Color,
    request: CheckerMove,
) -> Result<PlayedRequest, EngineError> {
    let mut next_dice = dice.clone();
    let plays = consume_request(board, &mut next_dice, color, request)?;

    let mut applied = Vec::with_capacity(plays.len());
    for play in &plays {
        match board.move_checker(play.from, play.die, color) {
            Ok(a) => applied.push(a),
            Err(e) => {
                for a in applied.iter().rev() {
                    board.revert(a);
                }
                return Err(e);
            }
        }
    }

    let moves: Vec<CheckerMove> = plays.iter().map(Play::checker_move).collect();
    let event = board.history_mut().add_move(color, &moves);
    *dice = next_dice;
    Ok(PlayedRequest {
        plays,
        applied,
        event,
    })
}

/// Takes back a played request: board, dice, and history entry.
///
/// Either everything is taken back or nothing is.
pub fn revert_request(
    board: &mut Board,
    dice: &mut DiceRoll,
    played: &PlayedRequest,
) -> Result<(), EngineError> {
    let mut next = board.clone();
    let mut next_dice = dice.clone();
    for a in played.applied.iter().rev() {
        next.undo_move(a)?;
    }
    for play in &played.plays {
        next_dice.undo(play.die)?;
    }
    next.history_mut().remove(played.event)?;

    *board = next;
    *dice = next_dice;
    Ok(())
}
