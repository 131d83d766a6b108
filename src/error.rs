//! Engine error taxonomy.
//!
//! Every fallible rules operation returns `EngineError`. An illegal request
//! is a programming error at the caller's boundary: the predicate surface
//! (`can_move`, `can_bear_off`) exists to check first.

use thiserror::Error;

use crate::board::history::EventId;
use crate::board::spot::{Color, Spot};
use crate::board::variant::Variant;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("illegal move from {from} to {to}")]
    InvalidMove { from: Spot, to: Spot },

    #[error("cannot bear off from {from} with a {die}")]
    InvalidBearOff { from: Spot, die: u8 },

    #[error("die value {0} is outside 1..=6")]
    DieOutOfRange(u8),

    #[error("dice count {0} is out of range")]
    DiceCountOutOfRange(usize),

    #[error("a die needs at least 2 sides, got {0}")]
    DiceSidesOutOfRange(u8),

    #[error("point index {0} is out of range")]
    PointOutOfRange(usize),

    #[error("no legal play matches {from} to {to}")]
    NoMatchingMove { from: Spot, to: Spot },

    #[error("no used die with value {0} to restore")]
    DieNotUsed(u8),

    #[error("no unused die with value {0}")]
    DieUnavailable(u8),

    #[error("history is empty")]
    EmptyHistory,

    #[error("history has no event {0}")]
    UnknownEvent(EventId),

    #[error("{variant} has no {capability}")]
    CapabilityMissing {
        variant: Variant,
        capability: &'static str,
    },

    #[error("{color} accounts for {count} checkers, expected {expected}")]
    CheckerCountMismatch { color: Color, count: u32, expected: u8 },

    #[error("{0} may not offer the doubling cube")]
    CubeNotAvailable(Color),
}
