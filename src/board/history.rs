//! Roll and move history of a round.
//!
//! An ordered, append-only log. Entries can only leave through `pop_last`,
//! `try_remove_last`, or `remove` by id, which is what undo and redo need.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::protocol::notation::{format_moves, format_roll};

use super::spot::{CheckerMove, Color};
use super::variant::Variant;

/// Identity of a logged event, unique within one history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum EventKind {
    /// Rolled values in roll order; four entries for a pasch.
    Roll(Vec<u8>),
    /// One player action made of one or more elementary moves.
    Move(Vec<CheckerMove>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub id: EventId,
    pub color: Color,
    pub kind: EventKind,
}

impl HistoryEvent {
    /// Human-readable form: `"1 2 3 4"` for rolls, `"13/8 8/5"` for moves.
    ///
    /// Moves are numbered from the mover's side, so the variant is needed.
    pub fn display(&self, variant: Variant) -> EventDisplay<'_> {
        EventDisplay {
            event: self,
            variant,
        }
    }
}

/// Helper returned by [`HistoryEvent::display`].
pub struct EventDisplay<'a> {
    event: &'a HistoryEvent,
    variant: Variant,
}

impl fmt::Display for EventDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.event.kind {
            EventKind::Roll(values) => f.write_str(&format_roll(values)),
            EventKind::Move(moves) => {
                f.write_str(&format_moves(self.variant, self.event.color, moves))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    events: Vec<HistoryEvent>,
    next_id: u64,
}

impl History {
    /// Appends an event and returns its id.
    pub fn add(&mut self, color: Color, kind: EventKind) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        self.events.push(HistoryEvent { id, color, kind });
        id
    }

    pub fn add_roll(&mut self, color: Color, values: &[u8]) -> EventId {
        self.add(color, EventKind::Roll(values.to_vec()))
    }

    pub fn add_move(&mut self, color: Color, moves: &[CheckerMove]) -> EventId {
        self.add(color, EventKind::Move(moves.to_vec()))
    }

    /// Removes the event with the given id, wherever it sits.
    pub fn remove(&mut self, id: EventId) -> Result<HistoryEvent, EngineError> {
        let idx = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(EngineError::UnknownEvent(id))?;
        Ok(self.events.remove(idx))
    }

    pub fn try_remove_last(&mut self) -> Option<HistoryEvent> {
        self.events.pop()
    }

    /// Like `try_remove_last`, but an empty history is an error.
    pub fn pop_last(&mut self) -> Result<HistoryEvent, EngineError> {
        self.events.pop().ok_or(EngineError::EmptyHistory)
    }

    pub fn events(&self) -> &[HistoryEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&HistoryEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
