//! Text and JSON representations of positions, moves, and rolls.
//!
//! `notation` is the human-facing move and roll format used by history
//! display; `snapshot` is the serde-based position format.

pub mod notation;
pub mod snapshot;

pub use notation::{
    format_move, format_moves, format_roll, format_spot, parse_move, parse_moves, parse_roll,
    point_from_number, point_number, NotationError,
};
pub use snapshot::{from_json, load_board, to_json, Snapshot, SnapshotError};
