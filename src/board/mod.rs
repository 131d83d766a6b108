//! Board representation and single-move rules.
//!
//! Contains the position type, the variant table with its direction-aware
//! operators, optional capability facets, legality predicates, the move
//! executor, inversion, and the history log.

pub mod capability;
pub mod executor;
pub mod history;
pub mod invert;
pub mod legality;
pub mod spot;
pub mod state;
pub mod variant;

pub use capability::{DoublingCube, HomeBar, Pinning, MAX_CUBE_VALUE};
pub use executor::AppliedMove;
pub use history::{EventId, EventKind, History, HistoryEvent};
pub use invert::{invert_move_diagonal_horizontally, invert_move_horizontally, BoardMapping};
pub use spot::{CheckerMove, Color, Spot, ALL_COLORS, POINT_COUNT};
pub use state::Board;
pub use variant::{
    ParseVariantError, PointRange, Rules, Variant, ALL_VARIANTS, BLOCK_AMOUNT, CHECKERS_PER_COLOR,
    MAX_DIE,
};
