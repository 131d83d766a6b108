//! Board inversion: the same position seen from the other side.
//!
//! Two index mappings exist. Mirrored variants flip the board horizontally
//! (`i -> 23 - i`); Fevga, whose colors start on diagonally opposite
//! quadrants, rotates it by half a turn (`i -> (i + 12) mod 24`). Both are
//! involutions, so inverting twice always returns the original.

use serde::{Deserialize, Serialize};

use super::capability::Pinning;
use super::history::History;
use super::spot::{CheckerMove, Spot, POINT_COUNT};
use super::state::Board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardMapping {
    /// Linear-horizontal: `i -> 23 - i`.
    Horizontal,
    /// Diagonal-horizontal: `i -> (i + 12) mod 24`.
    DiagonalHorizontal,
}

impl BoardMapping {
    pub fn map_point(self, point: u8) -> u8 {
        let n = POINT_COUNT as u8;
        match self {
            BoardMapping::Horizontal => n - 1 - point,
            BoardMapping::DiagonalHorizontal => (point + n / 2) % n,
        }
    }

    /// Maps a spot; sentinels change color.
    pub fn map_spot(self, spot: Spot) -> Spot {
        match spot {
            Spot::Point(p) if (p as usize) < POINT_COUNT => Spot::Point(self.map_point(p)),
            Spot::Point(p) => Spot::Point(p),
            Spot::Bar(c) => Spot::Bar(c.opponent()),
            Spot::Off(c) => Spot::Off(c.opponent()),
        }
    }

    pub fn map_move(self, mv: CheckerMove) -> CheckerMove {
        CheckerMove::new(self.map_spot(mv.from), self.map_spot(mv.to))
    }

    fn map_fields(self, fields: &[i8; POINT_COUNT]) -> [i8; POINT_COUNT] {
        let mut out = [0i8; POINT_COUNT];
        for (i, &v) in fields.iter().enumerate() {
            out[self.map_point(i as u8) as usize] = -v;
        }
        out
    }
}

pub fn invert_move_horizontally(mv: CheckerMove) -> CheckerMove {
    BoardMapping::Horizontal.map_move(mv)
}

pub fn invert_move_diagonal_horizontally(mv: CheckerMove) -> CheckerMove {
    BoardMapping::DiagonalHorizontal.map_move(mv)
}

impl Board {
    /// The position from the opponent's point of view, using the variant's
    /// own mapping. The result is an independent board with an empty history.
    pub fn invert(&self) -> Board {
        self.invert_with(self.variant.mapping())
    }

    /// Inverts with an explicit mapping.
    pub fn invert_with(&self, mapping: BoardMapping) -> Board {
        Board {
            variant: self.variant,
            fields: mapping.map_fields(&self.fields),
            bear_off: [self.bear_off[1], self.bear_off[0]],
            home_bar: self.home_bar.map(|bar| bar.swapped()),
            pinning: self
                .pinning
                .as_ref()
                .map(|p| Pinning::from_fields(mapping.map_fields(p.fields()))),
            cube: self.cube.map(|cube| cube.flipped()),
            history: History::default(),
        }
    }
}
