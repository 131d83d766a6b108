//! JSON position snapshots.
//!
//! A snapshot carries everything needed to rebuild a position: occupancy,
//! trays, and whichever facets the variant has. History is not part of it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Color, DoublingCube, Pinning, Variant, POINT_COUNT};
use crate::error::EngineError;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid position: {0}")]
    Engine(#[from] EngineError),
}

/// Serializable position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub variant: Variant,
    pub fields: [i8; POINT_COUNT],
    #[serde(default)]
    pub bear_off_white: u8,
    #[serde(default)]
    pub bear_off_black: u8,
    #[serde(default)]
    pub home_bar_white: u8,
    #[serde(default)]
    pub home_bar_black: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_fields: Option<[i8; POINT_COUNT]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cube: Option<DoublingCube>,
}

impl Board {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            variant: self.variant,
            fields: self.fields,
            bear_off_white: self.bear_off_count(Color::White),
            bear_off_black: self.bear_off_count(Color::Black),
            home_bar_white: self.home_bar_count(Color::White),
            home_bar_black: self.home_bar_count(Color::Black),
            pinned_fields: self.pinned_fields().copied(),
            cube: self.cube,
        }
    }

    /// Rebuilds a board from a snapshot with an empty history.
    ///
    /// Facets the variant lacks must be absent (or zero for the bar), and
    /// each color must account for all of its checkers.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Board, EngineError> {
        let variant = snapshot.variant;
        let missing = |capability| EngineError::CapabilityMissing {
            variant,
            capability,
        };

        let mut board = Board::empty(variant);
        board.fields = snapshot.fields;
        board.bear_off = [snapshot.bear_off_white, snapshot.bear_off_black];

        for (color, count) in [
            (Color::White, snapshot.home_bar_white),
            (Color::Black, snapshot.home_bar_black),
        ] {
            if count == 0 {
                continue;
            }
            board.home_bar.as_mut().ok_or(missing("home bar"))?.add(color, count);
        }

        if let Some(pinned) = snapshot.pinned_fields {
            if board.pinning.is_none() {
                return Err(missing("pinning"));
            }
            board.pinning = Some(Pinning::from_fields(pinned));
            board.check_pins()?;
        }

        if let Some(cube) = snapshot.cube {
            if board.cube.is_none() {
                return Err(missing("doubling cube"));
            }
            board.cube = Some(cube);
        }

        board.validate()?;
        Ok(board)
    }
}

pub fn to_json(board: &Board) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&board.snapshot())?)
}

pub fn from_json(json: &str) -> Result<Snapshot, SnapshotError> {
    Ok(serde_json::from_str(json)?)
}

/// Parses and validates a JSON snapshot in one step.
pub fn load_board(json: &str) -> Result<Board, SnapshotError> {
    let snapshot = from_json(json)?;
    Ok(Board::from_snapshot(&snapshot)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ALL_VARIANTS;

    #[test]
    fn openings_survive_json() {
        for variant in ALL_VARIANTS {
            let board = Board::new(variant);
            let json = to_json(&board).unwrap();
            let loaded = load_board(&json).unwrap();
            assert_eq!(loaded, board, "{} did not survive", variant);
        }
    }

    #[test]
    fn facets_are_carried() {
        let mut board = Board::new(Variant::Plakoto);
        board.fields[0] = -14;
        board.fields[5] = 1;
        board.fields[23] = 14;
        board.set_pin(5, Color::White).unwrap();
        let snapshot = board.snapshot();
        assert_eq!(snapshot.pinned_fields.map(|p| p[5]), Some(-1));
        assert_eq!(Board::from_snapshot(&snapshot).unwrap(), board);

        let mut board = Board::new(Variant::Backgammon);
        board.double(Color::Black).unwrap();
        let loaded = load_board(&to_json(&board).unwrap()).unwrap();
        assert_eq!(loaded.cube().map(|c| c.owner()), Some(Some(Color::White)));
    }

    #[test]
    fn rejects_facets_the_variant_lacks() {
        let mut snapshot = Board::new(Variant::Fevga).snapshot();
        snapshot.cube = Some(DoublingCube::default());
        assert_eq!(
            Board::from_snapshot(&snapshot),
            Err(EngineError::CapabilityMissing {
                variant: Variant::Fevga,
                capability: "doubling cube",
            })
        );

        let mut snapshot = Board::new(Variant::Plakoto).snapshot();
        snapshot.fields[0] += 1;
        snapshot.home_bar_white = 1;
        assert!(matches!(
            Board::from_snapshot(&snapshot),
            Err(EngineError::CapabilityMissing { .. })
        ));
    }

    #[test]
    fn rejects_unbalanced_positions() {
        let mut snapshot = Board::new(Variant::Tavla).snapshot();
        snapshot.bear_off_black = 1;
        assert!(matches!(
            Board::from_snapshot(&snapshot),
            Err(EngineError::CheckerCountMismatch { color: Color::Black, .. })
        ));
    }

    #[test]
    fn missing_optional_keys_default() {
        let mut fields = Board::new(Variant::Portes).fields().to_vec();
        fields[0] += 1;
        let json = format!(
            r#"{{"variant":"portes","fields":{:?},"home_bar_white":1}}"#,
            fields
        );
        let board = load_board(&json).unwrap();
        assert_eq!(board.home_bar_count(Color::White), 1);
        assert!(matches!(load_board("{"), Err(SnapshotError::Json(_))));
    }
}
