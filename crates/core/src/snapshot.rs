//! Snapshot module - serializable observation of level state
//!
//! Observation tooling and presentation layers need a stable, copyable view
//! of the board without reaching into the engine. A snapshot encodes every
//! cell as a single byte (no tile / empty tile / cookie kind) plus the level
//! bookkeeping needed to render progress.

use serde::{Deserialize, Serialize};

use crate::level::Level;
use crunch_types::{CookieKind, NUM_COLUMNS, NUM_ROWS};

/// Cell byte for a cell outside the playable mask
pub const CELL_NO_TILE: u8 = 0;

/// Cell byte for a tiled cell holding no cookie
pub const CELL_EMPTY_TILE: u8 = 1;

/// Cell byte for a cookie of the given kind
pub fn cell_code(kind: CookieKind) -> u8 {
    2 + kind.index() as u8
}

/// Decode a cell byte back to a cookie kind, if it encodes one
pub fn kind_from_code(code: u8) -> Option<CookieKind> {
    match code {
        CELL_NO_TILE | CELL_EMPTY_TILE => None,
        _ => CookieKind::ALL.get(code as usize - 2).copied(),
    }
}

/// Copyable, serializable view of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    /// One byte per cell, row-major with row 0 at the visual bottom
    pub board: [[u8; NUM_COLUMNS]; NUM_ROWS],
    pub target_score: u32,
    pub maximum_moves: u32,
    pub combo_multiplier: u32,
    pub possible_swap_count: u32,
    pub tile_count: u32,
}

impl LevelSnapshot {
    /// Capture the current state of a level
    pub fn capture(level: &Level) -> Self {
        let mut board = [[CELL_NO_TILE; NUM_COLUMNS]; NUM_ROWS];
        for row in 0..NUM_ROWS {
            for column in 0..NUM_COLUMNS {
                board[row][column] = match level.cookie_at(column, row) {
                    Some(cookie) => cell_code(cookie.kind),
                    None if level.tile_at(column, row).is_some() => CELL_EMPTY_TILE,
                    None => CELL_NO_TILE,
                };
            }
        }

        Self {
            board,
            target_score: level.target_score(),
            maximum_moves: level.maximum_moves(),
            combo_multiplier: level.combo_multiplier(),
            possible_swap_count: level.possible_swaps().len() as u32,
            tile_count: level.tile_count() as u32,
        }
    }

    /// Whether the captured level was playable at all
    pub fn playable(&self) -> bool {
        self.tile_count > 0 && self.target_score > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    #[test]
    fn test_cell_code_roundtrip() {
        for kind in CookieKind::ALL {
            assert_eq!(kind_from_code(cell_code(kind)), Some(kind));
        }
        assert_eq!(kind_from_code(CELL_NO_TILE), None);
        assert_eq!(kind_from_code(CELL_EMPTY_TILE), None);
        assert_eq!(kind_from_code(200), None);
    }

    #[test]
    fn test_capture_encodes_all_cell_states() {
        let level = Level::from_layout(
            &[
                "C_.", //
                "CUD", //
            ],
            100,
            5,
            1,
        );
        let snapshot = LevelSnapshot::capture(&level);

        assert_eq!(snapshot.board[0][0], cell_code(CookieKind::Croissant));
        assert_eq!(snapshot.board[0][1], cell_code(CookieKind::Cupcake));
        assert_eq!(snapshot.board[1][1], CELL_NO_TILE);
        assert_eq!(snapshot.board[1][2], CELL_EMPTY_TILE);
        assert_eq!(snapshot.board[8][8], CELL_NO_TILE);
        assert_eq!(snapshot.tile_count, 5);
        assert!(snapshot.playable());
    }

    #[test]
    fn test_empty_level_snapshot_is_unplayable() {
        let snapshot = LevelSnapshot::capture(&Level::empty(1));
        assert!(!snapshot.playable());
        assert_eq!(snapshot.board, [[CELL_NO_TILE; NUM_COLUMNS]; NUM_ROWS]);
    }
}
