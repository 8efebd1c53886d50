//! Level module - the authoritative match-three board engine
//!
//! A `Level` owns two grid layers (immutable tile mask, movable cookies) and
//! exposes the complete set of board state transitions: initial generation,
//! legal-swap enumeration, swap application, match removal with combo
//! scoring, gravity compaction, and refill. Every public operation is a
//! synchronous, atomic transition; callers sequence cascade steps themselves.
//!
//! Returned cookies and chains are by-value copies for rendering layers -
//! the grid inside the level is the single source of truth.

use std::collections::HashSet;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::chain::Chain;
use crate::cookie::{Cookie, CookieId, Tile};
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::scoring::chain_score;
use crate::swap::Swap;
use crunch_types::{ChainKind, CookieKind, MIN_CHAIN_LENGTH, NUM_COLUMNS, NUM_ROWS};

/// Cookies of one column, ordered the way the column was processed
pub type CookieColumn = ArrayVec<Cookie, NUM_ROWS>;

/// Decoded level description supplied by the external level source.
///
/// The tile mask is row-major and authored top-down; the loader inverts it so
/// internal row 0 is the visual bottom. The engine owns no file format -
/// whatever reads the level file hands the decoded value in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    /// One entry per cell, 1 = tile present
    pub tiles: Vec<Vec<u8>>,
    pub target_score: u32,
    pub moves: u32,
}

/// The match-three board engine
#[derive(Debug, Clone)]
pub struct Level {
    tiles: Grid<Tile>,
    cookies: Grid<Cookie>,
    possible_swaps: HashSet<Swap>,
    target_score: u32,
    maximum_moves: u32,
    combo_multiplier: u32,
    next_cookie_id: u32,
    tile_count: usize,
    rng: SimpleRng,
}

impl Level {
    /// Build a level from a decoded level description
    ///
    /// External rows are authored top-down; internally row 0 is the bottom,
    /// so the mask is vertically inverted on the way in. Panics if the mask
    /// is larger than the 9x9 board.
    pub fn new(data: &LevelData, seed: u32) -> Self {
        let mut tiles = Grid::new();
        assert!(
            data.tiles.len() <= NUM_ROWS,
            "tile mask has {} rows, board has {}",
            data.tiles.len(),
            NUM_ROWS
        );
        for (external_row, row_values) in data.tiles.iter().enumerate() {
            assert!(
                row_values.len() <= NUM_COLUMNS,
                "tile mask row has {} columns, board has {}",
                row_values.len(),
                NUM_COLUMNS
            );
            let row = NUM_ROWS - 1 - external_row;
            for (column, &value) in row_values.iter().enumerate() {
                if value == 1 {
                    tiles.set(column, row, Tile);
                }
            }
        }

        let tile_count = tiles.count();
        Self {
            tiles,
            cookies: Grid::new(),
            possible_swaps: HashSet::new(),
            target_score: data.target_score,
            maximum_moves: data.moves,
            combo_multiplier: 1,
            next_cookie_id: 0,
            tile_count,
            rng: SimpleRng::new(seed),
        }
    }

    /// An empty, unplayable level (no tiles, no target, no moves)
    pub fn empty(seed: u32) -> Self {
        Self {
            tiles: Grid::new(),
            cookies: Grid::new(),
            possible_swaps: HashSet::new(),
            target_score: 0,
            maximum_moves: 0,
            combo_multiplier: 1,
            next_cookie_id: 0,
            tile_count: 0,
            rng: SimpleRng::new(seed),
        }
    }

    /// Build a level from the outcome of a level-source read
    ///
    /// A failed read degrades to an empty level rather than failing the
    /// process; callers detect the unplayable board via [`Level::is_playable`].
    pub fn from_source(source: anyhow::Result<LevelData>, seed: u32) -> Self {
        match source {
            Ok(data) => Self::new(&data, seed),
            Err(_) => Self::empty(seed),
        }
    }

    /// Build a level with an exact board, for deterministic setups
    ///
    /// `rows` are given top-down, one character per column: a kind code
    /// (see [`CookieKind::from_char`]) places a tile holding that cookie,
    /// `'.'` places an empty tile, and `' '` or `'_'` leaves the cell
    /// untiled. Rows may be shorter than the board; missing cells are
    /// untiled. The legal-swap set is computed before returning.
    ///
    /// Panics on an unknown character or an oversized layout.
    pub fn from_layout(rows: &[&str], target_score: u32, moves: u32, seed: u32) -> Self {
        assert!(
            rows.len() <= NUM_ROWS,
            "layout has {} rows, board has {}",
            rows.len(),
            NUM_ROWS
        );
        let mut level = Self::empty(seed);
        level.target_score = target_score;
        level.maximum_moves = moves;

        for (i, line) in rows.iter().enumerate() {
            let row = rows.len() - 1 - i;
            for (column, c) in line.chars().enumerate() {
                assert!(
                    column < NUM_COLUMNS,
                    "layout row has more than {NUM_COLUMNS} columns"
                );
                match c {
                    ' ' | '_' => {}
                    '.' => {
                        level.tiles.set(column, row, Tile);
                    }
                    _ => {
                        let kind = CookieKind::from_char(c)
                            .unwrap_or_else(|| panic!("unknown layout character {c:?}"));
                        level.tiles.set(column, row, Tile);
                        level.spawn_cookie(column, row, kind);
                    }
                }
            }
        }

        level.tile_count = level.tiles.count();
        level.detect_possible_swaps();
        level
    }

    /// Tile at (column, row), if the cell is playable
    ///
    /// Panics on out-of-range coordinates.
    pub fn tile_at(&self, column: usize, row: usize) -> Option<Tile> {
        self.tiles.at(column, row)
    }

    /// Cookie currently occupying (column, row), if any
    ///
    /// Panics on out-of-range coordinates.
    pub fn cookie_at(&self, column: usize, row: usize) -> Option<Cookie> {
        self.cookies.at(column, row)
    }

    /// Score the player must reach to complete the level
    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    /// Move budget for the level
    pub fn maximum_moves(&self) -> u32 {
        self.maximum_moves
    }

    /// Number of playable cells
    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Multiplier applied to the next scored chain
    pub fn combo_multiplier(&self) -> u32 {
        self.combo_multiplier
    }

    /// Current legal-swap set
    pub fn possible_swaps(&self) -> &HashSet<Swap> {
        &self.possible_swaps
    }

    /// Whether the level can be played at all
    ///
    /// False for the degraded empty level produced when the level source
    /// fails to load; callers should surface that as a configuration error.
    pub fn is_playable(&self) -> bool {
        self.tile_count > 0 && self.target_score > 0
    }

    /// Generate a fresh board and return the new cookies for rendering
    ///
    /// Boards are regenerated until at least one legal swap exists, so the
    /// player is never dealt a dead board. A level without tiles returns an
    /// empty set instead of retrying forever.
    pub fn shuffle(&mut self) -> Vec<Cookie> {
        if self.tile_count == 0 {
            self.possible_swaps.clear();
            return Vec::new();
        }

        loop {
            let cookies = self.create_initial_cookies();
            self.detect_possible_swaps();
            if !self.possible_swaps.is_empty() {
                return cookies;
            }
        }
    }

    /// Fill every tiled cell with a random cookie, avoiding pre-formed runs
    ///
    /// Cells are filled in raster order, so only the two neighbors already
    /// placed to the left and below can complete a run; kinds are re-rolled
    /// until neither would.
    fn create_initial_cookies(&mut self) -> Vec<Cookie> {
        self.cookies.clear();
        let mut spawned = Vec::with_capacity(self.tile_count);

        for row in 0..NUM_ROWS {
            for column in 0..NUM_COLUMNS {
                if self.tiles.at(column, row).is_none() {
                    continue;
                }

                let kind = loop {
                    let kind = self.rng.next_kind();
                    if !self.completes_run(column, row, kind) {
                        break kind;
                    }
                };
                spawned.push(self.spawn_cookie(column, row, kind));
            }
        }
        spawned
    }

    /// Would placing `kind` at (column, row) complete a run of three with
    /// the already-placed neighbors to its left or below?
    fn completes_run(&self, column: usize, row: usize, kind: CookieKind) -> bool {
        (column >= 2
            && self.kind_at(column - 1, row) == Some(kind)
            && self.kind_at(column - 2, row) == Some(kind))
            || (row >= 2
                && self.kind_at(column, row - 1) == Some(kind)
                && self.kind_at(column, row - 2) == Some(kind))
    }

    /// Create a cookie with the next identity and place it on the grid
    fn spawn_cookie(&mut self, column: usize, row: usize, kind: CookieKind) -> Cookie {
        let cookie = Cookie::new(CookieId(self.next_cookie_id), kind, column, row);
        self.next_cookie_id += 1;
        let previous = self.cookies.set(column, row, cookie);
        assert!(previous.is_none(), "cell ({column}, {row}) already occupied");
        cookie
    }

    fn kind_at(&self, column: usize, row: usize) -> Option<CookieKind> {
        self.cookies.at(column, row).map(|cookie| cookie.kind)
    }

    /// Is the cookie at (column, row) part of a run of three or longer?
    fn has_chain_at(&self, column: usize, row: usize) -> bool {
        let Some(kind) = self.kind_at(column, row) else {
            return false;
        };

        // Horizontal: extend left, then right
        let mut length = 1;
        let mut i = column;
        while i > 0 && self.kind_at(i - 1, row) == Some(kind) {
            i -= 1;
            length += 1;
        }
        let mut i = column + 1;
        while i < NUM_COLUMNS && self.kind_at(i, row) == Some(kind) {
            i += 1;
            length += 1;
        }
        if length >= MIN_CHAIN_LENGTH {
            return true;
        }

        // Vertical: extend down, then up
        let mut length = 1;
        let mut i = row;
        while i > 0 && self.kind_at(column, i - 1) == Some(kind) {
            i -= 1;
            length += 1;
        }
        let mut i = row + 1;
        while i < NUM_ROWS && self.kind_at(column, i) == Some(kind) {
            i += 1;
            length += 1;
        }
        length >= MIN_CHAIN_LENGTH
    }

    /// Recompute the legal-swap set from scratch
    ///
    /// Every cookie is tentatively exchanged with its right neighbor and
    /// with the neighbor above; if either cell then participates in a run
    /// of three, the swap is recorded. The new set fully replaces the old
    /// one and is the sole authority for [`Level::is_possible_swap`].
    pub fn detect_possible_swaps(&mut self) {
        let mut set = HashSet::new();

        for row in 0..NUM_ROWS {
            for column in 0..NUM_COLUMNS {
                let Some(cookie) = self.cookies.at(column, row) else {
                    continue;
                };

                // Try swapping with the cookie on the right
                if column < NUM_COLUMNS - 1 {
                    if let Some(other) = self.cookies.at(column + 1, row) {
                        self.cookies.swap_cells((column, row), (column + 1, row));
                        if self.has_chain_at(column + 1, row) || self.has_chain_at(column, row) {
                            set.insert(Swap::new(cookie, other));
                        }
                        self.cookies.swap_cells((column, row), (column + 1, row));
                    }
                }

                // Try swapping with the cookie above
                if row < NUM_ROWS - 1 {
                    if let Some(other) = self.cookies.at(column, row + 1) {
                        self.cookies.swap_cells((column, row), (column, row + 1));
                        if self.has_chain_at(column, row + 1) || self.has_chain_at(column, row) {
                            set.insert(Swap::new(cookie, other));
                        }
                        self.cookies.swap_cells((column, row), (column, row + 1));
                    }
                }
            }
        }

        self.possible_swaps = set;
    }

    /// Membership test against the current legal-swap set
    pub fn is_possible_swap(&self, swap: &Swap) -> bool {
        self.possible_swaps.contains(swap)
    }

    /// Exchange the two cookies named by the swap
    ///
    /// No legality check happens here - callers gate on
    /// [`Level::is_possible_swap`] first. Applying the same swap twice in a
    /// row restores both cookies to their original cells. Panics if either
    /// named cell is empty, which indicates a stale swap.
    pub fn perform_swap(&mut self, swap: &Swap) {
        let (column_a, row_a) = (swap.a().column, swap.a().row);
        let (column_b, row_b) = (swap.b().column, swap.b().row);

        let mut a = self
            .cookies
            .take(column_a, row_a)
            .unwrap_or_else(|| panic!("swap names an empty cell ({column_a}, {row_a})"));
        let mut b = self
            .cookies
            .take(column_b, row_b)
            .unwrap_or_else(|| panic!("swap names an empty cell ({column_b}, {row_b})"));

        a.column = column_b;
        a.row = row_b;
        b.column = column_a;
        b.row = row_a;
        self.cookies.set(column_b, row_b, a);
        self.cookies.set(column_a, row_a, b);
    }

    /// Scan every row left to right for runs of three or longer
    fn detect_horizontal_matches(&self) -> Vec<Chain> {
        let mut chains = Vec::new();

        for row in 0..NUM_ROWS {
            let mut column = 0;
            // The last two columns can never begin a new chain
            while column + 2 < NUM_COLUMNS {
                let Some(kind) = self.kind_at(column, row) else {
                    column += 1;
                    continue;
                };

                if self.kind_at(column + 1, row) == Some(kind)
                    && self.kind_at(column + 2, row) == Some(kind)
                {
                    let mut chain = Chain::new(ChainKind::Horizontal);
                    while column < NUM_COLUMNS {
                        match self.cookies.at(column, row) {
                            Some(next) if next.kind == kind => {
                                chain.add(next);
                                column += 1;
                            }
                            _ => break,
                        }
                    }
                    chains.push(chain);
                    // Resume right after the run's end; runs never overlap
                    continue;
                }

                column += 1;
            }
        }
        chains
    }

    /// Scan every column bottom to top for runs of three or longer
    fn detect_vertical_matches(&self) -> Vec<Chain> {
        let mut chains = Vec::new();

        for column in 0..NUM_COLUMNS {
            let mut row = 0;
            // The top two rows can never begin a new chain
            while row + 2 < NUM_ROWS {
                let Some(kind) = self.kind_at(column, row) else {
                    row += 1;
                    continue;
                };

                if self.kind_at(column, row + 1) == Some(kind)
                    && self.kind_at(column, row + 2) == Some(kind)
                {
                    let mut chain = Chain::new(ChainKind::Vertical);
                    while row < NUM_ROWS {
                        match self.cookies.at(column, row) {
                            Some(next) if next.kind == kind => {
                                chain.add(next);
                                row += 1;
                            }
                            _ => break,
                        }
                    }
                    chains.push(chain);
                    continue;
                }

                row += 1;
            }
        }
        chains
    }

    /// Remove every matched run and score it
    ///
    /// Returns horizontal chains in scan order followed by vertical chains
    /// in scan order - a fixed order, so combo multiplier assignment is
    /// reproducible. A cookie sitting at a junction of both axes belongs to
    /// two chains but is cleared from the grid only once.
    pub fn remove_matches(&mut self) -> Vec<Chain> {
        let mut horizontal = self.detect_horizontal_matches();
        let mut vertical = self.detect_vertical_matches();

        self.remove_cookies(&horizontal);
        self.remove_cookies(&vertical);

        self.calculate_scores(&mut horizontal);
        self.calculate_scores(&mut vertical);

        let mut chains = horizontal;
        chains.append(&mut vertical);
        chains
    }

    fn remove_cookies(&mut self, chains: &[Chain]) {
        for chain in chains {
            for cookie in chain.cookies() {
                // Junction cells were already cleared by the other axis
                self.cookies.take(cookie.column, cookie.row);
            }
        }
    }

    fn calculate_scores(&mut self, chains: &mut [Chain]) {
        for chain in chains {
            chain.score = chain_score(chain.len(), self.combo_multiplier);
            self.combo_multiplier += 1;
        }
    }

    /// Reset the combo multiplier for a new player turn
    pub fn reset_combo_multiplier(&mut self) {
        self.combo_multiplier = 1;
    }

    /// Drop cookies down to fill the holes left by removed matches
    ///
    /// Works column by column, bottom to top: each empty tiled cell pulls
    /// down the nearest cookie above it. Returns, per column that changed,
    /// the moved cookies in hole-encounter order (bottom to top) - the order
    /// animation layers use to sequence fall distances. Unchanged columns
    /// are omitted.
    pub fn fill_holes(&mut self) -> Vec<CookieColumn> {
        let mut columns = Vec::new();

        for column in 0..NUM_COLUMNS {
            let mut moved = CookieColumn::new();

            for row in 0..NUM_ROWS {
                if self.tiles.at(column, row).is_none() || self.cookies.at(column, row).is_some() {
                    continue;
                }

                // Scan upward for the nearest cookie and pull it down
                for lookup in (row + 1)..NUM_ROWS {
                    if let Some(mut cookie) = self.cookies.take(column, lookup) {
                        cookie.row = row;
                        self.cookies.set(column, row, cookie);
                        moved.push(cookie);
                        break;
                    }
                }
            }

            if !moved.is_empty() {
                columns.push(moved);
            }
        }
        columns
    }

    /// Create new cookies for the cells gravity could not fill
    ///
    /// Works column by column from the top down, stopping at the first
    /// occupied cell. Each new cookie's kind differs from the immediately
    /// previously created one in this pass - a light anti-repetition
    /// heuristic, deliberately weaker than the initial-generation
    /// constraint. Returns, per affected column, the new cookies from top
    /// to bottom; untouched columns are omitted.
    pub fn top_up_cookies(&mut self) -> Vec<CookieColumn> {
        let mut columns = Vec::new();
        let mut previous: Option<CookieKind> = None;

        for column in 0..NUM_COLUMNS {
            let mut spawned = CookieColumn::new();

            for row in (0..NUM_ROWS).rev() {
                if self.cookies.at(column, row).is_some() {
                    break;
                }
                if self.tiles.at(column, row).is_none() {
                    continue;
                }

                let kind = loop {
                    let kind = self.rng.next_kind();
                    if Some(kind) != previous {
                        break kind;
                    }
                };
                previous = Some(kind);
                spawned.push(self.spawn_cookie(column, row, kind));
            }

            if !spawned.is_empty() {
                columns.push(spawned);
            }
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn full_mask(target_score: u32, moves: u32) -> LevelData {
        LevelData {
            tiles: vec![vec![1; NUM_COLUMNS]; NUM_ROWS],
            target_score,
            moves,
        }
    }

    #[test]
    fn test_new_copies_level_data() {
        let level = Level::new(&full_mask(1000, 15), 1);
        assert_eq!(level.target_score(), 1000);
        assert_eq!(level.maximum_moves(), 15);
        assert_eq!(level.tile_count(), NUM_COLUMNS * NUM_ROWS);
        assert!(level.is_playable());
    }

    #[test]
    fn test_new_inverts_external_row_order() {
        // A single tile in the first (topmost) external row
        let mut tiles = vec![vec![0; NUM_COLUMNS]; NUM_ROWS];
        tiles[0][3] = 1;
        let data = LevelData {
            tiles,
            target_score: 100,
            moves: 5,
        };

        let level = Level::new(&data, 1);
        assert!(level.tile_at(3, NUM_ROWS - 1).is_some());
        assert!(level.tile_at(3, 0).is_none());
        assert_eq!(level.tile_count(), 1);
    }

    #[test]
    fn test_from_source_degrades_to_empty() {
        let level = Level::from_source(Err(anyhow!("level file missing")), 1);
        assert_eq!(level.tile_count(), 0);
        assert_eq!(level.target_score(), 0);
        assert!(!level.is_playable());
    }

    #[test]
    fn test_empty_level_shuffle_returns_nothing() {
        let mut level = Level::empty(1);
        assert!(level.shuffle().is_empty());
        assert!(level.possible_swaps().is_empty());
    }

    #[test]
    fn test_shuffle_fills_every_tiled_cell() {
        let mut level = Level::new(&full_mask(1000, 15), 42);
        let cookies = level.shuffle();
        assert_eq!(cookies.len(), NUM_COLUMNS * NUM_ROWS);

        for row in 0..NUM_ROWS {
            for column in 0..NUM_COLUMNS {
                let cookie = level.cookie_at(column, row).unwrap();
                assert_eq!(cookie.column, column);
                assert_eq!(cookie.row, row);
            }
        }
    }

    #[test]
    fn test_shuffle_is_deterministic_per_seed() {
        let mut a = Level::new(&full_mask(1000, 15), 7);
        let mut b = Level::new(&full_mask(1000, 15), 7);
        let kinds = |cookies: &[Cookie]| cookies.iter().map(|c| c.kind).collect::<Vec<_>>();
        assert_eq!(kinds(&a.shuffle()), kinds(&b.shuffle()));
    }

    #[test]
    fn test_from_layout_places_exact_board() {
        let level = Level::from_layout(
            &[
                "CUD", //
                "UDC", //
                "DCU", //
            ],
            100,
            5,
            1,
        );

        assert_eq!(level.tile_count(), 9);
        assert_eq!(level.cookie_at(0, 2).unwrap().kind, CookieKind::Croissant);
        assert_eq!(level.cookie_at(2, 0).unwrap().kind, CookieKind::Cupcake);
        assert!(level.tile_at(5, 5).is_none());
    }

    #[test]
    fn test_from_layout_supports_gaps_and_empty_tiles() {
        let level = Level::from_layout(
            &[
                "C_.", //
                "CUD", //
            ],
            100,
            5,
            1,
        );

        assert!(level.tile_at(0, 1).is_some());
        assert!(level.tile_at(1, 1).is_none());
        assert!(level.tile_at(2, 1).is_some());
        assert!(level.cookie_at(2, 1).is_none());
        assert_eq!(level.tile_count(), 5);
    }

    #[test]
    fn test_perform_swap_exchanges_positions() {
        let mut level = Level::from_layout(
            &[
                "CU", //
                "UC", //
            ],
            100,
            5,
            1,
        );

        let a = level.cookie_at(0, 0).unwrap();
        let b = level.cookie_at(1, 0).unwrap();
        level.perform_swap(&Swap::new(a, b));

        let moved_a = level.cookie_at(1, 0).unwrap();
        let moved_b = level.cookie_at(0, 0).unwrap();
        assert_eq!(moved_a.id, a.id);
        assert_eq!(moved_a.column, 1);
        assert_eq!(moved_a.row, 0);
        assert_eq!(moved_b.id, b.id);
        assert_eq!(moved_b.column, 0);
    }

    #[test]
    fn test_combo_multiplier_reset() {
        let mut level = Level::from_layout(
            &[
                "UDO", //
                "CCC", //
            ],
            100,
            5,
            1,
        );

        let chains = level.remove_matches();
        assert_eq!(chains.len(), 1);
        assert_eq!(level.combo_multiplier(), 2);

        level.reset_combo_multiplier();
        assert_eq!(level.combo_multiplier(), 1);
    }

    #[test]
    fn test_level_data_json_shape() {
        let json = r#"{
            "tiles": [[1, 1], [0, 1]],
            "targetScore": 1000,
            "moves": 20
        }"#;
        let data: LevelData = serde_json::from_str(json).unwrap();
        assert_eq!(data.target_score, 1000);
        assert_eq!(data.moves, 20);
        assert_eq!(data.tiles[1], vec![0, 1]);
    }
}
