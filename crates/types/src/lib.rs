//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (board logic, turn orchestration, observation tooling).
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Columns**: 9 (indexed 0-8, left to right)
//! - **Rows**: 9 (indexed 0-8, bottom to top)
//!
//! Row 0 is the visual bottom of the board. External level descriptions are
//! authored top-down and get row-inverted by the level loader.
//!
//! # Scoring Constants
//!
//! A chain of length `n` is worth `CHAIN_BASE_SCORE * (n - 2)` before the
//! combo multiplier is applied, so a 3-chain is 60 points, a 4-chain 120,
//! a 5-chain 180, and so on.
//!
//! # Examples
//!
//! ```
//! use crunch_types::{ChainKind, CookieKind, NUM_COLUMNS, NUM_ROWS};
//!
//! // Parse a cookie kind from its name (case-insensitive)
//! let kind = CookieKind::from_str("croissant").unwrap();
//! assert_eq!(kind, CookieKind::Croissant);
//!
//! // Single-letter codes are used by board layouts and snapshots
//! assert_eq!(kind.as_char(), 'C');
//! assert_eq!(CookieKind::from_char('M'), Some(CookieKind::Macaroon));
//!
//! // Chains run along exactly one axis
//! let axis = ChainKind::Horizontal;
//! assert_eq!(axis.as_str(), "horizontal");
//!
//! // Board dimensions
//! assert_eq!(NUM_COLUMNS, 9);
//! assert_eq!(NUM_ROWS, 9);
//! ```

/// Number of board columns (9, indexed left to right)
pub const NUM_COLUMNS: usize = 9;

/// Number of board rows (9, indexed bottom to top)
pub const NUM_ROWS: usize = 9;

/// Longest possible run along either axis
pub const GRID_SPAN: usize = if NUM_COLUMNS > NUM_ROWS {
    NUM_COLUMNS
} else {
    NUM_ROWS
};

/// Minimum run length that counts as a chain
pub const MIN_CHAIN_LENGTH: usize = 3;

/// Base point value per chain: `CHAIN_BASE_SCORE * (length - 2)`
pub const CHAIN_BASE_SCORE: u32 = 60;

/// Cookie symbol kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CookieKind {
    Croissant,
    Cupcake,
    Danish,
    Donut,
    Macaroon,
    SugarCookie,
}

impl CookieKind {
    /// Every kind, in code order. Index into this array with [`CookieKind::index`].
    pub const ALL: [CookieKind; 6] = [
        CookieKind::Croissant,
        CookieKind::Cupcake,
        CookieKind::Danish,
        CookieKind::Donut,
        CookieKind::Macaroon,
        CookieKind::SugarCookie,
    ];

    /// Parse a kind from its name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "croissant" => Some(CookieKind::Croissant),
            "cupcake" => Some(CookieKind::Cupcake),
            "danish" => Some(CookieKind::Danish),
            "donut" => Some(CookieKind::Donut),
            "macaroon" => Some(CookieKind::Macaroon),
            "sugarcookie" => Some(CookieKind::SugarCookie),
            _ => None,
        }
    }

    /// Convert to lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            CookieKind::Croissant => "croissant",
            CookieKind::Cupcake => "cupcake",
            CookieKind::Danish => "danish",
            CookieKind::Donut => "donut",
            CookieKind::Macaroon => "macaroon",
            CookieKind::SugarCookie => "sugarcookie",
        }
    }

    /// Single-letter code used by board layouts and debug output
    pub fn as_char(&self) -> char {
        match self {
            CookieKind::Croissant => 'C',
            CookieKind::Cupcake => 'U',
            CookieKind::Danish => 'D',
            CookieKind::Donut => 'O',
            CookieKind::Macaroon => 'M',
            CookieKind::SugarCookie => 'S',
        }
    }

    /// Parse a kind from its single-letter code
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(CookieKind::Croissant),
            'U' => Some(CookieKind::Cupcake),
            'D' => Some(CookieKind::Danish),
            'O' => Some(CookieKind::Donut),
            'M' => Some(CookieKind::Macaroon),
            'S' => Some(CookieKind::SugarCookie),
            _ => None,
        }
    }

    /// Position of this kind in [`CookieKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            CookieKind::Croissant => 0,
            CookieKind::Cupcake => 1,
            CookieKind::Danish => 2,
            CookieKind::Donut => 3,
            CookieKind::Macaroon => 4,
            CookieKind::SugarCookie => 5,
        }
    }
}

/// Axis a chain runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainKind {
    Horizontal,
    Vertical,
}

impl ChainKind {
    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainKind::Horizontal => "horizontal",
            ChainKind::Vertical => "vertical",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_str_roundtrip() {
        for kind in CookieKind::ALL {
            assert_eq!(CookieKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(CookieKind::from_str("CROISSANT"), Some(CookieKind::Croissant));
        assert_eq!(CookieKind::from_str("bagel"), None);
    }

    #[test]
    fn test_kind_char_roundtrip() {
        for kind in CookieKind::ALL {
            assert_eq!(CookieKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(CookieKind::from_char('d'), Some(CookieKind::Danish));
        assert_eq!(CookieKind::from_char('?'), None);
    }

    #[test]
    fn test_kind_index_matches_all_order() {
        for (i, kind) in CookieKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_chain_kind_str() {
        assert_eq!(ChainKind::Horizontal.as_str(), "horizontal");
        assert_eq!(ChainKind::Vertical.as_str(), "vertical");
    }
}
