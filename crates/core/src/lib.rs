//! Core match-three engine - pure, deterministic, and testable
//!
//! This crate owns the authoritative board state and every rule that
//! transforms it: board generation, legal-swap enumeration, swap
//! application, dual-axis match detection, combo scoring, gravity
//! compaction, and refill. It has **zero dependencies** on UI, timing, or
//! I/O, making it:
//!
//! - **Deterministic**: the RNG is injectable; the same seed produces
//!   identical boards and refills
//! - **Testable**: every rule is a synchronous state transition with a
//!   value-typed result
//! - **Portable**: usable from any presentation layer (terminal, GUI,
//!   headless tooling)
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size 9x9 sparse storage shared by the tile and cookie
//!   layers
//! - [`cookie`]: tiles, cookies, and cookie identity
//! - [`swap`]: the unordered adjacent-pair value object
//! - [`chain`]: same-kind runs discovered by match detection
//! - [`level`]: the engine itself - generation, swaps, matches, cascades
//! - [`scoring`]: chain point values and combo escalation
//! - [`rng`]: seedable LCG for reproducible board generation
//! - [`snapshot`]: serializable observation of level state
//!
//! # Example
//!
//! ```
//! use crunch_core::{Level, LevelData};
//!
//! let data = LevelData {
//!     tiles: vec![vec![1; 9]; 9],
//!     target_score: 1000,
//!     moves: 15,
//! };
//! let mut level = Level::new(&data, 42);
//!
//! // Deal a board; generation retries until a legal swap exists
//! let cookies = level.shuffle();
//! assert_eq!(cookies.len(), 81);
//! assert!(!level.possible_swaps().is_empty());
//!
//! // One full turn: swap, then resolve the cascade
//! let swap = *level.possible_swaps().iter().next().unwrap();
//! level.reset_combo_multiplier();
//! assert!(level.is_possible_swap(&swap));
//! level.perform_swap(&swap);
//! while !level.remove_matches().is_empty() {
//!     level.fill_holes();
//!     level.top_up_cookies();
//! }
//! level.detect_possible_swaps();
//! ```

pub mod chain;
pub mod cookie;
pub mod grid;
pub mod level;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod swap;

pub use crunch_types as types;

// Re-export commonly used types for convenience
pub use chain::Chain;
pub use cookie::{Cookie, CookieId, Tile};
pub use grid::Grid;
pub use level::{CookieColumn, Level, LevelData};
pub use rng::SimpleRng;
pub use scoring::chain_score;
pub use snapshot::LevelSnapshot;
pub use swap::Swap;
