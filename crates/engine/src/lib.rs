//! Turn orchestration layered on the core match-three engine
//!
//! The core crate deliberately exposes single state transitions; this crate
//! owns the game-flow rules built on top of them: gating swaps on the
//! legal-swap set, resolving a full cascade per turn, accumulating score
//! against the level target, and spending the move budget. Presentation
//! layers drive a [`GameSession`] and animate the [`TurnOutcome`] records it
//! returns; the session itself knows nothing about time or rendering.

pub mod session;

pub use session::{CascadeStep, GameSession, SessionStatus, SwapError, TurnOutcome};
