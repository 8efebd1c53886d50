//! Scoring module - chain values and combo escalation
//!
//! A chain's value grows linearly with its length and is multiplied by the
//! per-turn combo multiplier: `60 * (length - 2) * multiplier`. The level
//! engine bumps the multiplier after each scored chain and resets it to 1 at
//! the start of every player turn, so cascading matches within one turn pay
//! out progressively more.

use crunch_types::CHAIN_BASE_SCORE;

/// Point value of a single chain
///
/// `length` is the chain's cookie count (the detector guarantees >= 3) and
/// `combo_multiplier` is the multiplier in effect before this chain is
/// scored.
pub fn chain_score(length: usize, combo_multiplier: u32) -> u32 {
    let extent = (length as u32).saturating_sub(2);
    CHAIN_BASE_SCORE
        .saturating_mul(extent)
        .saturating_mul(combo_multiplier)
}
