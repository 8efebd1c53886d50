//! RNG module - deterministic cookie kind sampling
//!
//! Board generation and refill must be reproducible given a seed, so the
//! engine carries its own injectable LCG instead of a global RNG. Same seed,
//! same boards - which is what the tests and any replay tooling rely on.

use crunch_types::CookieKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Draw a uniformly random cookie kind
    pub fn next_kind(&mut self) -> CookieKind {
        let i = self.next_range(CookieKind::ALL.len() as u32) as usize;
        CookieKind::ALL[i]
    }

    /// Get the current RNG state (for resuming a sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
