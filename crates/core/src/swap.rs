//! Swap module - a proposed exchange of two adjacent cookies
//!
//! A swap is a transient value object: it describes one proposed or applied
//! exchange and is never stored in the grid. Equality and hashing are
//! symmetric over the cookie identity pair, so `Swap::new(a, b)` and
//! `Swap::new(b, a)` are the same swap - the legal-swap set relies on this.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::cookie::Cookie;

/// An unordered pair of two distinct cookies
#[derive(Debug, Clone, Copy)]
pub struct Swap {
    a: Cookie,
    b: Cookie,
}

impl Swap {
    /// Create a swap from two distinct cookies
    ///
    /// Panics if both sides name the same cookie identity - proposing to
    /// swap a cookie with itself is a caller bug.
    pub fn new(a: Cookie, b: Cookie) -> Self {
        assert!(a.id != b.id, "swap requires two distinct cookies");
        Self { a, b }
    }

    /// First cookie as recorded at construction time
    pub fn a(&self) -> Cookie {
        self.a
    }

    /// Second cookie as recorded at construction time
    pub fn b(&self) -> Cookie {
        self.b
    }
}

impl PartialEq for Swap {
    fn eq(&self, other: &Self) -> bool {
        (self.a.id == other.a.id && self.b.id == other.b.id)
            || (self.a.id == other.b.id && self.b.id == other.a.id)
    }
}

impl Eq for Swap {}

impl Hash for Swap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent: hash the identity pair lowest id first
        let (lo, hi) = if self.a.id <= self.b.id {
            (self.a.id, self.b.id)
        } else {
            (self.b.id, self.a.id)
        };
        lo.hash(state);
        hi.hash(state);
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swap {} with {}", self.a, self.b)
    }
}
