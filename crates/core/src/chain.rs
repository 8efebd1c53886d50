//! Chain module - a contiguous same-kind run along one axis
//!
//! The detector appends cookies in axis traversal order (left to right for
//! horizontal chains, bottom to top for vertical ones), so `first` and
//! `last` are the run's endpoints. Chains are produced and consumed within a
//! single `remove_matches` call; the `score` field is 0 until the scoring
//! pass assigns it.

use std::fmt;

use arrayvec::ArrayVec;

use crate::cookie::Cookie;
use crunch_types::{ChainKind, GRID_SPAN};

/// An ordered run of at least three same-kind cookies
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    kind: ChainKind,
    cookies: ArrayVec<Cookie, GRID_SPAN>,
    /// Point value assigned by the scoring pass
    pub score: u32,
}

impl Chain {
    /// Create an empty chain along the given axis
    pub fn new(kind: ChainKind) -> Self {
        Self {
            kind,
            cookies: ArrayVec::new(),
            score: 0,
        }
    }

    /// Axis this chain runs along
    pub fn kind(&self) -> ChainKind {
        self.kind
    }

    /// Append the next cookie in traversal order
    pub fn add(&mut self, cookie: Cookie) {
        self.cookies.push(cookie);
    }

    /// Cookies in traversal order
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Number of cookies in the run
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Whether the chain holds no cookies yet
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// First cookie along the traversal axis
    ///
    /// Panics if the chain is empty.
    pub fn first(&self) -> Cookie {
        self.cookies[0]
    }

    /// Last cookie along the traversal axis
    ///
    /// Panics if the chain is empty.
    pub fn last(&self) -> Cookie {
        self.cookies[self.cookies.len() - 1]
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} chain:", self.kind.as_str())?;
        for cookie in &self.cookies {
            write!(f, " {cookie}")?;
        }
        Ok(())
    }
}
