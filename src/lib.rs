//! Crunch (workspace facade crate).
//!
//! This package keeps a single `crunch::{core,engine,types}` public API
//! stable while the implementation lives in dedicated crates under
//! `crates/`.

pub use crunch_core as core;
pub use crunch_engine as engine;
pub use crunch_types as types;
