//! Blockfall (workspace facade crate).
//!
//! Re-exports the implementation crates under `crates/` so tools and tests can use a
//! single `blockfall::{core,engine,types}` path.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_types as types;
