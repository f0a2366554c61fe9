//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has no threads,
//! timers, UI or I/O: the gravity timer and the locking around the playfield live in
//! `blockfall-engine`, and presentation is left to whoever polls the snapshots.
//!
//! - **Deterministic**: same seed, same piece sequence
//! - **Testable**: every rule is reachable through plain method calls
//! - **Portable**: runs headless, in tests, or under any front end
//!
//! # Module Structure
//!
//! - [`board`]: settled grid with collision queries and line clearing
//! - [`pieces`]: tetromino footprints, pivots and the falling piece instance
//! - [`srs`]: Super Rotation System resolver with wall kick tables
//! - [`rng`]: 7-bag random piece generation with lookahead
//! - [`scoring`]: line clear points, level progression and the gravity curve
//! - [`playfield`]: the game state machine tying everything together
//! - [`snapshot`]: immutable copies of state for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, MoveOutcome, Playfield};
//! use blockfall_core::types::{Direction, RotateDirection};
//!
//! let mut game = Playfield::new(GameConfig::default().with_seed(12345));
//!
//! assert_eq!(game.move_piece(Direction::Right), MoveOutcome::Moved);
//! game.rotate(RotateDirection::Clockwise);
//! game.hard_drop();
//!
//! assert_eq!(game.pieces_locked(), 1);
//! assert!(game.active().is_some());
//! ```

pub mod board;
pub mod config;
pub mod pieces;
pub mod playfield;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod srs;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use pieces::{HalfCell, PieceCells, Tetromino};
pub use playfield::{GravityTick, MoveOutcome, Playfield};
pub use rng::{Bag, SimpleRng};
pub use scoring::{drop_interval, line_clear_points, LevelProgress};
pub use snapshot::{ActiveSnapshot, ClearEvent, GameSnapshot, GridSnapshot};
pub use srs::{Occupancy, RotationOutcome};
