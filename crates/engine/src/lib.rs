//! Engine - concurrency around the core playfield
//!
//! The core playfield is single-threaded. This crate makes it safe to share between
//! the collaborator's input path and a background gravity timer:
//!
//! - [`gravity`]: tokio timer task that issues a forced descent every drop interval,
//!   re-reading the interval each time so level-ups take effect on the next tick
//! - [`session`]: mutex-guarded playfield (a monitor) with start/stop/reset lifecycle
//!
//! # Example
//!
//! ```
//! use blockfall_engine::Session;
//! use blockfall_engine::core::GameConfig;
//! use blockfall_engine::types::Direction;
//!
//! let session = Session::manual(GameConfig::default()).unwrap();
//! session.move_piece(Direction::Left);
//! session.gravity_tick();
//! assert_eq!(session.score(), 0);
//! assert!(!session.is_game_over());
//! ```

pub mod gravity;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use gravity::{GravityScheduler, SharedPlayfield};
pub use session::{validate_config, Session};
