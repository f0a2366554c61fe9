//! Session - the thread-safe command/query surface for a presentation layer
//!
//! A session wraps one [`Playfield`] in a mutex and owns the gravity timer that races
//! with the caller's input. Every command and query takes the lock for its whole
//! duration, so a renderer never observes a half-applied lock or line clear.

use std::sync::Arc;

use anyhow::{ensure, Result};
use log::info;
use parking_lot::Mutex;

use blockfall_core::types::{
    Command, Direction, PieceKind, RotateDirection, MAX_GRID_SIDE, MIN_GRID_SIDE,
};
use blockfall_core::{GameConfig, GameSnapshot, GravityTick, GridSnapshot, MoveOutcome, Playfield};

use crate::gravity::{GravityScheduler, SharedPlayfield};

/// Reject configurations the playfield would otherwise clamp or spin on
pub fn validate_config(config: &GameConfig) -> Result<()> {
    ensure!(
        (MIN_GRID_SIDE..=MAX_GRID_SIDE).contains(&config.width),
        "grid width {} outside {}..={}",
        config.width,
        MIN_GRID_SIDE,
        MAX_GRID_SIDE
    );
    ensure!(
        (MIN_GRID_SIDE..=MAX_GRID_SIDE).contains(&config.height),
        "grid height {} outside {}..={}",
        config.height,
        MIN_GRID_SIDE,
        MAX_GRID_SIDE
    );
    ensure!(config.start_level >= 1, "levels start at 1");
    ensure!(
        !config.base_drop_interval.is_zero(),
        "base drop interval must be positive"
    );
    Ok(())
}

/// One game plus its gravity timer
pub struct Session {
    playfield: SharedPlayfield,
    /// `None` for manually ticked sessions
    gravity: Mutex<Option<GravityScheduler>>,
    timed: bool,
}

impl Session {
    /// Start a game with a background gravity timer
    pub fn start(config: GameConfig) -> Result<Self> {
        let mut session = Self::manual(config)?;
        session.timed = true;
        *session.gravity.get_mut() = Some(GravityScheduler::start(Arc::clone(&session.playfield))?);
        Ok(session)
    }

    /// Start a game without a timer; the caller drives [`Session::gravity_tick`]
    pub fn manual(config: GameConfig) -> Result<Self> {
        validate_config(&config)?;
        info!(
            "starting {} game: {}x{}, seed {}, level {}",
            config.mode.as_str(),
            config.width,
            config.height,
            config.seed,
            config.start_level
        );

        Ok(Self {
            playfield: Arc::new(Mutex::new(Playfield::new(config))),
            gravity: Mutex::new(None),
            timed: false,
        })
    }

    pub fn move_piece(&self, direction: Direction) -> MoveOutcome {
        self.playfield.lock().move_piece(direction)
    }

    pub fn rotate(&self, direction: RotateDirection) -> bool {
        self.playfield.lock().rotate(direction)
    }

    pub fn hard_drop(&self) -> u32 {
        self.playfield.lock().hard_drop()
    }

    pub fn toggle_pause(&self) -> bool {
        self.playfield.lock().toggle_pause()
    }

    /// One forced descent, for sessions without a timer
    pub fn gravity_tick(&self) -> GravityTick {
        self.playfield.lock().gravity_tick()
    }

    /// Start over on an empty board and re-arm gravity
    pub fn reset(&self) -> Result<()> {
        let mut gravity = self.gravity.lock();
        // Join the old timer before touching the playfield so no stale tick lands
        // on the new game
        if let Some(mut old) = gravity.take() {
            old.stop();
        }

        self.playfield.lock().reset();

        if self.timed {
            *gravity = Some(GravityScheduler::start(Arc::clone(&self.playfield))?);
        }
        Ok(())
    }

    /// Apply a collaborator command
    /// Returns whether anything changed
    pub fn apply(&self, command: Command) -> Result<bool> {
        match command {
            Command::Reset => self.reset().map(|_| true),
            other => Ok(self.playfield.lock().apply(other)),
        }
    }

    /// Stop the gravity timer; the final state stays queryable
    pub fn stop(&self) {
        if let Some(mut gravity) = self.gravity.lock().take() {
            gravity.stop();
        }
    }

    pub fn is_gravity_running(&self) -> bool {
        self.gravity
            .lock()
            .as_ref()
            .is_some_and(GravityScheduler::is_running)
    }

    pub fn gravity_ticks(&self) -> u64 {
        self.gravity
            .lock()
            .as_ref()
            .map_or(0, GravityScheduler::ticks)
    }

    pub fn grid_snapshot(&self) -> GridSnapshot {
        self.playfield.lock().grid_snapshot()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.playfield.lock().snapshot()
    }

    pub fn score(&self) -> u32 {
        self.playfield.lock().score()
    }

    pub fn level(&self) -> u32 {
        self.playfield.lock().level()
    }

    pub fn lines_cleared(&self) -> u32 {
        self.playfield.lock().lines_cleared()
    }

    pub fn next_piece_kind(&self) -> PieceKind {
        self.playfield.lock().next_piece_kind()
    }

    pub fn is_game_over(&self) -> bool {
        self.playfield.lock().is_game_over()
    }

    pub fn is_finished(&self) -> bool {
        self.playfield.lock().is_finished()
    }

    /// Run a read-only query under the lock
    pub fn with_playfield<R>(&self, f: impl FnOnce(&Playfield) -> R) -> R {
        f(&self.playfield.lock())
    }

    /// Run a scripted mutation under the lock
    pub fn with_playfield_mut<R>(&self, f: impl FnOnce(&mut Playfield) -> R) -> R {
        f(&mut self.playfield.lock())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}
