//! Game configuration - plain data consumed by [`crate::Playfield::new`]

use std::time::Duration;

use crate::types::{GameMode, BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH};

/// Rules and dimensions of one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    /// Seed of the bag's RNG
    pub seed: u32,
    /// Level the game starts at (1-based)
    pub start_level: u32,
    pub mode: GameMode,
    /// Gravity interval at level 1
    pub base_drop_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            seed: 1,
            start_level: 1,
            mode: GameMode::Classic,
            base_drop_interval: Duration::from_millis(BASE_DROP_MS),
        }
    }
}

impl GameConfig {
    pub fn with_size(mut self, width: u8, height: u8) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_start_level(mut self, level: u32) -> Self {
        self.start_level = level;
        self
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_base_drop_interval(mut self, interval: Duration) -> Self {
        self.base_drop_interval = interval;
        self
    }
}
