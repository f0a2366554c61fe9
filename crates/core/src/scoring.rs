//! Scoring module - line clear points, level progression and the gravity curve
//!
//! Points follow the classic Nintendo table multiplied by the level; levels start at 1
//! and advance once every [`LINES_PER_LEVEL`] cleared lines. Gravity shortens with the
//! level on the classic frame curve, expressed as fourteenths of a baseline interval.

use std::time::Duration;

use crate::types::{LINES_PER_LEVEL, LINE_SCORES};

/// Calculate line clear score
/// lines: number of lines cleared in one lock (0-4)
/// level: current level (1-based)
pub fn line_clear_points(lines: u32, level: u32) -> u32 {
    let base = LINE_SCORES[lines.min(4) as usize];
    base.saturating_mul(level)
}

/// Gravity frames for a level, out of 14 at level 1
pub fn gravity_frames(level: u32) -> u32 {
    match level {
        0..=9 => 15 - level,
        10..=12 => 5,
        13..=15 => 4,
        16..=18 => 3,
        19..=28 => 2,
        _ => 1,
    }
}

/// Time between forced descents at `level`
///
/// `base` is the level-1 interval; every level below 10 takes one fourteenth off, then
/// the interval steps down at levels 10, 13, 16, 19 and 29.
pub fn drop_interval(level: u32, base: Duration) -> Duration {
    base * gravity_frames(level) / 14
}

/// Level and the lines cleared since the last level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u32,
    pub progress: u32,
}

impl LevelProgress {
    pub fn new(level: u32) -> Self {
        Self { level, progress: 0 }
    }

    /// Count cleared lines; returns true when this raised the level
    pub fn advance(&mut self, lines: u32) -> bool {
        self.progress += lines;
        if self.progress >= LINES_PER_LEVEL {
            self.level += 1;
            self.progress %= LINES_PER_LEVEL;
            return true;
        }
        false
    }
}
