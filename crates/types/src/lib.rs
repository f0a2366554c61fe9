//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behaviour beyond small conversions, so they can be
//! shared by the playfield, the gravity scheduler and any presentation layer.
//!
//! # Grid
//!
//! Default playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! Cells are stored as `u8`:
//!
//! | Value | Meaning |
//! |-------|---------|
//! | `0` | Empty |
//! | `1..=7` | Settled block of the piece kind with that [`PieceKind::id`] |
//! | `8` | [`CLEAR_MARKER`]: row is being cleared |
//!
//! # Gravity
//!
//! Seconds between forced descents follow a fixed curve of the level. The baseline is
//! [`BASE_DROP_MS`]; see `blockfall_core::scoring::drop_interval` for the breakpoints.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, Rotation, RotateDirection, Command, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//! assert_eq!(PieceKind::from_id(parsed.id()), Some(PieceKind::T));
//!
//! let rotated = Rotation::North.rotate(RotateDirection::Clockwise);
//! assert_eq!(rotated, Rotation::East);
//!
//! assert_eq!(Command::from_str("rotateCcw"), Some(Command::RotateCcw));
//! assert_eq!(BOARD_WIDTH, 10);
//! ```

use serde::Serialize;

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Smallest grid side that still fits every spawn box
pub const MIN_GRID_SIDE: u8 = 4;

/// Largest grid side; cell coordinates and kick offsets must fit in `i8`
pub const MAX_GRID_SIDE: u8 = 64;

/// Value stored in an empty cell
pub const EMPTY_CELL: Cell = 0;

/// Sentinel written over a full row while it is being cleared
pub const CLEAR_MARKER: Cell = 8;

/// Baseline gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u64 = 1000;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line goal of the forty-lines sprint mode
pub const SPRINT_LINES: u32 = 40;

/// Expected cadence of the collaborator's input polling
pub const INPUT_POLL_MS: u64 = 50;

/// Line clear scoring table
///
/// Base points for clearing N lines in one lock:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by the current level (levels start at 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// A cell on the game board (see the module docs for the value encoding)
pub type Cell = u8;

/// The seven tetromino piece kinds
///
/// The numeric id doubles as the cell value and the colour key for renderers:
/// - **I** (1): horizontal bar
/// - **O** (2): 2x2 square
/// - **T** (3): T-shaped
/// - **S** (4): S-shaped
/// - **Z** (5): Z-shaped (mirror of S)
/// - **J** (6): J-shaped
/// - **L** (7): L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Cell value written to the grid for this kind (1-7)
    pub fn id(self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]
    ///
    /// ```
    /// use blockfall_types::{PieceKind, CLEAR_MARKER};
    ///
    /// assert_eq!(PieceKind::from_id(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_id(0), None);
    /// assert_eq!(PieceKind::from_id(CLEAR_MARKER), None);
    /// ```
    pub fn from_id(id: Cell) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Direction of a quarter turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North** (0): Spawn orientation
/// - **East** (1): Rotated 90° clockwise
/// - **South** (2): Rotated 180°
/// - **West** (3): Rotated 90° counter-clockwise
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub fn rotate(&self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Clockwise => self.rotate_cw(),
            RotateDirection::CounterClockwise => self.rotate_ccw(),
        }
    }

    /// Orientation index 0-3
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Translation directions accepted by `move`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Row/column delta of a single step
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

/// Session rule set
///
/// - **Classic**: endless, ends only on a blocked spawn
/// - **FortyLines**: sprint, finishes once [`SPRINT_LINES`] lines are cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    #[default]
    Classic,
    FortyLines,
}

impl GameMode {
    /// Parse mode from string ("classic", "forty-lines", "40lines", ...)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "classic" => Some(GameMode::Classic),
            "fortylines" | "40lines" | "sprint" => Some(GameMode::FortyLines),
            _ => None,
        }
    }

    /// Total lines after which the session finishes, if any
    pub fn line_goal(&self) -> Option<u32> {
        match self {
            GameMode::Classic => None,
            GameMode::FortyLines => Some(SPRINT_LINES),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::FortyLines => "forty-lines",
        }
    }
}

/// Observable lifecycle phase of a playfield
///
/// Spawning and locking happen inside a single command and are never observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// A piece is falling and commands are accepted
    Running,
    /// Commands and gravity are suspended until resumed
    Paused,
    /// A spawn was blocked; terminal until reset
    GameOver,
    /// The mode's line goal was reached; terminal until reset
    Finished,
}

impl Phase {
    /// Whether the phase only ends through a reset
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameOver | Phase::Finished)
    }
}

/// Discrete commands forwarded by the collaborator layer
///
/// Every variant is safe to apply in any phase; illegal commands are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot descend
    MoveDown,
    /// Drop piece until it locks
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause state
    Pause,
    /// Start over with an empty grid
    Reset,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("harddrop"), Some(Command::HardDrop));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "movedown" => Some(Command::MoveDown),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "pause" => Some(Command::Pause),
            "reset" => Some(Command::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::MoveDown => "moveDown",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::Pause => "pause",
            Command::Reset => "reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_ids_are_distinct_and_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_id(kind.id()), Some(kind));
            assert_ne!(kind.id(), EMPTY_CELL);
            assert_ne!(kind.id(), CLEAR_MARKER);
        }
    }

    #[test]
    fn rotation_cycles_back() {
        let mut r = Rotation::North;
        for _ in 0..4 {
            r = r.rotate(RotateDirection::Clockwise);
        }
        assert_eq!(r, Rotation::North);
        assert_eq!(Rotation::North.rotate_ccw().index(), 3);
    }

    #[test]
    fn mode_parsing_accepts_sprint_spellings() {
        assert_eq!(GameMode::from_str("forty-lines"), Some(GameMode::FortyLines));
        assert_eq!(GameMode::from_str("40_LINES"), Some(GameMode::FortyLines));
        assert_eq!(GameMode::from_str("Classic"), Some(GameMode::Classic));
        assert_eq!(GameMode::from_str("marathon"), None);
        assert_eq!(GameMode::FortyLines.line_goal(), Some(SPRINT_LINES));
    }

    #[test]
    fn terminal_phases() {
        assert!(Phase::GameOver.is_terminal());
        assert!(Phase::Finished.is_terminal());
        assert!(!Phase::Paused.is_terminal());
        assert!(!Phase::Running.is_terminal());
    }
}
