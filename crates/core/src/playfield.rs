//! Playfield module - the game state machine
//!
//! Ties together the board, the falling piece, the bag, the rotation resolver and
//! scoring. Every command runs to completion synchronously; spawning and locking are
//! transient steps inside a command, so callers only ever observe one of the
//! [`Phase`]s.
//!
//! Lifecycle: `Spawning -> Running -> (Locking -> Spawning) | GameOver`. A blocked spawn
//! ends the game; in the forty-lines mode reaching the line goal finishes it. Both are
//! terminal: commands keep being accepted but change nothing until [`Playfield::reset`].

use std::time::Duration;

use log::{debug, info, trace};

use crate::board::Board;
use crate::config::GameConfig;
use crate::pieces::{PieceCells, Tetromino};
use crate::rng::Bag;
use crate::scoring::{drop_interval, line_clear_points, LevelProgress};
use crate::snapshot::{ActiveSnapshot, ClearEvent, GameSnapshot, GridSnapshot};
use crate::srs::{self, Occupancy};
use crate::types::*;

/// Result of a `move` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece moved one cell
    Moved,
    /// A sideways move hit a wall or settled blocks; nothing changed
    Blocked,
    /// A downward move was blocked, so the piece locked and the next one spawned
    Locked,
    /// The game is paused, over or finished; nothing changed
    Rejected,
}

/// Result of one gravity tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityTick {
    Moved,
    Locked,
    /// Paused, or no piece to pull down
    Skipped,
    /// Terminal phase reached; no further ticks will do anything
    Halted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Playfield {
    config: GameConfig,
    board: Board,
    /// Always unlocked: a piece leaves this slot the moment it locks
    active: Option<Tetromino>,
    bag: Bag,
    score: u32,
    lines: u32,
    level: LevelProgress,
    drop_interval: Duration,
    phase: Phase,
    /// Pieces merged into the board since the last reset
    pieces_locked: u32,
    /// Monotonic game counter (increments on reset)
    episode: u32,
    /// Last line-clear event (consumed by observers)
    last_event: Option<ClearEvent>,
}

impl Playfield {
    /// Create a game on an empty board and spawn the first piece
    ///
    /// Grid sides outside 4..=64 are clamped; [`Playfield::config`] reports the size
    /// actually used.
    pub fn new(config: GameConfig) -> Self {
        let board = Board::with_size(config.width, config.height);
        Self::with_board(config, board)
    }

    /// Create a game on a pre-filled board and spawn the first piece
    ///
    /// The board keeps its own dimensions; `config.width`/`height` are overwritten.
    pub fn with_board(config: GameConfig, board: Board) -> Self {
        let config = config.with_size(board.width(), board.height());
        let level = LevelProgress::new(config.start_level);
        let mut playfield = Self {
            bag: Bag::new(config.seed),
            board,
            active: None,
            score: 0,
            lines: 0,
            drop_interval: drop_interval(level.level, config.base_drop_interval),
            level,
            phase: Phase::Running,
            pieces_locked: 0,
            episode: 0,
            last_event: None,
            config,
        };

        let first = playfield.bag.choose();
        playfield.spawn(first);
        playfield
    }

    /// Place a new piece of `kind` at the spawn position
    ///
    /// Replaces any active piece without locking it. If a target cell is already
    /// occupied the game is over and no piece is active afterwards.
    pub fn spawn(&mut self, kind: PieceKind) -> bool {
        if self.phase.is_terminal() {
            return false;
        }

        let piece = Tetromino::spawned(kind, self.board.width());
        if !self.fits(&piece) {
            self.active = None;
            self.phase = Phase::GameOver;
            info!(
                "game over: {:?} spawn blocked (score {}, lines {}, level {})",
                kind, self.score, self.lines, self.level.level
            );
            return false;
        }

        debug!("spawned {:?} at {:?}", kind, piece.cells());
        self.active = Some(piece);
        true
    }

    fn fits(&self, piece: &Tetromino) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(row, col)| self.board.is_open(row, col))
    }

    /// Move the active piece one cell
    ///
    /// A blocked `Down` locks the piece and spawns the next one.
    pub fn move_piece(&mut self, direction: Direction) -> MoveOutcome {
        if self.phase != Phase::Running {
            return MoveOutcome::Rejected;
        }
        let Some(active) = self.active else {
            return MoveOutcome::Rejected;
        };

        let (dr, dc) = direction.delta();
        let moved = active.translated(dr, dc);
        if self.fits(&moved) {
            self.active = Some(moved);
            return MoveOutcome::Moved;
        }

        match direction {
            Direction::Down => {
                self.lock_and_respawn();
                MoveOutcome::Locked
            }
            Direction::Left | Direction::Right => MoveOutcome::Blocked,
        }
    }

    /// Rotate the active piece with SRS wall kicks
    /// Returns false (leaving the piece untouched) if no kick fits
    pub fn rotate(&mut self, direction: RotateDirection) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        match srs::resolve(active, direction, &self.board) {
            Some(outcome) => {
                if outcome.kick_index > 0 {
                    trace!(
                        "{:?} kicked by {:?} (kick {})",
                        active.kind(),
                        outcome.translation,
                        outcome.kick_index
                    );
                }
                active.apply_rotation(outcome.cells, outcome.pivot, outcome.rotation);
                true
            }
            None => false,
        }
    }

    /// Drop the active piece until it locks
    /// Returns the number of rows it fell
    pub fn hard_drop(&mut self) -> u32 {
        let mut rows = 0;
        loop {
            match self.move_piece(Direction::Down) {
                MoveOutcome::Moved => rows += 1,
                MoveOutcome::Locked | MoveOutcome::Blocked | MoveOutcome::Rejected => break,
            }
        }
        rows
    }

    /// Lock the active piece onto the board, clear lines and spawn the next piece
    pub fn lock_and_respawn(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        let Some(mut piece) = self.active.take() else {
            return;
        };

        piece.lock();
        let merged = self.board.lock_cells(&piece.cells(), piece.kind());
        debug_assert!(merged, "active piece overlapped settled blocks");
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        debug!("locked {:?} at {:?}", piece.kind(), piece.cells());

        self.clear_lines();

        if self.phase.is_terminal() {
            return;
        }
        let next = self.bag.choose();
        self.spawn(next);
    }

    /// Remove every full row and update lines, level, gravity and score
    /// Returns the number of rows cleared (0 when no row was full)
    pub fn clear_lines(&mut self) -> u32 {
        let count = self.board.mark_full_rows();
        if count == 0 {
            return 0;
        }
        let rows = self.board.sweep_marked_rows();

        self.lines += count;
        let level_up = self.level.advance(count);
        self.drop_interval = drop_interval(self.level.level, self.config.base_drop_interval);
        let points = line_clear_points(count, self.level.level);
        self.score = self.score.saturating_add(points);

        debug!("cleared rows {:?} for {} points", rows.as_slice(), points);
        if level_up {
            info!(
                "level {} reached, drop interval now {:?}",
                self.level.level, self.drop_interval
            );
        }

        self.last_event = Some(ClearEvent {
            rows,
            lines: count,
            points,
            level_up,
        });

        if let Some(goal) = self.config.mode.line_goal() {
            if self.lines >= goal {
                self.phase = Phase::Finished;
                self.active = None;
                info!("finished {} lines with score {}", self.lines, self.score);
            }
        }

        count
    }

    /// One forced descent from the gravity timer
    pub fn gravity_tick(&mut self) -> GravityTick {
        match self.phase {
            Phase::GameOver | Phase::Finished => GravityTick::Halted,
            Phase::Paused => GravityTick::Skipped,
            Phase::Running => match self.move_piece(Direction::Down) {
                MoveOutcome::Moved => GravityTick::Moved,
                MoveOutcome::Locked => GravityTick::Locked,
                MoveOutcome::Blocked | MoveOutcome::Rejected => GravityTick::Skipped,
            },
        }
    }

    /// Toggle between running and paused
    /// Returns false when the game is over or finished
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => self.set_paused(true),
            Phase::Paused => self.set_paused(false),
            Phase::GameOver | Phase::Finished => false,
        }
    }

    pub fn set_paused(&mut self, paused: bool) -> bool {
        match (self.phase, paused) {
            (Phase::Running, true) => self.phase = Phase::Paused,
            (Phase::Paused, false) => self.phase = Phase::Running,
            (Phase::Running, false) | (Phase::Paused, true) => {}
            (Phase::GameOver | Phase::Finished, _) => return false,
        }
        true
    }

    /// Start over on an empty board
    ///
    /// The bag continues from its current RNG state so consecutive games differ.
    pub fn reset(&mut self) {
        let config = self.config.clone().with_seed(self.bag.seed());
        let episode = self.episode.wrapping_add(1);
        *self = Self::new(config);
        self.episode = episode;
        info!("reset, episode {}", episode);
    }

    /// Apply a collaborator command
    /// Returns whether anything changed
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_piece(Direction::Left) == MoveOutcome::Moved,
            Command::MoveRight => self.move_piece(Direction::Right) == MoveOutcome::Moved,
            Command::MoveDown => matches!(
                self.move_piece(Direction::Down),
                MoveOutcome::Moved | MoveOutcome::Locked
            ),
            Command::HardDrop => {
                let was_running = self.phase == Phase::Running;
                self.hard_drop();
                was_running
            }
            Command::RotateCw => self.rotate(RotateDirection::Clockwise),
            Command::RotateCcw => self.rotate(RotateDirection::CounterClockwise),
            Command::Pause => self.toggle_pause(),
            Command::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Where the active piece would land if dropped now
    pub fn ghost_cells(&self) -> Option<PieceCells> {
        let mut ghost = self.active?;
        loop {
            let below = ghost.translated(1, 0);
            if !self.fits(&below) {
                return Some(ghost.cells());
            }
            ghost = below;
        }
    }

    /// Settled grid with the active piece drawn in
    pub fn grid_snapshot(&self) -> GridSnapshot {
        let mut grid = self.settled_grid();
        if let Some(active) = self.active {
            let width = grid.width as usize;
            for (row, col) in active.cells() {
                if self.board.in_bounds(row, col) {
                    grid.cells[row as usize * width + col as usize] = active.kind().id();
                }
            }
        }
        grid
    }

    /// Settled blocks only
    pub fn settled_grid(&self) -> GridSnapshot {
        GridSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            cells: self.board.cells().to_vec(),
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.grid_snapshot(),
            active: self.active.map(|piece| ActiveSnapshot {
                kind: piece.kind(),
                rotation: piece.rotation(),
                cells: piece.cells(),
            }),
            ghost: self.ghost_cells(),
            next: self.next_piece_kind(),
            score: self.score,
            level: self.level.level,
            level_progress: self.level.progress,
            lines: self.lines,
            drop_interval_ms: self.drop_interval.as_millis() as u64,
            phase: self.phase,
            mode: self.config.mode,
            pieces_locked: self.pieces_locked,
            episode: self.episode,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level.level
    }

    /// Lines cleared since the last level-up
    pub fn level_progress(&self) -> u32 {
        self.level.progress
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    pub fn next_piece_kind(&self) -> PieceKind {
        self.bag.peek_next()
    }

    /// Upcoming pieces in draw order (at most one bag)
    pub fn preview<const N: usize>(&self) -> [PieceKind; N] {
        self.bag.preview::<N>()
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct grid access for scripted setups
    ///
    /// The active piece is not re-checked against what gets written.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Take and clear the last line-clear event
    pub fn take_last_event(&mut self) -> Option<ClearEvent> {
        self.last_event.take()
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
