//! Gravity scheduler - background timer forcing the active piece down
//!
//! Bridges the synchronous playfield with a tokio timer task. The scheduler owns its
//! runtime, so starting it spawns one worker thread and stopping it joins that thread;
//! nothing is left detached.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, trace};
use parking_lot::Mutex;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use blockfall_core::{GravityTick, Playfield};

/// Playfield shared between the command path and the gravity timer
pub type SharedPlayfield = Arc<Mutex<Playfield>>;

/// How long `stop` waits for an in-flight tick to finish
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

/// Running gravity timer
pub struct GravityScheduler {
    runtime: Option<Runtime>,
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    ticks: Arc<AtomicU64>,
}

impl GravityScheduler {
    /// Arm the first tick and start the timer loop
    pub fn start(playfield: SharedPlayfield) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("blockfall-gravity")
            .enable_time()
            .build()
            .context("failed to create gravity runtime")?;

        let (stop_tx, stop_rx) = oneshot::channel();
        let ticks = Arc::new(AtomicU64::new(0));
        let task = runtime.spawn(run_gravity(playfield, stop_rx, Arc::clone(&ticks)));
        info!("gravity scheduler started");

        Ok(Self {
            runtime: Some(runtime),
            stop_tx: Some(stop_tx),
            task: Some(task),
            ticks,
        })
    }

    /// Ticks delivered so far
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// False once stopped or once the game reached a terminal phase
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancel future ticks and join the worker thread
    ///
    /// A tick already holding the playfield lock completes first. Must not be called
    /// from inside an async context.
    pub fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        self.task = None;
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_timeout(SHUTDOWN_GRACE);
            info!("gravity scheduler stopped after {} ticks", self.ticks());
        }
    }
}

impl Drop for GravityScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_gravity(
    playfield: SharedPlayfield,
    mut stop_rx: oneshot::Receiver<()>,
    ticks: Arc<AtomicU64>,
) {
    loop {
        // Re-read every time so a level-up since the last tick takes effect
        let interval = playfield.lock().drop_interval();

        tokio::select! {
            _ = &mut stop_rx => break,
            _ = tokio::time::sleep(interval) => {}
        }

        let tick = playfield.lock().gravity_tick();
        ticks.fetch_add(1, Ordering::Relaxed);
        trace!("gravity tick: {:?}", tick);

        if tick == GravityTick::Halted {
            info!("gravity halted: game ended");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::types::{Direction, Phase, PieceKind};
    use blockfall_core::{GameConfig, MoveOutcome};

    fn fast_playfield() -> SharedPlayfield {
        let config = GameConfig::default().with_base_drop_interval(Duration::from_millis(5));
        Arc::new(Mutex::new(Playfield::new(config)))
    }

    #[test]
    fn test_ticks_pull_piece_down() {
        let playfield = fast_playfield();
        let start_row = playfield.lock().active().unwrap().bottom_row();

        let mut gravity = GravityScheduler::start(Arc::clone(&playfield)).unwrap();
        std::thread::sleep(Duration::from_millis(100));
        gravity.stop();

        assert!(gravity.ticks() > 0);
        let pf = playfield.lock();
        let moved = pf.pieces_locked() > 0 || pf.active().unwrap().bottom_row() > start_row;
        assert!(moved);
    }

    #[test]
    fn test_stop_freezes_state() {
        let playfield = fast_playfield();
        let mut gravity = GravityScheduler::start(Arc::clone(&playfield)).unwrap();
        std::thread::sleep(Duration::from_millis(30));
        gravity.stop();
        assert!(!gravity.is_running());

        let before = playfield.lock().snapshot();
        let ticks = gravity.ticks();
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(playfield.lock().snapshot(), before);
        assert_eq!(gravity.ticks(), ticks);
    }

    /// Clear four full rows under the caller's lock
    fn clear_tetris(pf: &mut Playfield) {
        let board = pf.board_mut();
        for row in 16..20 {
            for col in 0..10 {
                board.set(row, col, PieceKind::Z.id());
            }
        }
        assert_eq!(pf.clear_lines(), 4);
    }

    #[test]
    fn test_level_up_speeds_up_later_ticks() {
        let config = GameConfig::default().with_base_drop_interval(Duration::from_millis(700));
        let playfield = Arc::new(Mutex::new(Playfield::new(config)));
        let mut gravity = GravityScheduler::start(Arc::clone(&playfield)).unwrap();
        // Let the first tick arm with the level-1 interval
        std::thread::sleep(Duration::from_millis(100));

        // Climb from level 1 to 29 (700ms down to 50ms per row)
        {
            let mut pf = playfield.lock();
            while pf.level() < 29 {
                clear_tetris(&mut pf);
            }
            assert_eq!(pf.drop_interval(), Duration::from_millis(50));
        }

        // The tick already armed still waits out the old interval
        std::thread::sleep(Duration::from_millis(300));
        assert_eq!(gravity.ticks(), 0);

        // After it fires, every re-arm uses the new one
        std::thread::sleep(Duration::from_millis(900));
        gravity.stop();
        assert!(gravity.ticks() >= 4, "only {} ticks", gravity.ticks());
    }

    #[test]
    fn test_halts_after_game_over() {
        let playfield = fast_playfield();
        // Stack pieces straight down until the spawn is blocked
        {
            let mut pf = playfield.lock();
            while !pf.is_game_over() {
                pf.hard_drop();
            }
            assert_eq!(pf.move_piece(Direction::Down), MoveOutcome::Rejected);
        }

        let gravity = GravityScheduler::start(Arc::clone(&playfield)).unwrap();
        std::thread::sleep(Duration::from_millis(100));
        assert!(!gravity.is_running());
        assert_eq!(playfield.lock().phase(), Phase::GameOver);
    }
}
