//! Headless Blockfall runner (default binary).
//!
//! Starts a session with a live gravity timer and plays it with a seeded stream of
//! random commands, polling at a fixed interval the way an input layer would. Prints
//! the final board, or the full snapshot as JSON.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use log::info;

use blockfall::core::{GameConfig, SimpleRng};
use blockfall::engine::Session;
use blockfall::types::{Command, GameMode, BASE_DROP_MS, INPUT_POLL_MS};

/// Commands the random player picks from (never resets)
const PLAYER_COMMANDS: [Command; 6] = [
    Command::MoveLeft,
    Command::MoveRight,
    Command::MoveDown,
    Command::RotateCw,
    Command::RotateCcw,
    Command::HardDrop,
];

#[derive(Clone, Debug, Parser)]
#[command(name = "blockfall", about = "Play a headless Blockfall game with random input")]
struct Options {
    /// Seed for the piece bag and the random player
    #[arg(short, long, env = "BLOCKFALL_SEED", default_value_t = 1)]
    seed: u32,

    /// Starting level
    #[arg(short, long, env = "BLOCKFALL_LEVEL", default_value_t = 1)]
    level: u32,

    /// classic or forty-lines
    #[arg(short, long, env = "BLOCKFALL_MODE", default_value = "classic", value_parser = parse_mode)]
    mode: GameMode,

    /// Gravity interval at level 1
    #[arg(long, env = "BLOCKFALL_BASE_DROP_MS", default_value_t = BASE_DROP_MS)]
    base_drop_ms: u64,

    /// Stop playing after this long
    #[arg(short, long, default_value_t = 5000)]
    duration_ms: u64,

    /// Delay between player commands
    #[arg(short, long, default_value_t = INPUT_POLL_MS)]
    poll_ms: u64,

    /// Print the final snapshot as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    #[arg(long, env = "BLOCKFALL_LOG")]
    log_level: Option<String>,
}

impl Options {
    fn game_config(&self) -> GameConfig {
        GameConfig::default()
            .with_seed(self.seed)
            .with_start_level(self.level)
            .with_mode(self.mode)
            .with_base_drop_interval(Duration::from_millis(self.base_drop_ms))
    }
}

fn parse_mode(s: &str) -> Result<GameMode, String> {
    GameMode::from_str(s).ok_or_else(|| format!("unknown mode '{}'", s))
}

fn main() -> Result<()> {
    let options = Options::parse();
    let _logger = Logger::try_with_env_or_str(options.log_level.as_deref().unwrap_or("info"))?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(match cfg!(debug_assertions) {
            true => AdaptiveFormat::WithThread,
            _ => AdaptiveFormat::Default,
        })
        .start()?;

    let session = Session::start(options.game_config())?;
    play(&session, &options);
    session.stop();

    let snapshot = session.snapshot();
    info!(
        "final: score {}, lines {}, level {}, phase {:?}",
        snapshot.score, snapshot.lines, snapshot.level, snapshot.phase
    );

    if options.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", snapshot.grid);
        println!(
            "score {}  lines {}  level {}  next {}",
            snapshot.score,
            snapshot.lines,
            snapshot.level,
            snapshot.next.as_str()
        );
    }
    Ok(())
}

fn play(session: &Session, options: &Options) {
    let mut rng = SimpleRng::new(options.seed ^ 0x9E37_79B9);
    let poll = Duration::from_millis(options.poll_ms.max(1));
    let deadline = Instant::now() + Duration::from_millis(options.duration_ms);

    while Instant::now() < deadline {
        if session.is_game_over() || session.is_finished() {
            break;
        }
        let command = PLAYER_COMMANDS[rng.next_range(PLAYER_COMMANDS.len() as u32) as usize];
        // Player commands never reset, so this cannot fail
        let _ = session.apply(command);
        thread::sleep(poll);
    }
}
