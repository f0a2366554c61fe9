//! Session tests - concurrent input and gravity against one playfield

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use blockfall::core::GameConfig;
use blockfall::engine::Session;
use blockfall::types::{Command, Direction, GameMode, Phase, RotateDirection};

fn fast_config() -> GameConfig {
    GameConfig::default()
        .with_seed(2024)
        .with_base_drop_interval(Duration::from_millis(2))
}

#[test]
fn test_invalid_config_is_rejected() {
    assert!(Session::start(GameConfig::default().with_size(10, 100)).is_err());
    assert!(Session::manual(GameConfig::default().with_size(2, 20)).is_err());
    assert!(Session::manual(GameConfig::default().with_start_level(0)).is_err());
}

#[test]
fn test_gravity_eventually_ends_the_game() {
    let session = Session::start(fast_config()).unwrap();
    for _ in 0..500 {
        if session.is_game_over() {
            break;
        }
        thread::sleep(Duration::from_millis(10));
    }
    assert!(session.is_game_over());
    assert!(session.gravity_ticks() > 0);

    // Let the timer notice the terminal phase
    thread::sleep(Duration::from_millis(50));
    assert!(!session.is_gravity_running());
}

#[test]
fn test_input_and_gravity_never_tear_the_grid() {
    let session = Arc::new(Session::start(fast_config()).unwrap());

    let players: Vec<_> = (0..3)
        .map(|id| {
            let session = Arc::clone(&session);
            thread::spawn(move || {
                for step in 0..200 {
                    match (id + step) % 4 {
                        0 => {
                            session.move_piece(Direction::Left);
                        }
                        1 => {
                            session.move_piece(Direction::Right);
                        }
                        2 => {
                            session.rotate(RotateDirection::Clockwise);
                        }
                        _ => {
                            session.move_piece(Direction::Down);
                        }
                    }
                }
            })
        })
        .collect();

    for _ in 0..100 {
        let snapshot = session.snapshot();
        let height = snapshot.grid.height as usize;
        // Full rows are swept inside the same critical section as the lock
        assert!((0..height).all(|row| !snapshot.grid.is_row_full(row)));
        if let Some(active) = snapshot.active {
            for (row, col) in active.cells {
                assert_eq!(
                    snapshot.grid.get(row as usize, col as usize),
                    Some(active.kind.id())
                );
            }
        }
    }

    for player in players {
        player.join().unwrap();
    }
    session.stop();
}

#[test]
fn test_reset_gives_fresh_game_with_gravity() {
    let session = Session::start(fast_config()).unwrap();
    session.hard_drop();
    session.hard_drop();

    session.reset().unwrap();
    let snapshot = session.snapshot();
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.lines, 0);
    assert_eq!(snapshot.episode, 1);
    assert!(session.is_gravity_running());

    thread::sleep(Duration::from_millis(30));
    assert!(session.gravity_ticks() > 0);
}

#[test]
fn test_stopped_session_stays_queryable() {
    let session = Session::start(fast_config()).unwrap();
    session.stop();
    assert!(!session.is_gravity_running());

    let before = session.snapshot();
    thread::sleep(Duration::from_millis(20));
    assert_eq!(session.snapshot(), before);

    // Commands still work without a timer
    assert!(session.apply(Command::HardDrop).unwrap());
    assert_eq!(session.with_playfield(|pf| pf.pieces_locked()), 1);
}

#[test]
fn test_manual_sprint_session() {
    let config = GameConfig::default().with_mode(GameMode::FortyLines);
    let session = Session::manual(config).unwrap();
    assert_eq!(session.snapshot().mode, GameMode::FortyLines);
    assert!(session.toggle_pause());
    assert_eq!(session.snapshot().phase, Phase::Paused);
    assert!(session.toggle_pause());
    assert_eq!(session.level(), 1);
    assert_eq!(session.lines_cleared(), 0);
    assert!(!session.is_finished());
}
