//! Playfield tests - full game scenarios through the public commands

use blockfall::core::{Board, GameConfig, GravityTick, MoveOutcome, Playfield, Tetromino};
use blockfall::types::{
    Command, Direction, GameMode, Phase, PieceKind, RotateDirection, EMPTY_CELL, SPRINT_LINES,
};

/// Fill `rows` completely except column 0
fn well_board(rows: std::ops::RangeInclusive<i8>) -> Board {
    let mut board = Board::new();
    for row in rows {
        for col in 1..10 {
            board.set(row, col, PieceKind::Z.id());
        }
    }
    board
}

/// Spawn an I, stand it up and drop it into column 0
fn drop_vertical_i(pf: &mut Playfield) {
    assert!(pf.spawn(PieceKind::I));
    assert!(pf.rotate(RotateDirection::Clockwise));
    while pf.move_piece(Direction::Left) == MoveOutcome::Moved {}
    assert!(pf.active().unwrap().cells().iter().all(|&(_, col)| col == 0));
    pf.hard_drop();
}

#[test]
fn test_i_piece_falls_nineteen_rows_and_locks() {
    let mut pf = Playfield::new(GameConfig::default());
    assert!(pf.spawn(PieceKind::I));

    for _ in 0..18 {
        assert_eq!(pf.move_piece(Direction::Down), MoveOutcome::Moved);
    }
    assert_eq!(pf.move_piece(Direction::Down), MoveOutcome::Locked);

    for col in 3..7 {
        assert_eq!(pf.board().get(19, col), Some(PieceKind::I.id()));
    }
    assert_eq!(pf.lines_cleared(), 0);
    assert_eq!(pf.pieces_locked(), 1);

    let next = pf.active().unwrap();
    assert_eq!(next.cells(), Tetromino::spawned(next.kind(), 10).cells());
}

#[test]
fn test_level_three_line_scores() {
    let expected = [120, 300, 900, 3600];
    for (lines, &points) in (1..=4).zip(expected.iter()) {
        let board = well_board(20 - lines..=19);
        let config = GameConfig::default().with_start_level(3);
        let mut pf = Playfield::with_board(config, board);

        drop_vertical_i(&mut pf);
        assert_eq!(pf.lines_cleared(), lines as u32);
        assert_eq!(pf.score(), points, "{} lines", lines);
        assert_eq!(pf.level(), 3);
    }
}

#[test]
fn test_no_full_rows_survive_a_clear() {
    let mut board = well_board(19..=19);
    board.set(18, 7, PieceKind::L.id());
    let mut pf = Playfield::with_board(GameConfig::default(), board);

    drop_vertical_i(&mut pf);
    assert_eq!(pf.lines_cleared(), 1);

    let grid = pf.settled_grid();
    assert!((0..20).all(|row| !grid.is_row_full(row)));
    // Rows above the cleared one dropped by one
    assert_eq!(grid.get(19, 7), Some(PieceKind::L.id()));
    assert_eq!(grid.get(18, 7), Some(EMPTY_CELL));
    for row in 17..20 {
        assert_eq!(grid.get(row, 0), Some(PieceKind::I.id()));
    }
    assert_eq!(grid.get(16, 0), Some(EMPTY_CELL));
}

#[test]
fn test_landing_on_settled_blocks_locks_and_respawns() {
    let mut board = Board::new();
    board.set(10, 4, PieceKind::J.id());
    let mut pf = Playfield::with_board(GameConfig::default(), board);
    pf.spawn(PieceKind::O);

    let mut outcome = MoveOutcome::Moved;
    let mut moves = 0;
    while outcome == MoveOutcome::Moved {
        outcome = pf.move_piece(Direction::Down);
        moves += 1;
    }
    assert_eq!(outcome, MoveOutcome::Locked);
    assert_eq!(moves, 9);
    assert_eq!(pf.board().get(9, 4), Some(PieceKind::O.id()));
    assert_eq!(pf.board().get(8, 5), Some(PieceKind::O.id()));

    let next = pf.active().unwrap();
    assert_eq!(next.cells(), Tetromino::spawned(next.kind(), 10).cells());
}

#[test]
fn test_game_over_freezes_grid() {
    let mut pf = Playfield::new(GameConfig::default().with_seed(99));
    while !pf.is_game_over() {
        pf.hard_drop();
    }
    assert_eq!(pf.phase(), Phase::GameOver);
    assert!(pf.active().is_none());

    let frozen = pf.grid_snapshot();
    for direction in [Direction::Left, Direction::Right, Direction::Down] {
        assert_eq!(pf.move_piece(direction), MoveOutcome::Rejected);
    }
    assert!(!pf.rotate(RotateDirection::Clockwise));
    assert!(!pf.rotate(RotateDirection::CounterClockwise));
    assert!(!pf.spawn(PieceKind::T));
    assert_eq!(pf.gravity_tick(), GravityTick::Halted);
    assert_eq!(pf.grid_snapshot(), frozen);
}

#[test]
fn test_commands_map_onto_playfield() {
    let mut pf = Playfield::new(GameConfig::default());
    pf.spawn(PieceKind::T);

    assert!(pf.apply(Command::MoveLeft));
    assert!(pf.apply(Command::MoveRight));
    assert!(pf.apply(Command::RotateCw));
    assert!(pf.apply(Command::RotateCcw));
    assert!(pf.apply(Command::MoveDown));
    assert!(pf.apply(Command::HardDrop));
    assert_eq!(pf.pieces_locked(), 1);

    assert!(pf.apply(Command::Pause));
    assert!(!pf.apply(Command::MoveLeft));
    assert!(pf.apply(Command::Pause));

    assert!(pf.apply(Command::Reset));
    assert_eq!(pf.pieces_locked(), 0);
    assert_eq!(pf.episode(), 1);
}

#[test]
fn test_sprint_finishes_at_goal() {
    // A 44-row well holds exactly forty lines below the spawn rows
    let mut board = Board::with_size(10, 44);
    for row in 4..44 {
        for col in 1..10 {
            board.set(row, col, PieceKind::Z.id());
        }
    }
    let config = GameConfig::default().with_mode(GameMode::FortyLines);
    let mut pf = Playfield::with_board(config, board);

    for tetrises in 1..=10 {
        assert!(!pf.is_finished());
        drop_vertical_i(&mut pf);
        assert_eq!(pf.lines_cleared(), tetrises * 4);
    }

    assert_eq!(pf.lines_cleared(), SPRINT_LINES);
    assert_eq!(pf.phase(), Phase::Finished);
    assert!(pf.active().is_none());
    assert_eq!(pf.move_piece(Direction::Down), MoveOutcome::Rejected);
    assert_eq!(pf.gravity_tick(), GravityTick::Halted);
}
