//! 通过 Playable 调用约定驱动完整对局

use othello_engine::{OthelloEngine, Playable};
use othello_protocol::{MoveGenerator, Side, NO_MOVE};

/// 双方按给定深度自对弈，返回走了多少手（不含弃权）
fn self_play(engine: &mut OthelloEngine, black_depth: u8, white_depth: u8) -> usize {
    let mut moves = 0;

    while !engine.is_game_over() {
        let side = engine.side_to_move();
        let depth = if side.is_white() { white_depth } else { black_depth };
        let before = engine.score(true) + engine.score(false);

        let grid = engine.board();
        let (row, col) = engine.next_move(&grid, depth, side.is_white());
        if (row, col) == NO_MOVE {
            assert!(engine.legal_moves(side).is_empty());
            engine.pass(side).unwrap();
            assert_eq!(engine.side_to_move(), side.opponent());
            continue;
        }

        assert!(engine.is_playable(row, col, side.is_white()));
        assert!(engine.play_move(row, col, side.is_white()));
        moves += 1;

        // 落子落在 next_move 返回的格子上
        let code = if side.is_white() { 0 } else { 1 };
        assert_eq!(engine.board()[row as usize][col as usize], code);

        // 每手棋子总数加一
        assert_eq!(engine.score(true) + engine.score(false), before + 1);
        assert_eq!(engine.side_to_move(), side.opponent());

        // 同一时刻至多一方在计时
        let running = engine.timer().running_side();
        if engine.is_game_over() {
            assert_eq!(running, None);
        } else {
            assert_eq!(running, Some(side.opponent()));
        }
    }

    moves
}

#[test]
fn test_full_game_shallow() {
    let mut engine = OthelloEngine::default();
    let moves = self_play(&mut engine, 1, 2);

    assert!(engine.is_game_over());
    assert!(moves <= 60);

    let result = engine.result().unwrap();
    assert_eq!(engine.record().metadata.result, Some(result));

    let grid = engine.board();
    let white = grid.iter().flatten().filter(|&&c| c == 0).count() as i32;
    let black = grid.iter().flatten().filter(|&&c| c == 1).count() as i32;
    assert_eq!(white, engine.score(true));
    assert_eq!(black, engine.score(false));
}

#[test]
fn test_record_replays_to_final_board() {
    let mut engine = OthelloEngine::default();
    self_play(&mut engine, 2, 1);

    let replayed = engine.record().replay().unwrap();
    assert_eq!(&replayed, engine.board_state());
}

#[test]
fn test_same_depths_same_game() {
    let mut first = OthelloEngine::default();
    let mut second = OthelloEngine::default();
    self_play(&mut first, 2, 2);
    self_play(&mut second, 2, 2);

    assert_eq!(first.board(), second.board());
}

#[test]
fn test_illegal_moves_rejected() {
    let mut engine = OthelloEngine::default();
    let before = engine.board();

    // 被占格、无法夹住、越界、轮到对方的落点
    assert!(!engine.play_move(3, 3, false));
    assert!(!engine.play_move(0, 0, false));
    assert!(!engine.play_move(8, 2, false));
    assert!(!engine.play_move(3, 2, true));

    assert_eq!(engine.board(), before);
    assert_eq!(engine.side_to_move(), Side::Black);
    assert!(engine.record().moves.is_empty());
}

#[test]
fn test_next_move_is_legal_for_every_level() {
    let mut engine = OthelloEngine::default();
    let grid = engine.board();

    for level in 1..=4 {
        let (row, col) = engine.next_move(&grid, level, false);
        assert_ne!((row, col), NO_MOVE);
        assert!(MoveGenerator::legal_moves(engine.board_state(), Side::Black)
            .iter()
            .any(|mv| mv.position.to_external() == (row, col)));
    }
}
