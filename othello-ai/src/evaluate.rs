//! 棋局评估函数
//!
//! 由六项加权组成，每项先归一化到约 ±100 的尺度：
//! 子数差、边缘子（frontier）、位置分、角占领、角邻接、行动力。

use othello_protocol::{Board, MoveGenerator, Position, Side, BOARD_SIZE};

/// 各项权重
pub mod weights {
    pub const COIN_PARITY: f64 = 10.0;
    pub const CORNER_OCCUPANCY: f64 = 801.724;
    pub const CORNER_CLOSENESS: f64 = 382.026;
    pub const MOBILITY: f64 = 78.922;
    pub const FRONTIER: f64 = 74.396;
    pub const POSITION: f64 = 10.0;
}

/// 位置分值表（对称）
pub const POSITION_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [20, -3, 11,  8,  8, 11, -3, 20],
    [-3, -7, -4,  1,  1, -4, -7, -3],
    [11, -4,  2,  2,  2,  2, -4, 11],
    [ 8,  1,  2, -3, -3,  2,  1,  8],
    [ 8,  1,  2, -3, -3,  2,  1,  8],
    [11, -4,  2,  2,  2,  2, -4, 11],
    [-3, -7, -4,  1,  1, -4, -7, -3],
    [20, -3, 11,  8,  8, 11, -3, 20],
];

/// 每个角及其三个相邻格
const CORNERS: [(Position, [Position; 3]); 4] = [
    (
        Position::new_unchecked(0, 0),
        [
            Position::new_unchecked(0, 1),
            Position::new_unchecked(1, 0),
            Position::new_unchecked(1, 1),
        ],
    ),
    (
        Position::new_unchecked(0, 7),
        [
            Position::new_unchecked(0, 6),
            Position::new_unchecked(1, 7),
            Position::new_unchecked(1, 6),
        ],
    ),
    (
        Position::new_unchecked(7, 0),
        [
            Position::new_unchecked(6, 0),
            Position::new_unchecked(7, 1),
            Position::new_unchecked(6, 1),
        ],
    ),
    (
        Position::new_unchecked(7, 7),
        [
            Position::new_unchecked(6, 7),
            Position::new_unchecked(7, 6),
            Position::new_unchecked(6, 6),
        ],
    ),
];

/// 各项评估值（未加权）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Features {
    pub coin_parity: f64,
    pub frontier: f64,
    pub position: f64,
    pub corner_occupancy: f64,
    pub corner_closeness: f64,
    pub mobility: f64,
}

impl Features {
    /// 加权总分
    pub fn score(&self) -> f64 {
        weights::COIN_PARITY * self.coin_parity
            + weights::CORNER_OCCUPANCY * self.corner_occupancy
            + weights::CORNER_CLOSENESS * self.corner_closeness
            + weights::MOBILITY * self.mobility
            + weights::FRONTIER * self.frontier
            + weights::POSITION * self.position
    }
}

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 评估棋局（`perspective` 视角，正值对其有利）
    pub fn evaluate(board: &Board, perspective: Side) -> f64 {
        Self::features(board, perspective).score()
    }

    /// 计算全部评估项
    pub fn features(board: &Board, perspective: Side) -> Features {
        Features {
            coin_parity: Self::coin_parity(board, perspective),
            frontier: Self::frontier(board, perspective),
            position: Self::position(board, perspective),
            corner_occupancy: Self::corner_occupancy(board, perspective),
            corner_closeness: Self::corner_closeness(board, perspective),
            mobility: Self::mobility(board, perspective),
        }
    }

    /// 子数差
    pub fn coin_parity(board: &Board, perspective: Side) -> f64 {
        normalized_difference(
            board.count(perspective),
            board.count(perspective.opponent()),
        )
    }

    /// 边缘子：与空格相邻的棋子越多越容易被翻，符号取反
    pub fn frontier(board: &Board, perspective: Side) -> f64 {
        let mut mine = 0;
        let mut theirs = 0;

        for pos in Position::all() {
            let Some(owner) = board.get(pos).side() else {
                continue;
            };
            if !pos.neighbors().any(|n| board.get(n).is_empty()) {
                continue;
            }
            if owner == perspective {
                mine += 1;
            } else {
                theirs += 1;
            }
        }

        -normalized_difference(mine, theirs)
    }

    /// 位置分
    pub fn position(board: &Board, perspective: Side) -> f64 {
        let mut score = 0;
        for pos in Position::all() {
            let weight = POSITION_WEIGHTS[pos.row as usize][pos.col as usize];
            match board.get(pos).side() {
                Some(side) if side == perspective => score += weight,
                Some(_) => score -= weight,
                None => {}
            }
        }
        score as f64
    }

    /// 角占领，每个角 ±25
    pub fn corner_occupancy(board: &Board, perspective: Side) -> f64 {
        let net: i32 = CORNERS
            .iter()
            .map(|(corner, _)| ownership(board, *corner, perspective))
            .sum();
        25.0 * net as f64
    }

    /// 角邻接：空角旁的己方棋子会把角让给对方，每子 -12.5
    pub fn corner_closeness(board: &Board, perspective: Side) -> f64 {
        let net: i32 = CORNERS
            .iter()
            .filter(|(corner, _)| board.get(*corner).is_empty())
            .flat_map(|(_, adjacent)| adjacent.iter())
            .map(|&pos| ownership(board, pos, perspective))
            .sum();
        -12.5 * net as f64
    }

    /// 行动力
    pub fn mobility(board: &Board, perspective: Side) -> f64 {
        normalized_difference(
            MoveGenerator::legal_moves(board, perspective).len(),
            MoveGenerator::legal_moves(board, perspective.opponent()).len(),
        )
    }
}

/// 100 * (mine - theirs) / (mine + theirs)，两者相等（含均为 0）时为 0
fn normalized_difference(mine: usize, theirs: usize) -> f64 {
    if mine == theirs {
        return 0.0;
    }
    let mine = mine as f64;
    let theirs = theirs as f64;
    100.0 * (mine - theirs) / (mine + theirs)
}

/// 己方 +1，对方 -1，空 0
fn ownership(board: &Board, pos: Position, perspective: Side) -> i32 {
    match board.get(pos).side() {
        Some(side) if side == perspective => 1,
        Some(_) => -1,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use othello_protocol::{Layout, Move};
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const EPSILON: f64 = 1e-9;

    fn after_d3() -> Board {
        let mut board = Board::initial();
        MoveGenerator::apply_move(
            &mut board,
            Move::new(Position::new_unchecked(2, 3), Side::Black),
        )
        .unwrap();
        board
    }

    /// 从初始局面随机走若干步
    fn random_positions(seed: u64, count: usize) -> Vec<Board> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut boards = Vec::new();
        let mut board = Board::initial();
        let mut side = Side::FIRST;

        while boards.len() < count {
            let moves = MoveGenerator::legal_moves(&board, side);
            match moves.choose(&mut rng) {
                Some(&mv) => {
                    MoveGenerator::apply_move(&mut board, mv).unwrap();
                    boards.push(board.clone());
                }
                None if MoveGenerator::is_game_over(&board) => board = Board::initial(),
                None => {}
            }
            side = side.opponent();
        }

        boards
    }

    #[test]
    fn test_initial_evaluation() {
        let board = Board::initial();
        let features = Evaluator::features(&board, Side::Black);
        assert_eq!(features, Features::default());
        assert_eq!(Evaluator::evaluate(&board, Side::White), 0.0);
    }

    #[test]
    fn test_features_after_first_move() {
        let board = after_d3();
        let features = Evaluator::features(&board, Side::Black);

        assert!((features.coin_parity - 60.0).abs() < EPSILON);
        assert!((features.frontier + 60.0).abs() < EPSILON);
        assert_eq!(features.position, -4.0);
        assert_eq!(features.corner_occupancy, 0.0);
        assert_eq!(features.corner_closeness, 0.0);
        assert_eq!(features.mobility, 0.0);

        // 10*60 + 74.396*(-60) + 10*(-4)
        let expected = -3903.76;
        assert!((Evaluator::evaluate(&board, Side::Black) - expected).abs() < 1e-6);
        assert!((Evaluator::evaluate(&board, Side::White) + expected).abs() < 1e-6);
    }

    #[test]
    fn test_corner_occupancy() {
        let layout = "\
            X......O\n\
            ........\n\
            ........\n\
            ........\n\
            ........\n\
            ........\n\
            ........\n\
            X.......";
        let (board, _) = Layout::parse(layout).unwrap();
        assert_eq!(Evaluator::corner_occupancy(&board, Side::Black), 25.0);
        assert_eq!(Evaluator::corner_occupancy(&board, Side::White), -25.0);
    }

    #[test]
    fn test_corner_closeness_only_counts_empty_corners() {
        // 左上角为空，黑子贴着它；右上角被占，旁边的子不计
        let layout = "\
            .X....XO\n\
            XX....O.\n\
            ........\n\
            ........\n\
            ........\n\
            ........\n\
            ........\n\
            ........";
        let (board, _) = Layout::parse(layout).unwrap();
        assert_eq!(Evaluator::corner_closeness(&board, Side::Black), -37.5);
        assert_eq!(Evaluator::corner_closeness(&board, Side::White), 37.5);
    }

    #[test]
    fn test_position_weights_symmetric() {
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                assert_eq!(POSITION_WEIGHTS[r][c], POSITION_WEIGHTS[c][r]);
                assert_eq!(POSITION_WEIGHTS[r][c], POSITION_WEIGHTS[BOARD_SIZE - 1 - r][c]);
                assert_eq!(POSITION_WEIGHTS[r][c], POSITION_WEIGHTS[r][BOARD_SIZE - 1 - c]);
            }
        }
        assert_eq!(POSITION_WEIGHTS[0][0], 20);
        assert_eq!(POSITION_WEIGHTS[1][1], -7);
    }

    #[test]
    fn test_frontier_single_piece() {
        let mut board = Board::empty();
        board.set(Position::new_unchecked(0, 0), othello_protocol::Cell::Black);
        assert_eq!(Evaluator::frontier(&board, Side::Black), -100.0);
        assert_eq!(Evaluator::coin_parity(&board, Side::Black), 100.0);
        assert_eq!(Evaluator::position(&board, Side::Black), 20.0);
    }

    #[test]
    fn test_full_board_has_no_frontier() {
        let text = format!("{}{}", "X".repeat(40), "O".repeat(24));
        let (board, _) = Layout::parse(&text).unwrap();
        assert_eq!(Evaluator::frontier(&board, Side::Black), 0.0);
        assert_eq!(Evaluator::mobility(&board, Side::Black), 0.0);
        assert_eq!(Evaluator::corner_closeness(&board, Side::Black), 0.0);
    }

    #[test]
    fn test_antisymmetry() {
        for board in random_positions(0xA5A5, 40) {
            let white = Evaluator::features(&board, Side::White);
            let black = Evaluator::features(&board, Side::Black);

            assert!((white.coin_parity + black.coin_parity).abs() < EPSILON);
            assert!((white.mobility + black.mobility).abs() < EPSILON);
            assert!((white.corner_occupancy + black.corner_occupancy).abs() < EPSILON);
            assert!((white.score() + black.score()).abs() < 1e-6);
        }
    }
}
