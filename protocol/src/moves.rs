//! 走法生成和翻转规则

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::CELL_COUNT;
use crate::error::OthelloError;
use crate::piece::{Cell, Direction, Position, Side};

/// 走法（落子位置 + 落子方）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 落子位置
    pub position: Position,
    /// 落子方
    pub side: Side,
}

impl Move {
    /// 创建新走法
    pub fn new(position: Position, side: Side) -> Self {
        Self { position, side }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.side, self.position)
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成指定阵营的所有合法走法
    ///
    /// 按行优先遍历己方棋子，每个棋子按 `Direction::ALL` 顺序扫描。
    /// 同一落点可能由多个棋子或方向发现，只保留第一次出现的位置。
    pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
        let mut moves = Vec::with_capacity(16);
        let mut seen = [false; CELL_COUNT];
        let opponent = side.opponent();

        for origin in board.pieces(side) {
            for dir in Direction::ALL {
                let mut crossed = false;
                let mut current = origin.step(dir);

                while let Some(pos) = current {
                    match board.get(pos).side() {
                        Some(s) if s == opponent => {
                            crossed = true;
                            current = pos.step(dir);
                        }
                        Some(_) => break,
                        None => {
                            if crossed && !seen[pos.to_index()] {
                                seen[pos.to_index()] = true;
                                moves.push(Move::new(pos, side));
                            }
                            break;
                        }
                    }
                }
            }
        }

        moves
    }

    /// 指定阵营是否至少有一个合法走法
    pub fn has_legal_move(board: &Board, side: Side) -> bool {
        Position::all().any(|pos| Self::is_legal(board, pos, side))
    }

    /// 判断落子是否合法
    pub fn is_legal(board: &Board, pos: Position, side: Side) -> bool {
        pos.is_valid()
            && board.get(pos).is_empty()
            && Direction::ALL
                .iter()
                .any(|&dir| !Self::bracketed_run(board, pos, side, dir).is_empty())
    }

    /// 落子后会被翻转的所有对方棋子（按方向顺序）
    ///
    /// 不检查落点本身是否为空。
    pub fn flips(board: &Board, pos: Position, side: Side) -> Vec<Position> {
        Direction::ALL
            .iter()
            .flat_map(|&dir| Self::bracketed_run(board, pos, side, dir))
            .collect()
    }

    /// 执行走法：翻转被夹住的对方棋子并放置新子
    ///
    /// 返回被翻转的棋子数。非法走法返回错误且不修改棋盘。
    pub fn apply_move(board: &mut Board, mv: Move) -> Result<usize, OthelloError> {
        let Move { position, side } = mv;
        let illegal = OthelloError::IllegalMove {
            row: position.row,
            col: position.col,
            side,
        };

        if !position.is_valid() || !board.get(position).is_empty() {
            return Err(illegal);
        }

        let flipped = Self::flips(board, position, side);
        if flipped.is_empty() {
            return Err(illegal);
        }

        let cell = Cell::from(side);
        for &pos in &flipped {
            board.set(pos, cell);
        }
        board.set(position, cell);

        Ok(flipped.len())
    }

    /// 双方都无棋可走时对局结束
    pub fn is_game_over(board: &Board) -> bool {
        !Self::has_legal_move(board, Side::White) && !Self::has_legal_move(board, Side::Black)
    }

    /// 按棋子数判定胜方，平局返回 None
    pub fn leader(board: &Board) -> Option<Side> {
        let white = board.count(Side::White);
        let black = board.count(Side::Black);
        match white.cmp(&black) {
            std::cmp::Ordering::Greater => Some(Side::White),
            std::cmp::Ordering::Less => Some(Side::Black),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// 从 `pos` 沿 `dir` 被夹住的对方棋子；未以己方棋子收尾时为空
    fn bracketed_run(board: &Board, pos: Position, side: Side, dir: Direction) -> Vec<Position> {
        let opponent = side.opponent();
        let mut run = Vec::new();
        let mut current = pos.step(dir);

        while let Some(p) = current {
            match board.get(p).side() {
                Some(s) if s == opponent => {
                    run.push(p);
                    current = p.step(dir);
                }
                Some(_) => return run,
                None => break,
            }
        }

        Vec::new()
    }
}
