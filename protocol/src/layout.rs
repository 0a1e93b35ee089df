//! 文本布局格式解析和生成
//!
//! 格式：64 个格子字符（`X` 黑、`O` 白、`.` 或 `-` 空），
//! 可用换行、空白或 `/` 分隔；可选第 65 个字符表示走子方。
//!
//! 示例：
//! `......../......../......../...OX.../...XO.../......../......../........ X`

use crate::board::Board;
use crate::constants::CELL_COUNT;
use crate::error::OthelloError;
use crate::piece::{Cell, Position, Side};

/// 初始局面布局（黑方先行）
pub const INITIAL_LAYOUT: &str =
    "......../......../......../...OX.../...XO.../......../......../........ X";

/// 布局格式处理
pub struct Layout;

impl Layout {
    /// 解析布局字符串为棋盘和（可选的）走子方
    pub fn parse(text: &str) -> Result<(Board, Option<Side>), OthelloError> {
        let chars: Vec<char> = text
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();

        let side = match chars.len() {
            CELL_COUNT => None,
            n if n == CELL_COUNT + 1 => {
                let c = chars[CELL_COUNT];
                Some(Side::from_layout_char(c).ok_or_else(|| OthelloError::InvalidLayout {
                    reason: format!("Unknown side to move '{}'", c),
                })?)
            }
            n => {
                return Err(OthelloError::InvalidLayout {
                    reason: format!("Expected {} cells, got {}", CELL_COUNT, n),
                })
            }
        };

        let mut board = Board::empty();
        for (index, &c) in chars.iter().take(CELL_COUNT).enumerate() {
            let cell = match c {
                '.' | '-' => Cell::Empty,
                other => match Side::from_layout_char(other) {
                    Some(side) => Cell::from(side),
                    None => {
                        return Err(OthelloError::InvalidLayout {
                            reason: format!("Unknown cell '{}' at index {}", other, index),
                        })
                    }
                },
            };
            if let Some(pos) = Position::from_index(index) {
                board.set(pos, cell);
            }
        }

        Ok((board, side))
    }

    /// 生成单行布局字符串
    pub fn format(board: &Board, side_to_move: Option<Side>) -> String {
        let rows: Vec<String> = board
            .rows()
            .map(|row| row.iter().map(|c| c.to_layout_char()).collect())
            .collect();
        let mut text = rows.join("/");

        if let Some(side) = side_to_move {
            text.push(' ');
            text.push(side.to_layout_char());
        }

        text
    }
}
