//! 坐标记法
//!
//! 列用字母 `a`-`h`，行用数字 `1`-`8`（第 0 行记为 1），例如 `d3`。

use crate::constants::BOARD_SIZE;
use crate::error::OthelloError;
use crate::moves::Move;
use crate::piece::Position;

/// 坐标记法转换
pub struct Notation;

impl Notation {
    /// 位置转记法
    pub fn to_notation(pos: Position) -> String {
        let col = (b'a' + pos.col) as char;
        format!("{}{}", col, pos.row + 1)
    }

    /// 走法转记法
    pub fn move_to_notation(mv: &Move) -> String {
        Self::to_notation(mv.position)
    }

    /// 记法转位置
    pub fn parse(notation: &str) -> Result<Position, OthelloError> {
        let invalid = || OthelloError::InvalidNotation {
            notation: notation.to_string(),
        };

        let mut chars = notation.trim().chars();
        let col_char = chars.next().ok_or_else(invalid)?.to_ascii_lowercase();
        let row_char = chars.next().ok_or_else(invalid)?;
        if chars.next().is_some() {
            return Err(invalid());
        }

        if !('a'..='h').contains(&col_char) {
            return Err(invalid());
        }
        let row = row_char.to_digit(10).ok_or_else(invalid)? as usize;
        if row == 0 || row > BOARD_SIZE {
            return Err(invalid());
        }

        Position::new((row - 1) as u8, col_char as u8 - b'a').ok_or_else(invalid)
    }
}
