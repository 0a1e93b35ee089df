//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{ExternalGrid, BOARD_SIZE, CELL_COUNT, EMPTY_CODE};
use crate::error::OthelloError;
use crate::piece::{Cell, Position, Side};

/// 棋盘
///
/// 8x8 格子，每格恰为空、白、黑之一。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// 索引为 row * 8 + col，使用 Vec 以支持 serde
    cells: Vec<Cell>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            cells: vec![Cell::Empty; CELL_COUNT],
        }
    }

    /// 创建初始棋盘：中央四子，白方占主对角线
    pub fn initial() -> Self {
        let mut board = Self::empty();
        board.set(Position::new_unchecked(3, 3), Cell::White);
        board.set(Position::new_unchecked(3, 4), Cell::Black);
        board.set(Position::new_unchecked(4, 3), Cell::Black);
        board.set(Position::new_unchecked(4, 4), Cell::White);
        board
    }

    /// 从外部编码创建（宽松模式）
    ///
    /// 除白、黑两个占据编码外的任何值都按空格处理。
    pub fn from_external(grid: &ExternalGrid) -> Self {
        let mut board = Self::empty();
        for (row, line) in grid.iter().enumerate() {
            for (col, &code) in line.iter().enumerate() {
                let cell = Cell::from_code(code).unwrap_or(Cell::Empty);
                board.cells[row * BOARD_SIZE + col] = cell;
            }
        }
        board
    }

    /// 从外部编码创建（严格模式），遇到未知编码报错
    pub fn try_from_external(grid: &ExternalGrid) -> Result<Self, OthelloError> {
        let mut board = Self::empty();
        for (row, line) in grid.iter().enumerate() {
            for (col, &code) in line.iter().enumerate() {
                let cell = Cell::from_code(code)
                    .ok_or(OthelloError::InvalidCellCode { row, col, code })?;
                board.cells[row * BOARD_SIZE + col] = cell;
            }
        }
        Ok(board)
    }

    /// 转换为外部编码
    pub fn to_external(&self) -> ExternalGrid {
        let mut grid = [[EMPTY_CODE; BOARD_SIZE]; BOARD_SIZE];
        for pos in Position::all() {
            grid[pos.row as usize][pos.col as usize] = self.get(pos).code();
        }
        grid
    }

    /// 获取指定位置的格子，越界视为空
    pub fn get(&self, pos: Position) -> Cell {
        if pos.is_valid() {
            self.cells[pos.to_index()]
        } else {
            Cell::Empty
        }
    }

    /// 设置指定位置的格子
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if pos.is_valid() {
            self.cells[pos.to_index()] = cell;
        }
    }

    /// 指定位置是否被某方占据
    pub fn is_owned_by(&self, pos: Position, side: Side) -> bool {
        self.get(pos).side() == Some(side)
    }

    /// 统计某方棋子数
    pub fn count(&self, side: Side) -> usize {
        let target = Cell::from(side);
        self.cells.iter().filter(|&&c| c == target).count()
    }

    /// 统计空格数
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// 获取指定阵营的所有棋子位置（行优先）
    pub fn pieces(&self, side: Side) -> Vec<Position> {
        Position::all()
            .filter(|&pos| self.is_owned_by(pos, side))
            .collect()
    }

    /// 按行迭代格子
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(BOARD_SIZE)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.to_layout_char())?;
            }
        }
        Ok(())
    }
}
