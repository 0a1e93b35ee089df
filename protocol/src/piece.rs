//! 棋子、格子、位置与方向定义

use serde::{Deserialize, Serialize};

use crate::constants::{BLACK_CODE, BOARD_SIZE, CELL_COUNT, EMPTY_CODE, WHITE_CODE};

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 白方（A 方，外部编码 0）
    White,
    /// 黑方（B 方，外部编码 1，先手）
    Black,
}

impl Side {
    /// 先手方
    pub const FIRST: Side = Side::Black;

    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// 从外部接口的 `is_white` 标志转换
    pub fn from_white_flag(is_white: bool) -> Side {
        if is_white {
            Side::White
        } else {
            Side::Black
        }
    }

    /// 是否为白方
    pub fn is_white(&self) -> bool {
        matches!(self, Side::White)
    }

    /// 外部编码
    pub fn code(&self) -> i32 {
        match self {
            Side::White => WHITE_CODE,
            Side::Black => BLACK_CODE,
        }
    }

    /// 布局字符（黑 X，白 O）
    pub fn to_layout_char(&self) -> char {
        match self {
            Side::White => 'O',
            Side::Black => 'X',
        }
    }

    /// 从布局字符解析
    pub fn from_layout_char(c: char) -> Option<Side> {
        match c {
            'O' | 'o' | 'W' | 'w' => Some(Side::White),
            'X' | 'x' | 'B' | 'b' => Some(Side::Black),
            _ => None,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// 格子状态（三态）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    White,
    Black,
}

impl Cell {
    /// 占据该格的阵营
    pub fn side(&self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::White => Some(Side::White),
            Cell::Black => Some(Side::Black),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// 外部编码
    pub fn code(&self) -> i32 {
        match self {
            Cell::Empty => EMPTY_CODE,
            Cell::White => WHITE_CODE,
            Cell::Black => BLACK_CODE,
        }
    }

    /// 从外部编码解析，未知编码返回 None
    pub fn from_code(code: i32) -> Option<Cell> {
        match code {
            EMPTY_CODE => Some(Cell::Empty),
            WHITE_CODE => Some(Cell::White),
            BLACK_CODE => Some(Cell::Black),
            _ => None,
        }
    }

    /// 布局字符
    pub fn to_layout_char(&self) -> char {
        match self.side() {
            Some(side) => side.to_layout_char(),
            None => '.',
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Cell::White,
            Side::Black => Cell::Black,
        }
    }
}

/// 棋盘位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 行 (0-7)
    pub row: u8,
    /// 列 (0-7)
    pub col: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 从外部坐标创建（可能为负）
    pub fn from_external(row: i32, col: i32) -> Option<Self> {
        let row = u8::try_from(row).ok()?;
        let col = u8::try_from(col).ok()?;
        Self::new(row, col)
    }

    /// 转换为外部坐标 `(row, col)`
    pub fn to_external(&self) -> (i32, i32) {
        (self.row as i32, self.col as i32)
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// 沿方向移动一步，越界返回 None
    pub fn step(&self, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.delta();
        self.offset(dr, dc)
    }

    /// 获取偏移后的位置
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Position> {
        let new_row = self.row as i8 + dr;
        let new_col = self.col as i8 + dc;
        if new_row >= 0
            && (new_row as usize) < BOARD_SIZE
            && new_col >= 0
            && (new_col as usize) < BOARD_SIZE
        {
            Some(Position {
                row: new_row as u8,
                col: new_col as u8,
            })
        } else {
            None
        }
    }

    /// 八邻域内的所有位置
    pub fn neighbors(&self) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL.iter().filter_map(move |&dir| self.step(dir))
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < CELL_COUNT {
            Some(Position {
                row: (index / BOARD_SIZE) as u8,
                col: (index % BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }

    /// 行优先遍历全部 64 个位置
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).map(|i| Position {
            row: (i / BOARD_SIZE) as u8,
            col: (i % BOARD_SIZE) as u8,
        })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// 扫描方向
///
/// 顺序固定，走法生成的枚举顺序依赖于此（影响搜索的同分取舍）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// 全部方向，按扫描顺序
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// (行增量, 列增量)
    pub const fn delta(&self) -> (i8, i8) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
            Direction::NorthEast => (-1, 1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
        }
    }
}
