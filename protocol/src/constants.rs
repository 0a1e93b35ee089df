//! 协议常量定义

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIZE: usize = 8;

/// 棋盘格子总数
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 外部编码：空格
pub const EMPTY_CODE: i32 = -1;

/// 外部编码：白方（A 方）
pub const WHITE_CODE: i32 = 0;

/// 外部编码：黑方（B 方，先手）
pub const BLACK_CODE: i32 = 1;

/// 无合法走法时返回的哨兵坐标
pub const NO_MOVE: (i32, i32) = (-1, -1);

/// 引擎名称（对外报告）
pub const ENGINE_NAME: &str = "01_Ceschin_Magnin";

/// 默认搜索深度
pub const DEFAULT_SEARCH_DEPTH: u8 = 4;

/// 外部棋盘编码：8x8 行优先矩阵，`grid[row][col]`
pub type ExternalGrid = [[i32; BOARD_SIZE]; BOARD_SIZE];
