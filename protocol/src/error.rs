//! 错误类型定义

use thiserror::Error;

use crate::piece::Side;

/// 黑白棋规则错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OthelloError {
    /// 无效的位置
    #[error("Invalid position: ({row}, {col})")]
    InvalidPosition { row: i32, col: i32 },

    /// 非法走法（目标格被占或无法夹住任何对方棋子）
    #[error("Illegal move for {side}: ({row}, {col})")]
    IllegalMove { row: u8, col: u8, side: Side },

    /// 仍有合法走法时不能弃权
    #[error("{side} cannot pass while legal moves remain")]
    PassNotAllowed { side: Side },

    /// 外部棋盘中的未知编码
    #[error("Invalid cell code {code} at ({row}, {col})")]
    InvalidCellCode { row: usize, col: usize, code: i32 },

    /// 无效的布局字符串
    #[error("Invalid board layout: {reason}")]
    InvalidLayout { reason: String },

    /// 无效的坐标记法
    #[error("Invalid notation: {notation}")]
    InvalidNotation { notation: String },
}

/// 协议错误类型
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化错误（bincode）
    #[error("Bincode serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 棋谱版本不匹配
    #[error("Record version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },

    /// 黑白棋规则错误
    #[error("Othello error: {0}")]
    Othello(#[from] OthelloError),
}

/// 协议操作结果类型
pub type Result<T> = std::result::Result<T, ProtocolError>;
